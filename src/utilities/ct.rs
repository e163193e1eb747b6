/// `u32::MAX` when `x` is nonzero and `0` otherwise, without branching.
pub fn ct_u32_neq_zero(x: u32) -> u32 {
    let q = x | x.wrapping_neg();
    (q >> 31).wrapping_neg()
}
