use super::ct::ct_u32_neq_zero;

/// Given an integer `a` represented as little endian bytes, return the number
/// of leading zeros of the binary representation.
fn le_bytes_leading_zeros(a: &[u8]) -> u32 {
    let mut leading_zeros: u32 = 0;
    let mut mask = u32::MAX;

    for byte in a.iter().rev() {
        leading_zeros += byte.leading_zeros() & mask;
        mask ^= mask & ct_u32_neq_zero(*byte as u32);
    }
    leading_zeros
}

/// Return the bit length of an integer `a` represented as little endian bytes.
pub fn le_bytes_bit_length(a: &[u8]) -> usize {
    (a.len() << 3) - (le_bytes_leading_zeros(a) as usize)
}

/// Return the little endian bytes of x^e for a small base x.
pub fn le_bytes_small_power(x: u8, e: usize) -> Vec<u8> {
    let mut n = vec![1u8];
    for _ in 0..e {
        let mut carry = 0u16;
        for limb in n.iter_mut() {
            let t = (*limb as u16) * (x as u16) + carry;
            *limb = t as u8;
            carry = t >> 8;
        }
        if carry != 0 {
            n.push(carry as u8);
        }
    }
    n
}

/// Return the number of bytes needed to hold `nbits` bits.
pub const fn bytes_for_bits(nbits: usize) -> usize {
    (nbits + 7) >> 3
}

/// Clear every bit of `a` at position `nbits` or above, so that `a`
/// represents an integer smaller than 2^nbits.
pub fn le_bytes_mask_to_bits(a: &mut [u8], nbits: usize) {
    for (i, byte) in a.iter_mut().enumerate() {
        let lo = i << 3;
        if lo >= nbits {
            *byte = 0;
        } else if nbits - lo < 8 {
            *byte &= (1u8 << (nbits - lo)) - 1;
        }
    }
}

/// Return `0xFFFFFFFF` when every bit of `a` at position `nbits` or above is
/// zero and `0x00000000` otherwise.
pub fn le_bytes_fits_bits(a: &[u8], nbits: usize) -> u32 {
    let mut acc = 0u32;
    for (i, byte) in a.iter().enumerate() {
        let lo = i << 3;
        let high = if lo >= nbits {
            *byte
        } else if nbits - lo < 8 {
            *byte & !((1u8 << (nbits - lo)) - 1)
        } else {
            0
        };
        acc |= high as u32;
    }
    !ct_u32_neq_zero(acc)
}
