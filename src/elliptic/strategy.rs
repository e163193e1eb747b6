use fp2::traits::Fp as FqTrait;

use super::point::PointX;

/// A chain of isogenies of a fixed prime degree, seen one step at a time.
/// Implementors carry the projective constants of the current curve.
pub(crate) trait IsogenyStep<Fq: FqTrait> {
    /// P <- [degree]P on the current curve.
    fn mul_degree(&self, P: &mut PointX<Fq>);

    /// Move to the codomain of the isogeny with kernel `ker`, which has
    /// order `degree`.
    fn step(&mut self, ker: &PointX<Fq>);

    /// Image of P under the isogeny of the last `step`.
    fn eval(&self, P: &mut PointX<Fq>);

    /// Extra condition on a step kernel, beyond its order.
    fn admissible(&self, _ker: &PointX<Fq>) -> u32 {
        u32::MAX
    }
}

/// Walk the chain of `n` steps with kernel generated by `kernel` using a
/// balanced strategy, pushing `images` along.
///
/// Returns `0xFFFFFFFF` when every step kernel had order exactly `degree`
/// and was admissible. Otherwise `0`, and the walker state and images are
/// garbage.
pub(crate) fn walk_balanced<Fq: FqTrait, S: IsogenyStep<Fq>>(
    walker: &mut S,
    kernel: &PointX<Fq>,
    n: usize,
    images: &mut [PointX<Fq>],
) -> u32 {
    // Stack of multiples of the kernel; points[i] has order degree^orders[i]
    let depth = (usize::BITS - n.leading_zeros() + 1) as usize;
    let mut points = vec![PointX::INFINITY; depth];
    let mut orders = vec![0usize; depth];
    points[0] = *kernel;
    orders[0] = n;

    let mut check = u32::MAX;
    let mut k = 0;
    for _ in 0..n {
        while orders[k] != 1 {
            k += 1;
            let m = orders[k - 1] / 2;
            points[k] = points[k - 1];
            for _ in 0..m {
                walker.mul_degree(&mut points[k]);
            }
            orders[k] = orders[k - 1] - m;
        }
        let ker = points[k];

        let mut T = ker;
        walker.mul_degree(&mut T);
        check &= !ker.is_zero() & T.is_zero() & walker.admissible(&ker);

        walker.step(&ker);
        for (P, order) in points.iter_mut().zip(orders.iter_mut()) {
            walker.eval(P);
            *order = order.saturating_sub(1);
        }
        for P in images.iter_mut() {
            walker.eval(P);
        }
        k = k.saturating_sub(1);
    }
    check
}
