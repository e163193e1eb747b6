use fp2::traits::Fp as FqTrait;

use super::strategy::{IsogenyStep, walk_balanced};
use super::{curve::Curve, point::PointX};

/// State of a 2-isogeny walk: the curve as (A + 2)/4 = (A24 : C24) and
/// the kernel of the last step.
struct TwoIsogenyWalk<Fq: FqTrait> {
    A24: Fq,
    C24: Fq,
    ker: PointX<Fq>,
}

impl<Fq: FqTrait> IsogenyStep<Fq> for TwoIsogenyWalk<Fq> {
    /// 2S + 4M
    #[inline(always)]
    fn mul_degree(&self, P: &mut PointX<Fq>) {
        let t0 = (P.X + P.Z).square();
        let mut t1 = (P.X - P.Z).square();
        let t2 = t0 - t1;
        t1 *= self.C24;
        P.X = t0 * t1;
        P.Z = (t2 * self.A24 + t1) * t2;
    }

    fn step(&mut self, ker: &PointX<Fq>) {
        self.C24 = ker.Z.square();
        self.A24 = self.C24 - ker.X.square();
        self.ker = *ker;
    }

    fn eval(&self, P: &mut PointX<Fq>) {
        let t0 = (self.ker.X + self.ker.Z) * (P.X - P.Z);
        let t1 = (self.ker.X - self.ker.Z) * (P.X + P.Z);
        P.X *= t0 + t1;
        P.Z *= t0 - t1;
    }

    /// The step formulas do not cover the kernel (0 : 1).
    fn admissible(&self, ker: &PointX<Fq>) -> u32 {
        !ker.X.is_zero()
    }
}

/// The 2^n-isogeny from `domain` with kernel generated by `kernel`,
/// pushing `images` through to the codomain.
///
/// No step may have kernel (0 : 1), which holds whenever [2^(n-1)]kernel
/// differs from (0 : 1). On a zero mask the kernel was not of order
/// exactly 2^n, or hit (0 : 1), and the codomain and images are garbage.
pub fn two_isogeny_chain<Fq: FqTrait>(
    domain: &Curve<Fq>,
    kernel: &PointX<Fq>,
    n: usize,
    images: &mut [PointX<Fq>],
) -> (Curve<Fq>, u32) {
    let mut walker = TwoIsogenyWalk {
        A24: domain.A24,
        C24: Fq::ONE,
        ker: PointX::INFINITY,
    };
    let check = walk_balanced(&mut walker, kernel, n, images);

    // A = (4*A24 - 2*C24) / C24
    let TwoIsogenyWalk { A24, C24, .. } = walker;
    let den_ok = !C24.is_zero();
    let A = ((A24 + A24) - C24).mul2() / C24;

    let (codomain, ok) = Curve::try_new(&A);
    (codomain, check & ok & den_ok)
}
