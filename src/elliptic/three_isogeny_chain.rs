use fp2::traits::Fp as FqTrait;

use super::strategy::{IsogenyStep, walk_balanced};
use super::{curve::Curve, point::PointX};

/// State of a 3-isogeny walk: the curve as (A + 2C : A - 2C) and the
/// evaluation constants of the last step.
struct ThreeIsogenyWalk<Fq: FqTrait> {
    A24_plus: Fq,
    A24_minus: Fq,
    c0: Fq,
    c1: Fq,
}

impl<Fq: FqTrait> IsogenyStep<Fq> for ThreeIsogenyWalk<Fq> {
    /// 5S + 7M
    #[inline(always)]
    fn mul_degree(&self, P: &mut PointX<Fq>) {
        let mut t0 = P.X - P.Z;
        let mut t2 = t0.square();
        let mut t1 = P.X + P.Z;
        let mut t3 = t1.square();
        let t4 = t1 + t0;
        t0 = t1 - t0;
        t1 = t4.square();
        t1 -= t3;
        t1 -= t2;
        let t5 = t3 * self.A24_plus;
        t3 *= t5;
        let t6 = t2 * self.A24_minus;
        t2 *= t6;
        t3 = t2 - t3;
        t2 = t5 - t6;
        t1 *= t2;
        t2 = t3 + t1;
        t2.set_square();
        P.X = t2 * t4;
        t1 = t3 - t1;
        t1.set_square();
        P.Z = t1 * t0;
    }

    /// 3S + 2M
    fn step(&mut self, ker: &PointX<Fq>) {
        let c0 = ker.X - ker.Z;
        let c1 = ker.X + ker.Z;
        let t0 = c0.square();
        let t1 = c1.square();
        let mut t3 = ker.X.mul2();
        t3.set_square();
        let t2 = t3 - t0;
        t3 -= t1;

        self.A24_minus = t2 * ((t0 + t3).mul2() + t1);
        self.A24_plus = t3 * ((t1 + t2).mul2() + t0);
        self.c0 = c0;
        self.c1 = c1;
    }

    /// 2S + 4M
    #[inline(always)]
    fn eval(&self, P: &mut PointX<Fq>) {
        let t0 = (P.X + P.Z) * self.c0;
        let t1 = (P.X - P.Z) * self.c1;
        P.X *= (t0 + t1).square();
        P.Z *= (t1 - t0).square();
    }
}

impl<Fq: FqTrait> Curve<Fq> {
    /// The 3^n-isogeny with kernel generated by `kernel`, pushing
    /// `images` through to the codomain.
    ///
    /// On a zero mask the kernel was not of order exactly 3^n and the
    /// codomain and images are garbage.
    pub fn three_isogeny_chain(
        self,
        kernel: &PointX<Fq>,
        n: usize,
        images: &mut [PointX<Fq>],
    ) -> (Curve<Fq>, u32) {
        let mut walker = ThreeIsogenyWalk {
            A24_plus: self.A + Fq::TWO,
            A24_minus: self.A - Fq::TWO,
            c0: Fq::ZERO,
            c1: Fq::ZERO,
        };
        let check = walk_balanced(&mut walker, kernel, n, images);

        // A = 2 * (A24_plus + A24_minus) / (A24_plus - A24_minus)
        let ThreeIsogenyWalk {
            A24_plus,
            A24_minus,
            ..
        } = walker;
        let den = A24_plus - A24_minus;
        let den_ok = !den.is_zero();
        let A = (A24_plus + A24_minus).mul2() / den;

        let (codomain, ok) = Curve::try_new(&A);
        (codomain, check & ok & den_ok)
    }
}
