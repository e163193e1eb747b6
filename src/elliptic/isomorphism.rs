use fp2::traits::Fp as FqTrait;

use super::{curve::Curve, point::PointX};

/// An x-only isomorphism between two Montgomery curves with the same
/// j-invariant, acting as (X : Z) -> (x*X + z*Z : d*Z).
#[derive(Clone, Copy, Debug)]
pub struct Isomorphism<Fq: FqTrait> {
    x: Fq,
    z: Fq,
    d: Fq,
}

#[inline(always)]
fn mul3<Fq: FqTrait>(a: &Fq) -> Fq {
    a.mul2() + *a
}

impl<Fq: FqTrait> Isomorphism<Fq> {
    /// E1 -> E2. Neither curve may have j = 0 or j = 1728.
    pub fn new(E1: &Curve<Fq>, E2: &Curve<Fq>) -> Self {
        // Scaling between the short Weierstrass models:
        //   lx = (2*A2^3 - 9*A2) * (3 - A1^2)
        //   lz = (2*A1^3 - 9*A1) * (3 - A2^2)
        let A1_sq = E1.A.square();
        let A2_sq = E2.A.square();
        let lx = (Fq::THREE - A1_sq) * ((A2_sq * E2.A).mul2() - mul3(&mul3(&E2.A)));
        let lz = (Fq::THREE - A2_sq) * ((A1_sq * E1.A).mul2() - mul3(&mul3(&E1.A)));

        // Back to Montgomery form on both sides
        Self {
            x: mul3(&lx),
            z: lx * E1.A - lz * E2.A,
            d: mul3(&lz),
        }
    }

    pub fn isomorphism_eval(&self, P: &mut PointX<Fq>) {
        P.X = P.X * self.x + self.z * P.Z;
        P.Z *= self.d;
    }
}
