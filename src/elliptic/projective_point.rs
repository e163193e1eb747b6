use super::point::PointX;
use fp2::traits::Fp as FqTrait;

/// A full point (X : Y : Z) on a Montgomery curve. Only used off the hot
/// path, when sampling torsion points.
#[derive(Clone, Copy, Debug)]
pub struct Point<Fq: FqTrait> {
    pub X: Fq,
    pub Y: Fq,
    pub Z: Fq,
}

impl<Fq: FqTrait> Point<Fq> {
    pub const INFINITY: Self = Self {
        X: Fq::ZERO,
        Y: Fq::ONE,
        Z: Fq::ZERO,
    };

    /// No check is made that the point lies on any curve.
    pub fn new(X: &Fq, Y: &Fq, Z: &Fq) -> Self {
        Self {
            X: *X,
            Y: *Y,
            Z: *Z,
        }
    }

    /// Drop Y.
    pub fn to_point_x(self) -> PointX<Fq> {
        PointX::new(&self.X, &self.Z)
    }

    pub fn set_neg(&mut self) {
        self.Y.set_neg()
    }

    /// Overwrite self with rhs when `ctl` is `0xFFFFFFFF`; `ctl` must be
    /// all ones or all zeros.
    pub fn set_cond(&mut self, rhs: &Self, ctl: u32) {
        self.X.set_cond(&rhs.X, ctl);
        self.Y.set_cond(&rhs.Y, ctl);
        self.Z.set_cond(&rhs.Z, ctl);
    }

    pub fn is_zero(self) -> u32 {
        self.Z.is_zero()
    }
}
