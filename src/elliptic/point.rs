use fp2::traits::Fp as FqTrait;

/// A point in (X : Z) coordinates, i.e. a point up to sign. The point
/// at infinity is any (X : 0).
#[derive(Clone, Copy, Debug)]
pub struct PointX<Fq: FqTrait> {
    pub X: Fq,
    pub Z: Fq,
}

impl<Fq: FqTrait> PointX<Fq> {
    pub const INFINITY: Self = Self {
        X: <Fq>::ONE,
        Z: <Fq>::ZERO,
    };

    /// No check is made that the point lies on any curve.
    pub fn new(X: &Fq, Z: &Fq) -> Self {
        Self { X: *X, Z: *Z }
    }

    pub const fn from_x_coord(X: &Fq) -> Self {
        Self { X: *X, Z: Fq::ONE }
    }

    pub fn coords(&self) -> (Fq, Fq) {
        (self.X, self.Z)
    }

    /// `0xFFFFFFFF` for the point at infinity, `0` otherwise.
    pub fn is_zero(&self) -> u32 {
        self.Z.is_zero()
    }

    /// The affine coordinate X/Z. Meaningless at infinity.
    pub fn x(&self) -> Fq {
        self.X / self.Z
    }

    /// `0xFFFFFFFF` when both points are at infinity or share the same
    /// affine x, `0` otherwise.
    pub fn equals(&self, rhs: &PointX<Fq>) -> u32 {
        let lz = self.is_zero();
        let rz = rhs.is_zero();
        let same_x = (self.X * rhs.Z).equals(&(rhs.X * self.Z));
        (lz & rz) | (!lz & !rz & same_x)
    }

    #[inline]
    pub fn condswap(P: &mut Self, Q: &mut Self, ctl: u32) {
        Fq::condswap(&mut P.X, &mut Q.X, ctl);
        Fq::condswap(&mut P.Z, &mut Q.Z, ctl);
    }

    /// Bring every point to Z = 1 using one shared inversion.
    pub fn batch_normalise(points: &mut [Self]) {
        let mut inv_z: Vec<Fq> = points.iter().map(|P| P.Z).collect();
        Fq::batch_invert(&mut inv_z);
        for (P, iz) in points.iter_mut().zip(inv_z) {
            P.X *= iz;
            P.Z = Fq::ONE;
        }
    }
}
