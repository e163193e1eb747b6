use super::point::PointX;
use fp2::traits::Fp as FqTrait;

/// The x-only images of a torsion basis: x(P), x(Q) and x(P - Q).
#[derive(Clone, Copy, Debug)]
pub struct BasisX<Fq: FqTrait> {
    pub P: PointX<Fq>,
    pub Q: PointX<Fq>,
    pub PQ: PointX<Fq>,
}

impl<Fq: FqTrait> BasisX<Fq> {
    pub const fn from_x_coords(xP: &Fq, xQ: &Fq, xPQ: &Fq) -> Self {
        Self {
            P: PointX::from_x_coord(xP),
            Q: PointX::from_x_coord(xQ),
            PQ: PointX::from_x_coord(xPQ),
        }
    }

    pub fn from_array([P, Q, PQ]: [PointX<Fq>; 3]) -> Self {
        Self { P, Q, PQ }
    }

    pub fn to_array(&self) -> [PointX<Fq>; 3] {
        [self.P, self.Q, self.PQ]
    }

    /// Affine (xP, xQ, xPQ), sharing a single inversion.
    pub fn x_coords(&self) -> (Fq, Fq, Fq) {
        let mut points = self.to_array();
        PointX::batch_normalise(&mut points);
        let [P, Q, PQ] = points;
        (P.X, Q.X, PQ.X)
    }
}
