use super::basis::BasisX;
use super::curve::Curve;
use super::projective_point::Point;

use fp2::traits::Fp as FqTrait;

/// Deterministic sequence of x-coordinates x_k = k + i for k = 1, 2, ...
/// with i a fixed square root of -1 in GF(p^2).
struct CandidateX<Fq: FqTrait> {
    next: Fq,
}

impl<Fq: FqTrait> CandidateX<Fq> {
    fn new() -> Self {
        let mut i = -Fq::ONE;
        // p = 3 mod 4, so -1 is always a square in GF(p^2)
        i.set_sqrt();
        Self { next: i + Fq::ONE }
    }

    fn next_x(&mut self) -> Fq {
        let x = self.next;
        self.next += Fq::ONE;
        x
    }
}

impl<Fq: FqTrait> Curve<Fq> {
    /// Walk the candidate x-coordinates and return the first point P of
    /// order exactly ell^e together with T = [ell^(e-1)]P. The point T must
    /// have an x-coordinate different from `avoid` when it is given, so that
    /// P generates a different cyclic subgroup.
    fn full_order_point<C, M>(
        self,
        clear_cofactor: C,
        to_order_ell: M,
        avoid: Option<&Point<Fq>>,
    ) -> (Point<Fq>, Point<Fq>)
    where
        C: Fn(&Point<Fq>) -> Point<Fq>,
        M: Fn(&Point<Fq>) -> Point<Fq>,
    {
        let mut candidates = CandidateX::new();
        loop {
            let x = candidates.next_x();
            let (lift, check) = self.lift_point(&x);
            if check != u32::MAX {
                continue;
            }
            let P = clear_cofactor(&lift);
            let T = to_order_ell(&P);
            if T.is_zero() == u32::MAX {
                continue;
            }
            if let Some(U) = avoid {
                if (T.X * U.Z).equals(&(U.X * T.Z)) == u32::MAX {
                    continue;
                }
            }
            return (P, T);
        }
    }

    /// Given full points P and Q, return the affine x-only basis
    /// x(P), x(Q), x(P - Q).
    fn basis_from_full_points(self, P: &Point<Fq>, Q: &Point<Fq>) -> BasisX<Fq> {
        let PQ = self.sub(P, Q);
        let basis = BasisX::from_array([P.to_point_x(), Q.to_point_x(), PQ.to_point_x()]);
        let (xP, xQ, xPQ) = basis.x_coords();
        BasisX::from_x_coords(&xP, &xQ, &xPQ)
    }

    /// Compute a basis of E\[2^ea\] where the curve has
    /// E(GF(p^2)) = (Z/(2^ea * 3^eb)Z)^2.
    ///
    /// The basis (P, Q) is chosen such that [2^(ea-1)]Q = (0, 0), which
    /// ensures no kernel of the form P + [s]Q ever reaches (0 : 1) while
    /// walking a 2-isogeny chain.
    pub fn torsion_basis_2e(self, ea: usize, eb: usize) -> BasisX<Fq> {
        let clear = |pt: &Point<Fq>| self.triple_iter(pt, eb);
        let to_two = |pt: &Point<Fq>| self.double_iter(pt, ea - 1);

        let (P, TP) = self.full_order_point(clear, to_two, None);
        let (R, TR) = self.full_order_point(clear, to_two, Some(&TP));

        // Pick Q such that [2^(ea-1)]Q = (0, 0)
        let (P, Q) = if TR.X.is_zero() == u32::MAX {
            (P, R)
        } else if TP.X.is_zero() == u32::MAX {
            (R, P)
        } else {
            // TP + TR is the remaining point of order two, which is (0, 0)
            (P, self.add(&P, &R))
        };

        self.basis_from_full_points(&P, &Q)
    }

    /// Compute a basis of E\[3^eb\] where the curve has
    /// E(GF(p^2)) = (Z/(2^ea * 3^eb)Z)^2.
    pub fn torsion_basis_3e(self, ea: usize, eb: usize) -> BasisX<Fq> {
        let clear = |pt: &Point<Fq>| self.double_iter(pt, ea);
        let to_three = |pt: &Point<Fq>| self.triple_iter(pt, eb - 1);

        let (P, TP) = self.full_order_point(clear, to_three, None);
        let (Q, _) = self.full_order_point(clear, to_three, Some(&TP));

        self.basis_from_full_points(&P, &Q)
    }
}
