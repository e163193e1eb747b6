use super::projective_point::Point;
use fp2::traits::Fp as FqTrait;
use rand_core::{CryptoRng, RngCore};

/// The Montgomery curve y^2 = x^3 + A*x^2 + x. Every curve met by SIDH
/// takes this form, from the starting curve A = 6 down the isogeny walks.
#[derive(Clone, Copy, Debug)]
pub struct Curve<Fq: FqTrait> {
    pub A: Fq,   // A
    pub A24: Fq, // (A+2)/4
}

impl<Fq: FqTrait> Curve<Fq> {
    /// Panics when A^2 = 4. Only for constants known to be valid.
    pub fn new(A: &Fq) -> Self {
        let (curve, check) = Self::try_new(A);
        assert!(check == u32::MAX);
        curve
    }

    /// The curve with a `0xFFFFFFFF` mask when A^2 != 4. On a zero mask
    /// the curve is singular and must be discarded.
    pub fn try_new(A: &Fq) -> (Self, u32) {
        let a = *A;
        let check = !a.equals(&<Fq>::TWO) & !(a + <Fq>::TWO).is_zero();
        let curve = Self {
            A: a,
            A24: (a + <Fq>::TWO) / <Fq>::FOUR,
        };
        (curve, check)
    }

    /// Recover the Montgomery coefficient from the affine x-coordinates
    /// x(P), x(Q) and x(P - Q) of two points on the curve:
    /// A = (1 - xP*xQ - xP*xR - xQ*xR)^2 / (4*xP*xQ*xR) - xP - xQ - xR
    pub fn from_basis_x(xP: &Fq, xQ: &Fq, xR: &Fq) -> (Self, u32) {
        let t0 = (*xP) * (*xQ);
        let mut num = <Fq>::ONE - t0 - ((*xP) + (*xQ)) * (*xR);
        num.set_square();
        let mut den = t0 * (*xR);
        den.set_mul2();
        den.set_mul2();
        let den_ok = !den.is_zero();

        let A = num / den - (*xP) - (*xQ) - (*xR);
        let (curve, check) = Self::try_new(&A);
        (curve, check & den_ok)
    }

    /// Compute the j-invariant j = 256 * (A^2 - 3)^3 / (A^2 - 4)
    pub fn j_invariant(&self) -> Fq {
        let A2 = self.A.square();
        let t = A2 - <Fq>::THREE;
        let mut num = t.square() * t;

        // 256 = 2^8
        let mut c = <Fq>::TWO;
        c.set_square();
        c.set_square();
        c.set_square();
        num *= c;

        num / (A2 - <Fq>::FOUR)
    }

    /// `0xFFFFFFFF` when some point of E(GF(p^2)) has abscissa x.
    pub fn is_on_curve(&self, x: &Fq) -> u32 {
        self.rhs(x).is_square()
    }

    /// x^3 + A*x^2 + x, in Horner form.
    #[inline]
    fn rhs(&self, x: &Fq) -> Fq {
        ((*x + self.A) * (*x) + <Fq>::ONE) * (*x)
    }

    /// One of the two points above x, with a `0xFFFFFFFF` mask when x is
    /// on the curve.
    pub fn lift_point(self, x: &Fq) -> (Point<Fq>, u32) {
        let mut y = self.rhs(x);
        let check = y.set_sqrt();
        (Point::new(x, &y, &<Fq>::ONE), check)
    }

    pub fn rand_point<R: CryptoRng + RngCore>(self, rng: &mut R) -> Point<Fq> {
        loop {
            let x = Fq::rand(rng);
            let (P, check) = self.lift_point(&x);
            if check == u32::MAX {
                return P;
            }
        }
    }

    /// Complete projective addition P3 = P1 + P2, including the doubling
    /// case and either input at infinity.
    pub fn add_into(self, P3: &mut Point<Fq>, P1: &Point<Fq>, P2: &Point<Fq>) {
        // With slope L/T, where T = 0 and L = 0 means P1 = P2:
        //   U  = Z1*Z2*L^2 - (X1*Z2 + X2*Z1 + A*Z1*Z2)*T^2
        //   P3 = (U*T : L*(X1*Z2*T^2 - U) - Y1*Z2*T^3 : Z1*Z2*T^3)
        // P1 = -P2 gives T = 0 with L != 0, hence Z3 = 0.

        // T = X2*Z1 - X1*Z2
        // L = Y2*Z1 - Y1*Z2
        let x1z2 = P1.X * P2.Z;
        let x2z1 = P2.X * P1.Z;
        let mut T = x2z1 - x1z2;
        let y1z2 = P1.Y * P2.Z;
        let y2z1 = P2.Y * P1.Z;
        let mut L = y2z1 - y1z2;

        // Alternate (T,L) for doubling:
        //   Td = 2*Y1*Z1
        //   Ld = 3*X1^2 + 2*A*X1*Z1 + Z1^2
        let dbl = T.is_zero() & L.is_zero();
        let Td = (P1.Y * P1.Z).mul2();
        let x1x1 = P1.X.square();
        let z1z1 = P1.Z.square();
        let dx1z1 = (P1.X + P1.Z).square() - x1x1 - z1z1;
        let Ld = x1x1 + x1x1.mul2() + z1z1 + self.A * dx1z1;
        T.set_cond(&Td, dbl);
        L.set_cond(&Ld, dbl);

        // U = L^2*Z1*Z2 - (X1*Z2 + X2*Z1 + A*Z1*Z2)*T^2
        let T2 = T.square();
        let T3 = T * T2;
        let z1z2 = P1.Z * P2.Z;
        let U = (L.square() * z1z2) - ((x1z2 + x2z1 + (self.A * z1z2)) * T2);

        // X3 = U*T
        // Y3 = L*(X1*Z2*T^2 - U) - Y1*Z2*T^3
        // Z3 = Z1*Z2*T^3
        P3.X = U * T;
        P3.Y = (L * ((x1z2 * T2) - U)) - (y1z2 * T3);
        P3.Z = z1z2 * T3;

        // Either input at infinity
        let inf1 = P1.Z.is_zero();
        let inf2 = P2.Z.is_zero();
        P3.set_cond(P2, inf1);
        P3.set_cond(P1, inf2);
    }

    pub fn add(self, P1: &Point<Fq>, P2: &Point<Fq>) -> Point<Fq> {
        let mut P3 = Point::INFINITY;
        self.add_into(&mut P3, P1, P2);
        P3
    }

    pub fn sub(self, P1: &Point<Fq>, P2: &Point<Fq>) -> Point<Fq> {
        let mut nP2 = *P2;
        nP2.set_neg();
        self.add(P1, &nP2)
    }

    #[inline(always)]
    pub fn double_from_coords(self, X: &Fq, Y: &Fq, Z: &Fq) -> (Fq, Fq, Fq) {
        // Complete, 6M + 6S. With V = X^2 - Z^2 and M = X^2 + Z^2:
        //   (2YZ*V^2 : V*(M*(M + 2AXZ) + 4X^2Z^2) : 8(YZ)^3)
        let xx = X.square();
        let zz = Z.square();
        let dxz = ((*X) + (*Z)).square() - xx - zz;
        let dyz = ((*Y) * (*Z)).mul2();
        let v = xx - zz;
        let m = xx + zz;
        let X2 = dyz * v.square();
        let Y2 = v * ((m * (m + (self.A * dxz))) + dxz.square());
        let Z2 = dyz * dyz.square();

        (X2, Y2, Z2)
    }

    pub fn double(self, P: &Point<Fq>) -> Point<Fq> {
        let (X2, Y2, Z2) = self.double_from_coords(&P.X, &P.Y, &P.Z);
        Point::new(&X2, &Y2, &Z2)
    }

    /// [2^n]P
    pub fn double_iter(self, P: &Point<Fq>, n: usize) -> Point<Fq> {
        let mut P3 = *P;
        for _ in 0..n {
            P3 = self.double(&P3);
        }
        P3
    }

    pub fn triple(self, P: &Point<Fq>) -> Point<Fq> {
        let P2 = self.double(P);
        self.add(&P2, P)
    }

    /// [3^n]P
    pub fn triple_iter(self, P: &Point<Fq>, n: usize) -> Point<Fq> {
        let mut P3 = *P;
        for _ in 0..n {
            P3 = self.triple(&P3);
        }
        P3
    }

    /// [n]P by double-and-add over the low `nbitlen` bits of the little
    /// endian `n`. Branches on the bits of n, so public scalars only.
    pub fn mul(self, P: &Point<Fq>, n: &[u8], nbitlen: usize) -> Point<Fq> {
        let mut R = Point::INFINITY;
        for i in (0..nbitlen).rev() {
            R = self.double(&R);
            if (n[i >> 3] >> (i & 7)) & 1 == 1 {
                R = self.add(&R, P);
            }
        }
        R
    }
}
