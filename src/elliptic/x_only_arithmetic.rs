use fp2::traits::Fp as FqTrait;

use super::{basis::BasisX, curve::Curve, point::PointX};

/// Bit i of the little endian scalar n, as an all-ones or all-zeros mask.
#[inline(always)]
fn bit_mask(n: &[u8], i: usize) -> u32 {
    (((n[i >> 3] >> (i & 7)) as u32) & 1).wrapping_neg()
}

impl<Fq: FqTrait> Curve<Fq> {
    /// (X : Z) <- [2](X : Z)
    #[inline(always)]
    fn xdbl_coords(self, X: &mut Fq, Z: &mut Fq) {
        let mut V1 = (*X + *Z).square();
        let V2 = (*X - *Z).square();
        *X = V1 * V2;
        V1 -= V2;
        *Z = V1;
        *Z *= self.A24;
        *Z += V2;
        *Z *= V1;
    }

    pub fn xdbl(self, P: &PointX<Fq>) -> PointX<Fq> {
        let (mut X, mut Z) = P.coords();
        self.xdbl_coords(&mut X, &mut Z);
        PointX::new(&X, &Z)
    }

    /// Differential addition: (XQ : ZQ) <- x(P + Q) from x(P), x(Q) and
    /// the difference (XPQ : ZPQ) = x(P - Q).
    #[inline(always)]
    fn xadd_coords(XPQ: &Fq, ZPQ: &Fq, XP: &Fq, ZP: &Fq, XQ: &mut Fq, ZQ: &mut Fq) {
        let V1 = (*XP - *ZP) * (*XQ + *ZQ);
        let V2 = (*XP + *ZP) * (*XQ - *ZQ);
        *XQ = *ZPQ * (V1 + V2).square();
        *ZQ = *XPQ * (V1 - V2).square();
    }

    /// x(P + Q) given x(P), x(Q) and x(P - Q).
    pub fn xadd(P: &PointX<Fq>, Q: &PointX<Fq>, PQ: &PointX<Fq>) -> PointX<Fq> {
        let (mut X, mut Z) = Q.coords();
        Self::xadd_coords(&PQ.X, &PQ.Z, &P.X, &P.Z, &mut X, &mut Z);
        PointX::new(&X, &Z)
    }

    /// P3 <- [n]P with a Montgomery ladder over the low `nbitlen` bits of
    /// the little endian `n`. Constant time in the bits of n.
    pub fn xmul_into(self, P3: &mut PointX<Fq>, P: &PointX<Fq>, n: &[u8], nbitlen: usize) {
        let (mut X0, mut Z0) = PointX::<Fq>::INFINITY.coords();
        let (mut X1, mut Z1) = P.coords();
        let mut cc = 0u32;
        for i in (0..nbitlen).rev() {
            let ctl = bit_mask(n, i);
            Fq::condswap(&mut X0, &mut X1, ctl ^ cc);
            Fq::condswap(&mut Z0, &mut Z1, ctl ^ cc);
            Self::xadd_coords(&P.X, &P.Z, &X0, &Z0, &mut X1, &mut Z1);
            self.xdbl_coords(&mut X0, &mut Z0);
            cc = ctl;
        }
        Fq::condswap(&mut X0, &mut X1, cc);
        Fq::condswap(&mut Z0, &mut Z1, cc);

        // For P = (0, 0) the differential addition always yields Z = 0,
        // so an odd n would wrongly land on infinity
        let odd = if nbitlen == 0 { 0 } else { bit_mask(n, 0) };
        let order_two = P.X.is_zero() & !P.Z.is_zero() & odd;
        P3.X = X0;
        P3.Z = Z0;
        P3.X.set_cond(&Fq::ZERO, order_two);
        P3.Z.set_cond(&Fq::ONE, order_two);
    }

    pub fn xmul(self, P: &PointX<Fq>, n: &[u8], nbitlen: usize) -> PointX<Fq> {
        let mut P3 = PointX::INFINITY;
        self.xmul_into(&mut P3, P, n, nbitlen);
        P3
    }

    /// [2^e]P
    pub fn xmul_2e(self, P: &PointX<Fq>, e: usize) -> PointX<Fq> {
        let (mut X, mut Z) = P.coords();
        for _ in 0..e {
            self.xdbl_coords(&mut X, &mut Z);
        }
        PointX::new(&X, &Z)
    }

    /// [3]P as [2]P + P, using P itself as the difference.
    pub fn xtpl(self, P: &PointX<Fq>) -> PointX<Fq> {
        let P2 = self.xdbl(P);
        Self::xadd(&P2, P, P)
    }

    /// [3^e]P
    pub fn xmul_3e(self, P: &PointX<Fq>, e: usize) -> PointX<Fq> {
        (0..e).fold(*P, |Q, _| self.xtpl(&Q))
    }

    /// Combined step: (XP : ZP) <- [2]P and (XQ : ZQ) <- P + Q, where
    /// (XQP : ZQP) = x(Q - P).
    #[inline(always)]
    fn xdbladd(self, XP: &mut Fq, ZP: &mut Fq, XQ: &mut Fq, ZQ: &mut Fq, XQP: &Fq, ZQP: &Fq) {
        let mut t0 = *XP + *ZP;
        let mut t1 = *XP - *ZP;
        let mut X2P = t0.square();
        let mut t2 = *XQ - *ZQ;
        let mut XPQ = *XQ + *ZQ;
        t0 *= t2;
        let mut Z2P = t1.square();
        t1 *= XPQ;
        t2 = X2P - Z2P;
        X2P *= Z2P;
        XPQ = self.A24 * t2;
        let mut ZPQ = t0 - t1;
        Z2P = XPQ + Z2P;
        XPQ = t0 + t1;
        Z2P *= t2;
        ZPQ = ZPQ.square();
        XPQ = XPQ.square();
        ZPQ *= *XQP;
        XPQ *= *ZQP;

        *XP = X2P;
        *ZP = Z2P;
        *XQ = XPQ;
        *ZQ = ZPQ;
    }

    /// x(P + [n]Q) from the basis x(P), x(Q), x(P - Q), reading the low
    /// `nbitlen` bits of the little endian `n`. This computes the kernel
    /// generator of every SIDH secret isogeny.
    pub fn three_point_ladder(self, B: &BasisX<Fq>, n: &[u8], nbitlen: usize) -> PointX<Fq> {
        // R0 runs through [2^i]Q, R1 and R2 through P + [n mod 2^i]Q and
        // its difference with R0
        let (mut X0, mut Z0) = B.Q.coords();
        let (mut X1, mut Z1) = B.P.coords();
        let (mut X2, mut Z2) = B.PQ.coords();

        let mut cc = 0u32;
        for i in 0..nbitlen {
            let ctl = bit_mask(n, i);
            Fq::condswap(&mut X1, &mut X2, ctl ^ cc);
            Fq::condswap(&mut Z1, &mut Z2, ctl ^ cc);
            self.xdbladd(&mut X0, &mut Z0, &mut X2, &mut Z2, &X1, &Z1);
            cc = ctl;
        }
        Fq::condswap(&mut X1, &mut X2, cc);
        Fq::condswap(&mut Z1, &mut Z2, cc);

        PointX::new(&X1, &Z1)
    }
}
