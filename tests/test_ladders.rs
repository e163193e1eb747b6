#![allow(non_snake_case)]

#[cfg(test)]
mod test_ladders {
    use fp2::traits::Fp as _;
    use rand_core::RngCore;
    use sidh_harness::elliptic::basis::BasisX;
    use sidh_harness::elliptic::curve::Curve;
    use sidh_harness::elliptic::point::PointX;
    use sidh_harness::elliptic::two_isogeny_chain::two_isogeny_chain;
    use sidh_harness::fields::sike::{SikeP434, SikeP503 as Fp2};
    use sidh_harness::protocols::sidh_parameters::p434;
    use sidh_harness::utilities::drng::DRNG;

    fn starting_curve() -> Curve<Fp2> {
        Curve::new(&Fp2::THREE.mul2())
    }

    #[test]
    fn test_mul() {
        let mut rng = DRNG::from_seed("test_mul".as_bytes());
        let E = starting_curve();

        let mut scalar = [0u8; 32];
        rng.fill_bytes(&mut scalar);

        // Bits above the given length are ignored
        for nbits in (236..=256).rev() {
            let P = E.rand_point(&mut rng);
            let Q = E.mul(&P, &scalar, nbits);
            let xQ = E.xmul(&P.to_point_x(), &scalar, nbits);
            assert!(xQ.equals(&Q.to_point_x()) == u32::MAX);
        }
    }

    #[test]
    fn test_mul_edge_cases() {
        let mut rng = DRNG::from_seed("test_mul_edge_cases".as_bytes());
        let E = starting_curve();
        let xP = E.rand_point(&mut rng).to_point_x();

        assert!(E.xmul(&xP, &[0xFF], 0).is_zero() == u32::MAX);
        assert!(E.xmul(&xP, &[1], 1).equals(&xP) == u32::MAX);

        // (0, 0) has order two
        let T = PointX::from_x_coord(&Fp2::ZERO);
        assert!(E.xmul(&T, &[3], 2).equals(&T) == u32::MAX);
        assert!(E.xmul(&T, &[2], 2).is_zero() == u32::MAX);
    }

    #[test]
    fn test_3pt_ladder() {
        let mut rng = DRNG::from_seed("test_3pt_ladder".as_bytes());
        let E = starting_curve();

        let mut scalar = [0u8; 32];
        rng.fill_bytes(&mut scalar);

        for nbits in (236..=256).rev() {
            let P = E.rand_point(&mut rng);
            let Q = E.rand_point(&mut rng);
            let PQ = E.sub(&P, &Q);
            let PnQ = E.add(&P, &E.mul(&Q, &scalar, nbits));

            let basis = BasisX::from_array([P.to_point_x(), Q.to_point_x(), PQ.to_point_x()]);
            let xPnQ = E.three_point_ladder(&basis, &scalar, nbits);
            assert!(xPnQ.equals(&PnQ.to_point_x()) == u32::MAX);
        }

        // A zero length scalar leaves P
        let P = E.rand_point(&mut rng);
        let Q = E.rand_point(&mut rng);
        let basis = BasisX::from_array([P.to_point_x(), Q.to_point_x(), E.sub(&P, &Q).to_point_x()]);
        assert!(E.three_point_ladder(&basis, &scalar, 0).equals(&basis.P) == u32::MAX);
    }

    #[test]
    fn test_xdbl_xtpl() {
        let mut rng = DRNG::from_seed("test_xdbl_xtpl".as_bytes());
        let E = starting_curve();

        for _ in 0..10 {
            let P = E.rand_point(&mut rng);
            let xP = P.to_point_x();

            assert!(E.xdbl(&xP).equals(&E.double(&P).to_point_x()) == u32::MAX);
            assert!(E.xtpl(&xP).equals(&E.triple(&P).to_point_x()) == u32::MAX);
            assert!(E.xmul_2e(&xP, 5).equals(&E.double_iter(&P, 5).to_point_x()) == u32::MAX);
            assert!(E.xmul_3e(&xP, 4).equals(&E.triple_iter(&P, 4).to_point_x()) == u32::MAX);
        }
    }

    #[test]
    fn test_curve_from_basis() {
        let mut rng = DRNG::from_seed("test_curve_from_basis".as_bytes());

        // Some curve other than the starting one
        let A = Fp2::THREE.mul2() + Fp2::rand(&mut rng);
        let E = Curve::new(&A);

        let P = E.rand_point(&mut rng);
        let Q = E.rand_point(&mut rng);
        let PQ = E.sub(&P, &Q);

        let basis = BasisX::from_array([P.to_point_x(), Q.to_point_x(), PQ.to_point_x()]);
        let (xP, xQ, xPQ) = basis.x_coords();
        assert!(E.is_on_curve(&xP) == u32::MAX);

        let (E_test, check) = Curve::from_basis_x(&xP, &xQ, &xPQ);
        assert!(check == u32::MAX);
        assert!(E_test.A.equals(&E.A) == u32::MAX);

        // A zero coordinate has no curve
        let (_, check) = Curve::from_basis_x(&Fp2::ZERO, &xQ, &xPQ);
        assert!(check == 0);
    }

    #[test]
    fn test_singular_curve() {
        let (_, check) = Curve::try_new(&Fp2::TWO);
        assert!(check == 0);
        let (_, check) = Curve::try_new(&-Fp2::TWO);
        assert!(check == 0);
        let (_, check) = Curve::try_new(&Fp2::THREE.mul2());
        assert!(check == u32::MAX);
    }

    #[test]
    fn test_two_isogeny_chain() {
        let params = p434::parameters();
        let E = Curve::new(&SikeP434::THREE.mul2());
        let ea = params.ea();
        let B = params.two_torsion();

        // Kernel P + [s]Q with s = 5, pushing the 3-torsion along
        let ker = E.three_point_ladder(B, &[5], 3);
        let mut images = params.three_torsion().to_array();
        let (E_img, check) = two_isogeny_chain(&E, &ker, ea, &mut images);
        assert!(check == u32::MAX);
        assert!(E_img.j_invariant().equals(&E.j_invariant()) == 0);

        // The images keep full 3^eb order on the codomain
        let eb = params.eb();
        for P in images {
            let T = E_img.xmul_3e(&P, eb - 1);
            assert!(T.is_zero() == 0);
            assert!(E_img.xtpl(&T).is_zero() == u32::MAX);
        }

        // Too long a chain for the kernel order
        let mut none: [PointX<SikeP434>; 0] = [];
        let (_, check) = two_isogeny_chain(&E, &ker, ea + 1, &mut none);
        assert!(check == 0);

        // Q itself walks into (0, 0)
        let (_, check) = two_isogeny_chain(&E, &B.Q, ea, &mut none);
        assert!(check == 0);
    }
}
