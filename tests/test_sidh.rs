#![allow(non_snake_case)]

#[cfg(test)]
mod test_sidh {
    use fp2::traits::Fp as _;
    use sidh_harness::protocols::sidh::{SidhAlicePublicKey, SidhError, SidhParameters};
    use sidh_harness::protocols::sidh_parameters::{ParameterSetId, p434, p503, p610, p751};
    use sidh_harness::utilities::drng::DRNG;
    use sidh_harness::utilities::le_bytes::{le_bytes_bit_length, le_bytes_small_power};

    #[test]
    fn test_key_exchange() {
        let mut rng = DRNG::from_seed("sidh_key_exchange".as_bytes());
        let params = p434::parameters();

        // Test 5 different public key pairs.
        for _ in 0..5 {
            let (alice_pub, alice_priv) = params.keygen_alice(&mut rng).unwrap();
            let (bob_pub, bob_priv) = params.keygen_bob(&mut rng).unwrap();

            let alice_secret = alice_priv.shared_secret(&bob_pub).unwrap();
            let bob_secret = bob_priv.shared_secret(&alice_pub).unwrap();
            assert!(alice_secret.equals(&bob_secret) == u32::MAX);
        }
    }

    #[test]
    fn test_public_key_from_x_coords() {
        let mut rng = DRNG::from_seed("sidh_public_key_from_x".as_bytes());
        let params = p434::parameters();

        let (alice_pub, _) = params.keygen_alice(&mut rng).unwrap();
        let (_, bob_priv) = params.keygen_bob(&mut rng).unwrap();

        // The curve recovered from the torsion images is the codomain itself
        let (xP, xQ, xPQ) = alice_pub.x_coords();
        let recovered = SidhAlicePublicKey::from_x_coords(&xP, &xQ, &xPQ).unwrap();
        assert!(recovered.curve().A.equals(&alice_pub.curve().A) == u32::MAX);

        let s1 = bob_priv.shared_secret(&alice_pub).unwrap();
        let s2 = bob_priv.shared_secret(&recovered).unwrap();
        assert!(s1.equals(&s2) == u32::MAX);
    }

    #[test]
    fn test_secret_bit_lengths() {
        let expected = [
            (ParameterSetId::P434, 216, 217),
            (ParameterSetId::P503, 250, 252),
            (ParameterSetId::P610, 305, 304),
            (ParameterSetId::P751, 372, 378),
        ];
        for (id, alice_bits, bob_bits) in expected {
            let ea = [p434::EA, p503::EA, p610::EA, p751::EA][id.index()];
            let eb = [p434::EB, p503::EB, p610::EB, p751::EB][id.index()];
            assert_eq!(ea, alice_bits);

            // Only the scalar sizes are needed here, so skip the torsion bases
            let bob = le_bytes_bit_length(&le_bytes_small_power(3, eb)) - 1;
            assert_eq!(bob, bob_bits);

            let lengths = id.lengths();
            assert_eq!((alice_bits + 7) / 8, lengths.private_key_a);
            assert_eq!((bob_bits + 7) / 8, lengths.private_key_b);
        }

        let params = p434::parameters();
        assert_eq!(params.alice_bits(), 216);
        assert_eq!(params.bob_bits(), 217);
        assert_eq!(params.alice_secret_len(), 27);
        assert_eq!(params.bob_secret_len(), 28);
    }

    #[test]
    fn test_private_key_out_of_range() {
        let params = p434::parameters();

        // Bit 217 is above Bob's 217-bit range
        let mut scalar = [0u8; 28];
        scalar[27] = 0x02;
        assert_eq!(
            params.bob_private_key(&scalar).unwrap_err(),
            SidhError::InvalidPrivateKey
        );
        scalar[27] = 0x01;
        assert!(params.bob_private_key(&scalar).is_ok());

        // Wrong length
        assert_eq!(
            params.alice_private_key(&[0u8; 26]).unwrap_err(),
            SidhError::InvalidPrivateKey
        );
    }

    #[test]
    fn test_degenerate_public_key() {
        let params = p434::parameters();
        let mut rng = DRNG::from_seed("sidh_degenerate_public_key".as_bytes());
        let (_, bob_priv) = params.keygen_bob(&mut rng).unwrap();

        // x(P) = 0 makes the curve recovery divide by zero
        let xQ = params.two_torsion().Q.x();
        let xPQ = params.two_torsion().PQ.x();
        let zero = p434::Fq::ZERO;
        let err = SidhAlicePublicKey::from_x_coords(&zero, &xQ, &xPQ).unwrap_err();
        assert_eq!(err, SidhError::InvalidPublicKey);

        // A well formed curve whose points have the wrong order fails in the chain
        let E0 = SidhParameters::<p434::Fq>::starting_curve();
        let (xP, xQ, xPQ) = params.two_torsion().x_coords();
        let public_key = SidhAlicePublicKey::from_x_coords(&xP, &xQ, &xPQ).unwrap();
        assert!(public_key.curve().A.equals(&E0.A) == u32::MAX);
        assert_eq!(
            bob_priv.shared_secret(&public_key).unwrap_err(),
            SidhError::IsogenyFailure
        );
    }
}
