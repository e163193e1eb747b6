#[cfg(test)]
mod test_moduli {
    use num_bigint::BigUint;
    use sidh_harness::fields::sike::{
        SIKE_P434_MODULUS, SIKE_P503_MODULUS, SIKE_P610_MODULUS, SIKE_P751_MODULUS,
    };
    use sidh_harness::protocols::sidh_parameters::{p434, p503, p610, p751};

    fn from_limbs(limbs: &[u64]) -> BigUint {
        let bytes: Vec<u8> = limbs.iter().flat_map(|w| w.to_le_bytes()).collect();
        BigUint::from_bytes_le(&bytes)
    }

    fn sike_prime(ea: usize, eb: usize) -> BigUint {
        BigUint::from(2u32).pow(ea as u32) * BigUint::from(3u32).pow(eb as u32) - 1u32
    }

    #[test]
    fn test_sike_moduli() {
        assert_eq!(from_limbs(&SIKE_P434_MODULUS), sike_prime(p434::EA, p434::EB));
        assert_eq!(from_limbs(&SIKE_P503_MODULUS), sike_prime(p503::EA, p503::EB));
        assert_eq!(from_limbs(&SIKE_P610_MODULUS), sike_prime(p610::EA, p610::EB));
        assert_eq!(from_limbs(&SIKE_P751_MODULUS), sike_prime(p751::EA, p751::EB));
    }

    #[test]
    fn test_modulus_bit_lengths() {
        assert_eq!(from_limbs(&SIKE_P434_MODULUS).bits(), 434);
        assert_eq!(from_limbs(&SIKE_P503_MODULUS).bits(), 503);
        assert_eq!(from_limbs(&SIKE_P610_MODULUS).bits(), 610);
        assert_eq!(from_limbs(&SIKE_P751_MODULUS).bits(), 751);
    }
}
