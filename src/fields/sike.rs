// TODO: the fp2 field macro expands to functions with too many arguments for clippy; silence it upstream.
#![allow(clippy::too_many_arguments)]

// NIST lvl 1 SIKE prime: p = 2^216 * 3^137 - 1
// SikeP434: a finite field element GF(p^2) with modulus x^2 + 1.
pub const SIKE_P434_MODULUS: [u64; 7] = [
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFDC1767AE2FFFFFF,
    0x7BC65C783158AEA3,
    0x6CFC5FD681C52056,
    0x0002341F27177344,
];

// NIST lvl 2 SIKE prime: p = 2^250 * 3^159 - 1
pub const SIKE_P503_MODULUS: [u64; 8] = [
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xABFFFFFFFFFFFFFF,
    0x13085BDA2211E7A0,
    0x1B9BF6C87B7E7DAF,
    0x6045C6BDDA77A4D0,
    0x004066F541811E1E,
];

// NIST lvl 3 SIKE prime: p = 2^305 * 3^192 - 1
pub const SIKE_P610_MODULUS: [u64; 10] = [
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0x6E01FFFFFFFFFFFF,
    0xB1784DE8AA5AB02E,
    0x9AE7BF45048FF9AB,
    0xB255B2FA10C4252A,
    0x819010C251E7D88C,
    0x000000027BF6A768,
];

// NIST lvl 5 SIKE prime: p = 2^372 * 3^239 - 1
pub const SIKE_P751_MODULUS: [u64; 12] = [
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF,
    0xEEAFFFFFFFFFFFFF,
    0xE3EC968549F878A8,
    0xDA959B1A13F7CC76,
    0x084E9867D6EBE876,
    0x8562B5045CB25748,
    0x0E12909F97BADC66,
    0x00006FE5D541F71C,
];

fp2::define_fp2_from_modulus!(
    typename = SikeP434,
    base_typename = SikeP434Base,
    modulus = SIKE_P434_MODULUS,
);

fp2::define_fp2_from_modulus!(
    typename = SikeP503,
    base_typename = SikeP503Base,
    modulus = SIKE_P503_MODULUS,
);

fp2::define_fp2_from_modulus!(
    typename = SikeP610,
    base_typename = SikeP610Base,
    modulus = SIKE_P610_MODULUS,
);

fp2::define_fp2_from_modulus!(
    typename = SikeP751,
    base_typename = SikeP751Base,
    modulus = SIKE_P751_MODULUS,
);
