use std::marker::PhantomData;

use fp2::traits::Fp as FqTrait;
use rand_core::{CryptoRng, RngCore};
use thiserror::Error;

use crate::elliptic::{
    basis::BasisX, curve::Curve, point::PointX, two_isogeny_chain::two_isogeny_chain,
};
use crate::utilities::le_bytes::{
    bytes_for_bits, le_bytes_bit_length, le_bytes_fits_bits, le_bytes_mask_to_bits,
    le_bytes_small_power,
};

/// Failures of the SIDH operations on well-sized inputs.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SidhError {
    #[error("private key scalar does not fit the expected bit length")]
    InvalidPrivateKey,
    #[error("public key does not encode a valid curve and torsion basis")]
    InvalidPublicKey,
    #[error("isogeny kernel does not have the expected order")]
    IsogenyFailure,
}

/// Public parameters used for a SIDH key exchange.
/// `two_torsion` is the x-only basis for the \[2^ea\] torsion <P2, Q2>
/// `three_torsion` is the x-only basis for the \[3^eb\] torsion <P3, Q3>
/// Alice's scalars have `alice_bits` bits and Bob's `bob_bits` bits.
#[derive(Clone, Copy, Debug)]
pub struct SidhParameters<Fq: FqTrait> {
    ea: usize,
    eb: usize,
    alice_bits: usize,
    bob_bits: usize,
    two_torsion: BasisX<Fq>,
    three_torsion: BasisX<Fq>,
}

/// Alice's SIDH public key contains the codomain of phi_2 : E0 -> E0/<K2> with
/// K2 = P2 + \[s\] * Q2, with P2, Q2 as public parameters and `s` as the scalar
/// stored in `SidhAlicePrivateKey`. Additionally, it contains the images of
/// phi_2(P3), phi_2(Q3) and phi_2(P3 - Q3)
#[derive(Clone, Copy, Debug)]
pub struct SidhAlicePublicKey<Fq: FqTrait> {
    E: Curve<Fq>,
    basis_img: BasisX<Fq>,
}

/// Bob's SIDH public key contains the codomain of phi_3 : E0 -> E0/<K3> with
/// K3 = P3 + \[s\] * Q3, with P3, Q3 as public parameters and `s` as the scalar
/// stored in `SidhBobPrivateKey`. Additionally, it contains the images of
/// phi_3(P2), phi_3(Q2) and phi_3(P2 - Q2)
#[derive(Clone, Copy, Debug)]
pub struct SidhBobPublicKey<Fq: FqTrait> {
    E: Curve<Fq>,
    basis_img: BasisX<Fq>,
}

/// SIDH private key for Alice, a little endian scalar of `nbits` bits.
/// We additionally keep track of the exponent ea for the final isogeny.
#[derive(Clone, Debug)]
pub struct SidhAlicePrivateKey<Fq: FqTrait> {
    exp: usize,
    nbits: usize,
    scalar: Vec<u8>,
    _phantom: PhantomData<Fq>,
}

/// SIDH private key for Bob, a little endian scalar of `nbits` bits.
/// We additionally keep track of the exponent eb for the final isogeny.
#[derive(Clone, Debug)]
pub struct SidhBobPrivateKey<Fq: FqTrait> {
    exp: usize,
    nbits: usize,
    scalar: Vec<u8>,
    _phantom: PhantomData<Fq>,
}

impl<Fq: FqTrait> SidhParameters<Fq> {
    /// Parameters for p = 2^ea * 3^eb - 1, with torsion bases derived
    /// deterministically on the starting curve.
    pub fn new(ea: usize, eb: usize) -> Self {
        let E0 = Self::starting_curve();
        let two_torsion = E0.torsion_basis_2e(ea, eb);
        let three_torsion = E0.torsion_basis_3e(ea, eb);

        // Bob's scalars are sampled below 2^(floor(log2(3^eb))) < 3^eb
        let bob_bits = le_bytes_bit_length(&le_bytes_small_power(3, eb)) - 1;

        Self {
            ea,
            eb,
            alice_bits: ea,
            bob_bits,
            two_torsion,
            three_torsion,
        }
    }

    /// Return the domain E0 : y^2 = x^3 + 6x^2 + x
    pub fn starting_curve() -> Curve<Fq> {
        let A = Fq::THREE.mul2();
        Curve::new(&A)
    }

    pub fn ea(&self) -> usize {
        self.ea
    }

    pub fn eb(&self) -> usize {
        self.eb
    }

    pub fn alice_bits(&self) -> usize {
        self.alice_bits
    }

    pub fn bob_bits(&self) -> usize {
        self.bob_bits
    }

    /// Byte length of Alice's private key.
    pub fn alice_secret_len(&self) -> usize {
        bytes_for_bits(self.alice_bits)
    }

    /// Byte length of Bob's private key.
    pub fn bob_secret_len(&self) -> usize {
        bytes_for_bits(self.bob_bits)
    }

    pub fn two_torsion(&self) -> &BasisX<Fq> {
        &self.two_torsion
    }

    pub fn three_torsion(&self) -> &BasisX<Fq> {
        &self.three_torsion
    }

    /// Fill `out` with a random scalar of `nbits` bits.
    fn sample_scalar_into<R: CryptoRng + RngCore>(rng: &mut R, out: &mut [u8], nbits: usize) {
        rng.fill_bytes(out);
        le_bytes_mask_to_bits(out, nbits);
    }

    /// Fill `out` with a random private scalar for Alice.
    /// `out` must be `alice_secret_len()` bytes long.
    pub fn sample_alice_scalar_into<R: CryptoRng + RngCore>(&self, rng: &mut R, out: &mut [u8]) {
        Self::sample_scalar_into(rng, out, self.alice_bits);
    }

    /// Fill `out` with a random private scalar for Bob.
    /// `out` must be `bob_secret_len()` bytes long.
    pub fn sample_bob_scalar_into<R: CryptoRng + RngCore>(&self, rng: &mut R, out: &mut [u8]) {
        Self::sample_scalar_into(rng, out, self.bob_bits);
    }

    /// Wrap an encoded scalar as Alice's private key, rejecting scalars
    /// wider than Alice's bit length.
    pub fn alice_private_key(&self, scalar: &[u8]) -> Result<SidhAlicePrivateKey<Fq>, SidhError> {
        if scalar.len() != self.alice_secret_len()
            || le_bytes_fits_bits(scalar, self.alice_bits) != u32::MAX
        {
            return Err(SidhError::InvalidPrivateKey);
        }
        Ok(SidhAlicePrivateKey::new(self.ea, self.alice_bits, scalar))
    }

    /// Wrap an encoded scalar as Bob's private key, rejecting scalars
    /// wider than Bob's bit length.
    pub fn bob_private_key(&self, scalar: &[u8]) -> Result<SidhBobPrivateKey<Fq>, SidhError> {
        if scalar.len() != self.bob_secret_len()
            || le_bytes_fits_bits(scalar, self.bob_bits) != u32::MAX
        {
            return Err(SidhError::InvalidPrivateKey);
        }
        Ok(SidhBobPrivateKey::new(self.eb, self.bob_bits, scalar))
    }

    pub fn keygen_alice<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
    ) -> Result<(SidhAlicePublicKey<Fq>, SidhAlicePrivateKey<Fq>), SidhError> {
        let mut scalar = vec![0u8; self.alice_secret_len()];
        self.sample_alice_scalar_into(rng, &mut scalar);
        let secret_key = SidhAlicePrivateKey::new(self.ea, self.alice_bits, &scalar);

        let public_key = secret_key.public_key(self)?;
        Ok((public_key, secret_key))
    }

    pub fn keygen_bob<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
    ) -> Result<(SidhBobPublicKey<Fq>, SidhBobPrivateKey<Fq>), SidhError> {
        let mut scalar = vec![0u8; self.bob_secret_len()];
        self.sample_bob_scalar_into(rng, &mut scalar);
        let secret_key = SidhBobPrivateKey::new(self.eb, self.bob_bits, &scalar);

        let public_key = secret_key.public_key(self)?;
        Ok((public_key, secret_key))
    }
}

impl<Fq: FqTrait> SidhAlicePrivateKey<Fq> {
    pub fn new(exp: usize, nbits: usize, scalar: &[u8]) -> Self {
        Self {
            exp,
            nbits,
            scalar: scalar.to_vec(),
            _phantom: PhantomData,
        }
    }

    /// Compute phi_2 : E0 -> E0/<K2> and phi_2(P3), phi_2(Q3), phi_2(P3 - Q3)
    pub fn public_key(&self, params: &SidhParameters<Fq>) -> Result<SidhAlicePublicKey<Fq>, SidhError> {
        let E = SidhParameters::<Fq>::starting_curve();
        let kernel = E.three_point_ladder(&params.two_torsion, &self.scalar, self.nbits);

        let mut three_torsion_img = params.three_torsion.to_array();
        let (codomain, check) = two_isogeny_chain(&E, &kernel, self.exp, &mut three_torsion_img);
        if check != u32::MAX {
            return Err(SidhError::IsogenyFailure);
        }

        Ok(SidhAlicePublicKey::new(&codomain, &three_torsion_img))
    }

    pub fn shared_secret(&self, public_key: &SidhBobPublicKey<Fq>) -> Result<Fq, SidhError> {
        // K = phi_3(P2) + [s]phi_3(Q2) on E3 = E0/<K3>
        let E = public_key.E;
        let kernel = E.three_point_ladder(&public_key.basis_img, &self.scalar, self.nbits);

        let (codomain, check) = two_isogeny_chain(&E, &kernel, self.exp, &mut []);
        if check != u32::MAX {
            return Err(SidhError::IsogenyFailure);
        }
        Ok(codomain.j_invariant())
    }

    pub fn scalar(&self) -> &[u8] {
        &self.scalar
    }
}

impl<Fq: FqTrait> SidhBobPrivateKey<Fq> {
    pub fn new(exp: usize, nbits: usize, scalar: &[u8]) -> Self {
        Self {
            exp,
            nbits,
            scalar: scalar.to_vec(),
            _phantom: PhantomData,
        }
    }

    /// Compute phi_3 : E0 -> E0/<K3> and phi_3(P2), phi_3(Q2), phi_3(P2 - Q2)
    pub fn public_key(&self, params: &SidhParameters<Fq>) -> Result<SidhBobPublicKey<Fq>, SidhError> {
        let E = SidhParameters::<Fq>::starting_curve();

        let kernel = E.three_point_ladder(&params.three_torsion, &self.scalar, self.nbits);

        let mut two_torsion_img = params.two_torsion.to_array();
        let (codomain, check) = E.three_isogeny_chain(&kernel, self.exp, &mut two_torsion_img);
        if check != u32::MAX {
            return Err(SidhError::IsogenyFailure);
        }

        Ok(SidhBobPublicKey::new(&codomain, &two_torsion_img))
    }

    pub fn shared_secret(&self, public_key: &SidhAlicePublicKey<Fq>) -> Result<Fq, SidhError> {
        // K = phi_2(P3) + [s]phi_2(Q3) on E2 = E0/<K2>
        let E = public_key.E;
        let kernel = E.three_point_ladder(&public_key.basis_img, &self.scalar, self.nbits);

        let (codomain, check) = E.three_isogeny_chain(&kernel, self.exp, &mut []);
        if check != u32::MAX {
            return Err(SidhError::IsogenyFailure);
        }
        Ok(codomain.j_invariant())
    }

    pub fn scalar(&self) -> &[u8] {
        &self.scalar
    }
}

/// Rebuild the curve of a public key from the affine coordinates
/// x(P), x(Q), x(P - Q) of its torsion images.
fn curve_and_basis_from_x<Fq: FqTrait>(
    xP: &Fq,
    xQ: &Fq,
    xPQ: &Fq,
) -> Result<(Curve<Fq>, BasisX<Fq>), SidhError> {
    let (E, check) = Curve::from_basis_x(xP, xQ, xPQ);
    if check != u32::MAX {
        return Err(SidhError::InvalidPublicKey);
    }
    Ok((E, BasisX::from_x_coords(xP, xQ, xPQ)))
}

macro_rules! impl_public_key {
    ($name:ident) => {
        impl<Fq: FqTrait> $name<Fq> {
            pub fn new(E: &Curve<Fq>, basis_img: &[PointX<Fq>; 3]) -> Self {
                Self {
                    E: *E,
                    basis_img: BasisX::from_array(*basis_img),
                }
            }

            /// Recover a public key from the affine x-coordinates of the
            /// torsion images. Fails if they do not determine a
            /// non-singular Montgomery curve.
            pub fn from_x_coords(xP: &Fq, xQ: &Fq, xPQ: &Fq) -> Result<Self, SidhError> {
                let (E, basis_img) = curve_and_basis_from_x(xP, xQ, xPQ)?;
                Ok(Self { E, basis_img })
            }

            /// The affine x-coordinates (xP, xQ, xPQ) of the torsion images.
            pub fn x_coords(&self) -> (Fq, Fq, Fq) {
                self.basis_img.x_coords()
            }

            pub fn curve(&self) -> &Curve<Fq> {
                &self.E
            }
        }
    };
}

impl_public_key!(SidhAlicePublicKey);
impl_public_key!(SidhBobPublicKey);
