use std::fmt;

use thiserror::Error;

/// Errors raised when looking up a parameter set.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown SIDH parameter set id {0}")]
    NotFound(u32),
}

/// The SIKE parameter sets supported by this crate. The discriminants
/// follow the external SIDH type constants; the even values in between
/// name the compressed variants, which are not provided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum ParameterSetId {
    P434 = 1,
    P503 = 3,
    P610 = 5,
    P751 = 7,
}

impl ParameterSetId {
    /// All parameter sets in catalog order.
    pub const ALL: [ParameterSetId; 4] = [
        ParameterSetId::P434,
        ParameterSetId::P503,
        ParameterSetId::P610,
        ParameterSetId::P751,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ParameterSetId::P434 => "P434",
            ParameterSetId::P503 => "P503",
            ParameterSetId::P610 => "P610",
            ParameterSetId::P751 => "P751",
        }
    }

    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Position of the set in catalog order.
    pub const fn index(self) -> usize {
        match self {
            ParameterSetId::P434 => 0,
            ParameterSetId::P503 => 1,
            ParameterSetId::P610 => 2,
            ParameterSetId::P751 => 3,
        }
    }

    pub fn from_raw(raw: u32) -> Result<Self, CatalogError> {
        Self::ALL
            .into_iter()
            .find(|id| id.raw() == raw)
            .ok_or(CatalogError::NotFound(raw))
    }

    /// Byte lengths of the key material for this set.
    pub const fn lengths(self) -> ParameterSet {
        CATALOG[self.index()]
    }
}

impl fmt::Display for ParameterSetId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Byte lengths of the key material of one SIDH instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParameterSet {
    pub id: ParameterSetId,
    pub private_key_a: usize,
    pub private_key_b: usize,
    pub public_key: usize,
    pub shared_secret: usize,
}

/// Process-wide table of the supported instances, in catalog order.
pub const CATALOG: [ParameterSet; 4] = [
    ParameterSet {
        id: ParameterSetId::P434,
        private_key_a: 27,
        private_key_b: 28,
        public_key: 330,
        shared_secret: 110,
    },
    ParameterSet {
        id: ParameterSetId::P503,
        private_key_a: 32,
        private_key_b: 32,
        public_key: 378,
        shared_secret: 126,
    },
    ParameterSet {
        id: ParameterSetId::P610,
        private_key_a: 39,
        private_key_b: 38,
        public_key: 462,
        shared_secret: 154,
    },
    ParameterSet {
        id: ParameterSetId::P751,
        private_key_a: 47,
        private_key_b: 48,
        public_key: 564,
        shared_secret: 188,
    },
];

/// Look up the byte lengths for a raw parameter set id.
pub fn lengths_for(raw: u32) -> Result<ParameterSet, CatalogError> {
    ParameterSetId::from_raw(raw).map(ParameterSetId::lengths)
}

/// Define a module exposing the byte-level SIDH operations for one
/// field instance. Buffers must already have the catalog lengths.
macro_rules! define_sidh_instance {
    ($module:ident, $id:expr, $field:ty, $ea:expr, $eb:expr) => {
        pub mod $module {
            use std::sync::OnceLock;

            use fp2::traits::Fp as FqTrait;
            use rand_core::{CryptoRng, RngCore};

            use super::ParameterSetId;
            use crate::protocols::sidh::{
                SidhAlicePublicKey, SidhBobPublicKey, SidhError, SidhParameters,
            };

            pub type Fq = $field;

            pub const ID: ParameterSetId = $id;
            pub const EA: usize = $ea;
            pub const EB: usize = $eb;

            /// Byte length of an encoded GF(p^2) element.
            pub const ENCODED_LENGTH: usize = <Fq as FqTrait>::ENCODED_LENGTH;

            /// Public parameters, computed on first use.
            pub fn parameters() -> &'static SidhParameters<Fq> {
                static PARAMETERS: OnceLock<SidhParameters<Fq>> = OnceLock::new();
                PARAMETERS.get_or_init(|| SidhParameters::new(EA, EB))
            }

            fn encode_into(x: &Fq, out: &mut [u8]) {
                out.copy_from_slice(&x.encode());
            }

            /// Decode x(P) || x(Q) || x(P - Q), rejecting non-canonical encodings.
            fn decode_x_coords(buf: &[u8]) -> Result<(Fq, Fq, Fq), SidhError> {
                let n = ENCODED_LENGTH;
                let (xP, c0) = Fq::decode(&buf[..n]);
                let (xQ, c1) = Fq::decode(&buf[n..2 * n]);
                let (xPQ, c2) = Fq::decode(&buf[2 * n..3 * n]);
                if (c0 & c1 & c2) != u32::MAX {
                    return Err(SidhError::InvalidPublicKey);
                }
                Ok((xP, xQ, xPQ))
            }

            fn encode_x_coords(xs: (Fq, Fq, Fq), out: &mut [u8]) {
                let n = ENCODED_LENGTH;
                encode_into(&xs.0, &mut out[..n]);
                encode_into(&xs.1, &mut out[n..2 * n]);
                encode_into(&xs.2, &mut out[2 * n..3 * n]);
            }

            pub fn random_private_key_a<R: CryptoRng + RngCore>(rng: &mut R, out_a: &mut [u8]) {
                parameters().sample_alice_scalar_into(rng, out_a);
            }

            pub fn random_private_key_b<R: CryptoRng + RngCore>(rng: &mut R, out_b: &mut [u8]) {
                parameters().sample_bob_scalar_into(rng, out_b);
            }

            pub fn ephemeral_key_generation_a(
                private_a: &[u8],
                out_public_a: &mut [u8],
            ) -> Result<(), SidhError> {
                let params = parameters();
                let public_key = params.alice_private_key(private_a)?.public_key(params)?;
                encode_x_coords(public_key.x_coords(), out_public_a);
                Ok(())
            }

            pub fn ephemeral_key_generation_b(
                private_b: &[u8],
                out_public_b: &mut [u8],
            ) -> Result<(), SidhError> {
                let params = parameters();
                let public_key = params.bob_private_key(private_b)?.public_key(params)?;
                encode_x_coords(public_key.x_coords(), out_public_b);
                Ok(())
            }

            pub fn ephemeral_secret_agreement_a(
                private_a: &[u8],
                public_b: &[u8],
                out_secret_a: &mut [u8],
            ) -> Result<(), SidhError> {
                let private_key = parameters().alice_private_key(private_a)?;
                let (xP, xQ, xPQ) = decode_x_coords(public_b)?;
                let public_key = SidhBobPublicKey::from_x_coords(&xP, &xQ, &xPQ)?;
                let j = private_key.shared_secret(&public_key)?;
                encode_into(&j, out_secret_a);
                Ok(())
            }

            pub fn ephemeral_secret_agreement_b(
                private_b: &[u8],
                public_a: &[u8],
                out_secret_b: &mut [u8],
            ) -> Result<(), SidhError> {
                let private_key = parameters().bob_private_key(private_b)?;
                let (xP, xQ, xPQ) = decode_x_coords(public_a)?;
                let public_key = SidhAlicePublicKey::from_x_coords(&xP, &xQ, &xPQ)?;
                let j = private_key.shared_secret(&public_key)?;
                encode_into(&j, out_secret_b);
                Ok(())
            }
        }
    };
}

define_sidh_instance!(p434, ParameterSetId::P434, crate::fields::sike::SikeP434, 216, 137);
define_sidh_instance!(p503, ParameterSetId::P503, crate::fields::sike::SikeP503, 250, 159);
define_sidh_instance!(p610, ParameterSetId::P610, crate::fields::sike::SikeP610, 305, 192);
define_sidh_instance!(p751, ParameterSetId::P751, crate::fields::sike::SikeP751, 372, 239);
