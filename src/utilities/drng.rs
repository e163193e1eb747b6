use rand_core::{CryptoRng, Error, RngCore, impls};
use sha3::{
    Shake256, Shake256Reader,
    digest::{ExtendableOutput, Update, XofReader},
};

/// Deterministic random number generator built on the SHAKE256 XOF.
/// The output stream is fully determined by the seed, which makes it
/// suitable for reproducible tests and benchmarks. It is not meant for
/// generating real keys.
pub struct DRNG {
    reader: Shake256Reader,
}

impl DRNG {
    /// Absorb `seed` and squeeze the output stream from it.
    pub fn from_seed(seed: &[u8]) -> Self {
        let mut shake = Shake256::default();
        shake.update(seed);
        Self {
            reader: shake.finalize_xof(),
        }
    }
}

impl RngCore for DRNG {
    fn next_u32(&mut self) -> u32 {
        impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.reader.read(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

// Only ever used as a deterministic stand-in for a CSPRNG.
impl CryptoRng for DRNG {}
