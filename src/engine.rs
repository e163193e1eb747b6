use std::fmt;

use rand_core::{CryptoRng, OsRng, RngCore};
use thiserror::Error;

use crate::harness::log::{LogLevel, LogSink};
use crate::protocols::sidh::SidhError;
use crate::protocols::sidh_parameters::{ParameterSetId, p434, p503, p610, p751};

/// The role a key buffer plays in an exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyRole {
    PrivateA,
    PrivateB,
    Public,
    SharedSecret,
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            KeyRole::PrivateA => "private key A",
            KeyRole::PrivateB => "private key B",
            KeyRole::Public => "public key",
            KeyRole::SharedSecret => "shared secret",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("{set}: {role} buffer has length {actual}, expected {expected}")]
    Length {
        set: ParameterSetId,
        role: KeyRole,
        expected: usize,
        actual: usize,
    },
    #[error("{set}: {source}")]
    Protocol {
        set: ParameterSetId,
        source: SidhError,
    },
}

/// Dispatch an operation to the module of the given parameter set.
macro_rules! dispatch {
    ($id:expr, $func:ident($($arg:expr),* $(,)?)) => {
        match $id {
            ParameterSetId::P434 => p434::$func($($arg),*),
            ParameterSetId::P503 => p503::$func($($arg),*),
            ParameterSetId::P610 => p610::$func($($arg),*),
            ParameterSetId::P751 => p751::$func($($arg),*),
        }
    };
}

fn check_len(
    set: ParameterSetId,
    role: KeyRole,
    expected: usize,
    actual: usize,
) -> Result<(), EngineError> {
    if expected == actual {
        Ok(())
    } else {
        Err(EngineError::Length {
            set,
            role,
            expected,
            actual,
        })
    }
}

/// The SIDH key exchange operations on caller-owned byte buffers.
///
/// Every operation validates the buffer lengths against the catalog
/// before touching any output. The `bool` variants report success and
/// the `try_` variants return the reason for a failure. Output buffers
/// are only written once the whole computation has succeeded.
#[derive(Clone, Debug, Default)]
pub struct SidhEngine {
    sink: Option<LogSink>,
}

impl SidhEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send engine diagnostics to `sink`.
    pub fn enable_logging(&mut self, sink: LogSink) {
        self.sink = Some(sink);
    }

    pub fn disable_logging(&mut self) {
        self.sink = None;
    }

    pub fn is_logging(&self) -> bool {
        self.sink.is_some()
    }

    fn emit(&self, level: LogLevel, text: impl FnOnce() -> String) {
        if let Some(sink) = &self.sink {
            if level <= sink.max_level() {
                sink.log(level, text());
            }
        }
    }

    /// Log a failed operation and hand the result back.
    fn report<T>(&self, op: &str, result: Result<T, EngineError>) -> Result<T, EngineError> {
        match &result {
            Ok(_) => self.emit(LogLevel::Debug, || format!("{op}: ok")),
            Err(e) => {
                tracing::warn!(operation = op, error = %e, "SIDH operation failed");
                self.emit(LogLevel::Error, || format!("{op}: {e}"));
            }
        }
        result
    }

    pub fn try_random_private_key_a_with_rng<R: CryptoRng + RngCore>(
        &self,
        id: ParameterSetId,
        rng: &mut R,
        out_a: &mut [u8],
    ) -> Result<(), EngineError> {
        let result = check_len(id, KeyRole::PrivateA, id.lengths().private_key_a, out_a.len())
            .map(|()| dispatch!(id, random_private_key_a(rng, out_a)));
        self.report("random_private_key_a", result)
    }

    pub fn try_random_private_key_b_with_rng<R: CryptoRng + RngCore>(
        &self,
        id: ParameterSetId,
        rng: &mut R,
        out_b: &mut [u8],
    ) -> Result<(), EngineError> {
        let result = check_len(id, KeyRole::PrivateB, id.lengths().private_key_b, out_b.len())
            .map(|()| dispatch!(id, random_private_key_b(rng, out_b)));
        self.report("random_private_key_b", result)
    }

    pub fn try_random_private_key_a(
        &self,
        id: ParameterSetId,
        out_a: &mut [u8],
    ) -> Result<(), EngineError> {
        self.try_random_private_key_a_with_rng(id, &mut OsRng, out_a)
    }

    pub fn try_random_private_key_b(
        &self,
        id: ParameterSetId,
        out_b: &mut [u8],
    ) -> Result<(), EngineError> {
        self.try_random_private_key_b_with_rng(id, &mut OsRng, out_b)
    }

    pub fn try_ephemeral_key_generation_a(
        &self,
        id: ParameterSetId,
        private_a: &[u8],
        out_public_a: &mut [u8],
    ) -> Result<(), EngineError> {
        let lengths = id.lengths();
        let result = check_len(id, KeyRole::PrivateA, lengths.private_key_a, private_a.len())
            .and_then(|()| check_len(id, KeyRole::Public, lengths.public_key, out_public_a.len()))
            .and_then(|()| {
                dispatch!(id, ephemeral_key_generation_a(private_a, out_public_a))
                    .map_err(|source| EngineError::Protocol { set: id, source })
            });
        self.report("ephemeral_key_generation_a", result)
    }

    pub fn try_ephemeral_key_generation_b(
        &self,
        id: ParameterSetId,
        private_b: &[u8],
        out_public_b: &mut [u8],
    ) -> Result<(), EngineError> {
        let lengths = id.lengths();
        let result = check_len(id, KeyRole::PrivateB, lengths.private_key_b, private_b.len())
            .and_then(|()| check_len(id, KeyRole::Public, lengths.public_key, out_public_b.len()))
            .and_then(|()| {
                dispatch!(id, ephemeral_key_generation_b(private_b, out_public_b))
                    .map_err(|source| EngineError::Protocol { set: id, source })
            });
        self.report("ephemeral_key_generation_b", result)
    }

    pub fn try_ephemeral_secret_agreement_a(
        &self,
        id: ParameterSetId,
        private_a: &[u8],
        public_b: &[u8],
        out_secret_a: &mut [u8],
    ) -> Result<(), EngineError> {
        let lengths = id.lengths();
        let result = check_len(id, KeyRole::PrivateA, lengths.private_key_a, private_a.len())
            .and_then(|()| check_len(id, KeyRole::Public, lengths.public_key, public_b.len()))
            .and_then(|()| {
                check_len(id, KeyRole::SharedSecret, lengths.shared_secret, out_secret_a.len())
            })
            .and_then(|()| {
                dispatch!(id, ephemeral_secret_agreement_a(private_a, public_b, out_secret_a))
                    .map_err(|source| EngineError::Protocol { set: id, source })
            });
        self.report("ephemeral_secret_agreement_a", result)
    }

    pub fn try_ephemeral_secret_agreement_b(
        &self,
        id: ParameterSetId,
        private_b: &[u8],
        public_a: &[u8],
        out_secret_b: &mut [u8],
    ) -> Result<(), EngineError> {
        let lengths = id.lengths();
        let result = check_len(id, KeyRole::PrivateB, lengths.private_key_b, private_b.len())
            .and_then(|()| check_len(id, KeyRole::Public, lengths.public_key, public_a.len()))
            .and_then(|()| {
                check_len(id, KeyRole::SharedSecret, lengths.shared_secret, out_secret_b.len())
            })
            .and_then(|()| {
                dispatch!(id, ephemeral_secret_agreement_b(private_b, public_a, out_secret_b))
                    .map_err(|source| EngineError::Protocol { set: id, source })
            });
        self.report("ephemeral_secret_agreement_b", result)
    }

    pub fn random_private_key_a(&self, id: ParameterSetId, out_a: &mut [u8]) -> bool {
        self.try_random_private_key_a(id, out_a).is_ok()
    }

    pub fn random_private_key_b(&self, id: ParameterSetId, out_b: &mut [u8]) -> bool {
        self.try_random_private_key_b(id, out_b).is_ok()
    }

    pub fn random_private_key_a_with_rng<R: CryptoRng + RngCore>(
        &self,
        id: ParameterSetId,
        rng: &mut R,
        out_a: &mut [u8],
    ) -> bool {
        self.try_random_private_key_a_with_rng(id, rng, out_a).is_ok()
    }

    pub fn random_private_key_b_with_rng<R: CryptoRng + RngCore>(
        &self,
        id: ParameterSetId,
        rng: &mut R,
        out_b: &mut [u8],
    ) -> bool {
        self.try_random_private_key_b_with_rng(id, rng, out_b).is_ok()
    }

    pub fn ephemeral_key_generation_a(
        &self,
        id: ParameterSetId,
        private_a: &[u8],
        out_public_a: &mut [u8],
    ) -> bool {
        self.try_ephemeral_key_generation_a(id, private_a, out_public_a)
            .is_ok()
    }

    pub fn ephemeral_key_generation_b(
        &self,
        id: ParameterSetId,
        private_b: &[u8],
        out_public_b: &mut [u8],
    ) -> bool {
        self.try_ephemeral_key_generation_b(id, private_b, out_public_b)
            .is_ok()
    }

    pub fn ephemeral_secret_agreement_a(
        &self,
        id: ParameterSetId,
        private_a: &[u8],
        public_b: &[u8],
        out_secret_a: &mut [u8],
    ) -> bool {
        self.try_ephemeral_secret_agreement_a(id, private_a, public_b, out_secret_a)
            .is_ok()
    }

    pub fn ephemeral_secret_agreement_b(
        &self,
        id: ParameterSetId,
        private_b: &[u8],
        public_a: &[u8],
        out_secret_b: &mut [u8],
    ) -> bool {
        self.try_ephemeral_secret_agreement_b(id, private_b, public_a, out_secret_b)
            .is_ok()
    }
}
