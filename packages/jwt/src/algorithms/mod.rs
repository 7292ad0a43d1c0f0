//! JWT signing algorithms
//!
//! Every family implements the same capability set: an [`AlgorithmName`],
//! a fixed [`Signer::signature_size`], [`Signer::sign`] and
//! [`Verifier::verify`]. The traits are sealed; the set of families is the
//! one defined in this module.
//!
//! Algorithm values are immutable once constructed and are `Send + Sync`,
//! so a single instance can sign and verify from many threads at once.

mod ecdsa;
mod eddsa;
mod hmac;
mod none;
mod pool;
mod rsa;

pub mod name;

pub use self::ecdsa::{EcdsaAlgorithm, EcdsaKey};
pub use self::eddsa::EdDsaAlgorithm;
pub use self::hmac::HmacAlgorithm;
pub use self::name::AlgorithmName;
pub use self::none::NoneAlgorithm;
pub use self::rsa::{RsaAlgorithm, RsaPssAlgorithm};

use crate::error::{JwtError, JwtResult};
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::sync::Arc;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Exposes the name an algorithm signs or verifies under.
pub trait AlgorithmIdentity: sealed::Sealed + Send + Sync {
    /// Name written to (or expected in) the `alg` header member
    fn algorithm_name(&self) -> &AlgorithmName;
}

/// Produces signatures over a token payload.
pub trait Signer: AlgorithmIdentity {
    /// Exact length in bytes of every signature this signer produces
    fn signature_size(&self) -> usize;

    /// Sign `payload`, the `header.claims` segment of a token.
    ///
    /// # Errors
    ///
    /// `MissingKey` when the algorithm holds no signing key,
    /// `SigningError` when the primitive fails.
    fn sign(&self, payload: &[u8]) -> JwtResult<Vec<u8>>;
}

/// Checks signatures over a token payload.
pub trait Verifier: AlgorithmIdentity {
    /// Verify `signature` over `payload`.
    ///
    /// # Errors
    ///
    /// `InvalidSignature` when the signature has the wrong length or does not
    /// verify.
    fn verify(&self, payload: &[u8], signature: &[u8]) -> JwtResult<()>;
}

/// Combined signing and verification capability.
pub trait Algorithm: Signer + Verifier {}

impl<T: Signer + Verifier + ?Sized> Algorithm for T {}

impl<T: sealed::Sealed + ?Sized> sealed::Sealed for &T {}
impl<T: sealed::Sealed + ?Sized> sealed::Sealed for Arc<T> {}

impl<T: AlgorithmIdentity + ?Sized> AlgorithmIdentity for &T {
    fn algorithm_name(&self) -> &AlgorithmName {
        (**self).algorithm_name()
    }
}

impl<T: AlgorithmIdentity + ?Sized> AlgorithmIdentity for Arc<T> {
    fn algorithm_name(&self) -> &AlgorithmName {
        (**self).algorithm_name()
    }
}

impl<T: Signer + ?Sized> Signer for &T {
    fn signature_size(&self) -> usize {
        (**self).signature_size()
    }

    fn sign(&self, payload: &[u8]) -> JwtResult<Vec<u8>> {
        (**self).sign(payload)
    }
}

impl<T: Signer + ?Sized> Signer for Arc<T> {
    fn signature_size(&self) -> usize {
        (**self).signature_size()
    }

    fn sign(&self, payload: &[u8]) -> JwtResult<Vec<u8>> {
        (**self).sign(payload)
    }
}

impl<T: Verifier + ?Sized> Verifier for &T {
    fn verify(&self, payload: &[u8], signature: &[u8]) -> JwtResult<()> {
        (**self).verify(payload, signature)
    }
}

impl<T: Verifier + ?Sized> Verifier for Arc<T> {
    fn verify(&self, payload: &[u8], signature: &[u8]) -> JwtResult<()> {
        (**self).verify(payload, signature)
    }
}

/// SHA-2 variant implied by an algorithm's 256/384/512 suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HashKind {
    Sha256,
    Sha384,
    Sha512,
}

impl HashKind {
    pub(crate) fn digest(self, payload: &[u8]) -> Vec<u8> {
        match self {
            HashKind::Sha256 => Sha256::digest(payload).to_vec(),
            HashKind::Sha384 => Sha384::digest(payload).to_vec(),
            HashKind::Sha512 => Sha512::digest(payload).to_vec(),
        }
    }

    pub(crate) const fn output_size(self) -> usize {
        match self {
            HashKind::Sha256 => 32,
            HashKind::Sha384 => 48,
            HashKind::Sha512 => 64,
        }
    }
}

/// Fail fast on signatures of the wrong length, before any crypto runs.
#[inline]
pub(crate) fn check_signature_len(signature: &[u8], expected: usize) -> JwtResult<()> {
    if signature.len() == expected {
        Ok(())
    } else {
        tracing::trace!(
            got = signature.len(),
            expected,
            "rejecting signature of unexpected length"
        );
        Err(JwtError::InvalidSignature)
    }
}
