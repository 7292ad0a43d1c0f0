//! JWT error types

use crate::algorithms::AlgorithmName;
use thiserror::Error;

/// JWT operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// Errors returned by algorithm construction, token building and parsing.
///
/// `InvalidSignature` and `AlgorithmMismatch` are both authentication
/// failures: a token rejected with either must not be trusted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Key material is present but malformed or unusable for the algorithm
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Key material required for the operation is absent or empty
    #[error("Missing key: {0}")]
    MissingKey(String),

    /// Algorithm name does not belong to the requested family
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Underlying primitive failed while signing
    #[error("Signing error: {0}")]
    SigningError(String),

    /// Signature did not verify, or had the wrong length
    #[error("Invalid JWT signature")]
    InvalidSignature,

    /// Compact token is malformed
    #[error("Invalid token format: {0}")]
    InvalidFormat(String),

    /// Token header names a different algorithm than the verifier
    #[error("Algorithm mismatch: expected {expected}, token is signed with {found}")]
    AlgorithmMismatch {
        /// Algorithm of the verifier supplied by the caller
        expected: AlgorithmName,
        /// Algorithm claimed by the token header
        found: AlgorithmName,
    },

    /// Claims could not be produced as (or read from) bytes
    #[error("Claims encoding error: {0}")]
    ClaimsEncoding(String),

    /// Header could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl JwtError {
    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        JwtError::InvalidKey(msg.into())
    }

    /// Create a missing key error
    #[inline]
    #[must_use]
    pub fn missing_key(msg: impl Into<String>) -> Self {
        JwtError::MissingKey(msg.into())
    }

    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: impl Into<String>) -> Self {
        JwtError::UnsupportedAlgorithm(alg.into())
    }

    /// Create a signing error
    #[inline]
    #[must_use]
    pub fn signing_error(msg: impl Into<String>) -> Self {
        JwtError::SigningError(msg.into())
    }

    /// Create an invalid format error
    #[inline]
    #[must_use]
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        JwtError::InvalidFormat(msg.into())
    }

    /// Create a claims encoding error
    #[inline]
    #[must_use]
    pub fn claims_encoding(msg: impl Into<String>) -> Self {
        JwtError::ClaimsEncoding(msg.into())
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        JwtError::Serialization(msg.into())
    }

    /// True for failures that must block trust in a token's claims.
    #[must_use]
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            JwtError::InvalidSignature | JwtError::AlgorithmMismatch { .. }
        )
    }
}
