//! Unsecured tokens (`alg` = `none`)

use super::{AlgorithmIdentity, AlgorithmName, Signer, Verifier, sealed};
use crate::error::{JwtError, JwtResult};

/// Produces and accepts tokens with an empty signature.
///
/// Nothing is authenticated. A parser only accepts such a token when this
/// algorithm is passed to it explicitly, so unsigned tokens cannot reach a
/// verifier that expects a real signature.
#[derive(Debug, Clone)]
pub struct NoneAlgorithm {
    name: AlgorithmName,
}

impl NoneAlgorithm {
    /// Create the `none` algorithm
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: AlgorithmName::NONE,
        }
    }
}

impl Default for NoneAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl sealed::Sealed for NoneAlgorithm {}

impl AlgorithmIdentity for NoneAlgorithm {
    fn algorithm_name(&self) -> &AlgorithmName {
        &self.name
    }
}

impl Signer for NoneAlgorithm {
    fn signature_size(&self) -> usize {
        0
    }

    fn sign(&self, _payload: &[u8]) -> JwtResult<Vec<u8>> {
        Ok(Vec::new())
    }
}

impl Verifier for NoneAlgorithm {
    fn verify(&self, _payload: &[u8], signature: &[u8]) -> JwtResult<()> {
        if signature.is_empty() {
            Ok(())
        } else {
            Err(JwtError::InvalidSignature)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signs_nothing_and_accepts_only_empty() {
        let alg = NoneAlgorithm::new();
        assert_eq!(alg.algorithm_name().as_str(), "none");
        assert_eq!(alg.signature_size(), 0);
        assert!(alg.sign(b"payload").unwrap().is_empty());
        alg.verify(b"payload", &[]).unwrap();
        assert_eq!(alg.verify(b"payload", &[0]), Err(JwtError::InvalidSignature));
    }
}
