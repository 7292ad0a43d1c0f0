//! Edwards-curve signatures (EdDSA over Ed25519)
//!
//! Ed25519 hashes internally, so the raw payload is signed.

use super::{AlgorithmIdentity, AlgorithmName, Signer, Verifier, check_signature_len, sealed};
use crate::error::{JwtError, JwtResult};
use ed25519_dalek::{SIGNATURE_LENGTH, Signature, SigningKey, VerifyingKey};

/// Ed25519 signer and verifier.
#[derive(Clone)]
pub struct EdDsaAlgorithm {
    name: AlgorithmName,
    signing: Option<SigningKey>,
    verifying: VerifyingKey,
}

impl EdDsaAlgorithm {
    /// Signing algorithm; the public half is derived from the private key.
    #[must_use]
    pub fn signer(signing: SigningKey) -> Self {
        Self {
            name: AlgorithmName::EDDSA,
            verifying: signing.verifying_key(),
            signing: Some(signing),
        }
    }

    /// Verification-only algorithm
    #[must_use]
    pub fn verifier(verifying: VerifyingKey) -> Self {
        Self {
            name: AlgorithmName::EDDSA,
            signing: None,
            verifying,
        }
    }

    /// Create from an optional private key and an optional public key.
    ///
    /// # Errors
    ///
    /// `MissingKey` when neither key is given, `InvalidKey` when both are
    /// given and do not belong together.
    pub fn new(signing: Option<SigningKey>, verifying: Option<VerifyingKey>) -> JwtResult<Self> {
        match (signing, verifying) {
            (Some(signing), Some(verifying)) => {
                if signing.verifying_key() != verifying {
                    return Err(JwtError::invalid_key(
                        "Ed25519 public key does not match the private key",
                    ));
                }
                Ok(Self::signer(signing))
            }
            (Some(signing), None) => Ok(Self::signer(signing)),
            (None, Some(verifying)) => Ok(Self::verifier(verifying)),
            (None, None) => Err(JwtError::missing_key("EdDSA requires a private or public key")),
        }
    }

    /// Signing algorithm from a 32-byte Ed25519 seed.
    ///
    /// # Errors
    ///
    /// `InvalidKey` when `secret` is not 32 bytes.
    pub fn from_secret_bytes(secret: &[u8]) -> JwtResult<Self> {
        let seed: &[u8; 32] = secret.try_into().map_err(|_| {
            JwtError::invalid_key(format!(
                "Ed25519 private key must be 32 bytes, got {}",
                secret.len()
            ))
        })?;
        Ok(Self::signer(SigningKey::from_bytes(seed)))
    }

    /// Verification-only algorithm from a 32-byte compressed public key.
    ///
    /// # Errors
    ///
    /// `InvalidKey` when `public` is not a valid Ed25519 point encoding.
    pub fn from_public_bytes(public: &[u8]) -> JwtResult<Self> {
        let bytes: &[u8; 32] = public.try_into().map_err(|_| {
            JwtError::invalid_key(format!(
                "Ed25519 public key must be 32 bytes, got {}",
                public.len()
            ))
        })?;
        let verifying = VerifyingKey::from_bytes(bytes)
            .map_err(|e| JwtError::invalid_key(format!("Invalid Ed25519 public key: {e}")))?;
        Ok(Self::verifier(verifying))
    }

    /// The public key used for verification
    #[must_use]
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying
    }
}

impl std::fmt::Debug for EdDsaAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdDsaAlgorithm")
            .field("name", &self.name)
            .field("can_sign", &self.signing.is_some())
            .finish()
    }
}

impl sealed::Sealed for EdDsaAlgorithm {}

impl AlgorithmIdentity for EdDsaAlgorithm {
    fn algorithm_name(&self) -> &AlgorithmName {
        &self.name
    }
}

impl Signer for EdDsaAlgorithm {
    fn signature_size(&self) -> usize {
        SIGNATURE_LENGTH
    }

    fn sign(&self, payload: &[u8]) -> JwtResult<Vec<u8>> {
        use ed25519_dalek::Signer as _;

        let signing = self
            .signing
            .as_ref()
            .ok_or_else(|| JwtError::missing_key("Private key required for EdDSA"))?;
        let signature = signing
            .try_sign(payload)
            .map_err(|e| JwtError::signing_error(format!("EdDSA signing failed: {e}")))?;
        Ok(signature.to_bytes().to_vec())
    }
}

impl Verifier for EdDsaAlgorithm {
    fn verify(&self, payload: &[u8], signature: &[u8]) -> JwtResult<()> {
        check_signature_len(signature, SIGNATURE_LENGTH)?;
        let signature = Signature::from_slice(signature).map_err(|_| JwtError::InvalidSignature)?;
        self.verifying
            .verify_strict(payload, &signature)
            .map_err(|_| JwtError::InvalidSignature)
    }
}
