//! ECDSA-based JWT algorithms (ES256, ES384, ES512)
//!
//! The payload is hashed with the curve's SHA-2 variant and the digest is
//! signed. Signatures travel as `R || S`, each a fixed-width big-endian
//! integer as wide as the curve's field (32, 48 and 66 bytes), never as
//! ASN.1 DER.

use super::{
    AlgorithmIdentity, AlgorithmName, HashKind, Signer, Verifier, check_signature_len, sealed,
};
use crate::error::{JwtError, JwtResult};
use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier, RandomizedPrehashSigner};
use rand_core::OsRng;

/// Key material for one of the supported curves.
///
/// A signing key also provides the verifying key.
#[derive(Clone)]
pub enum EcdsaKey {
    /// P-256 private key
    P256Signing(p256::ecdsa::SigningKey),
    /// P-256 public key
    P256Verifying(p256::ecdsa::VerifyingKey),
    /// P-384 private key
    P384Signing(p384::ecdsa::SigningKey),
    /// P-384 public key
    P384Verifying(p384::ecdsa::VerifyingKey),
    /// P-521 private key
    P521Signing(p521::ecdsa::SigningKey),
    /// P-521 public key
    P521Verifying(p521::ecdsa::VerifyingKey),
}

impl From<p256::ecdsa::SigningKey> for EcdsaKey {
    fn from(key: p256::ecdsa::SigningKey) -> Self {
        EcdsaKey::P256Signing(key)
    }
}

impl From<p256::ecdsa::VerifyingKey> for EcdsaKey {
    fn from(key: p256::ecdsa::VerifyingKey) -> Self {
        EcdsaKey::P256Verifying(key)
    }
}

impl From<p384::ecdsa::SigningKey> for EcdsaKey {
    fn from(key: p384::ecdsa::SigningKey) -> Self {
        EcdsaKey::P384Signing(key)
    }
}

impl From<p384::ecdsa::VerifyingKey> for EcdsaKey {
    fn from(key: p384::ecdsa::VerifyingKey) -> Self {
        EcdsaKey::P384Verifying(key)
    }
}

impl From<p521::ecdsa::SigningKey> for EcdsaKey {
    fn from(key: p521::ecdsa::SigningKey) -> Self {
        EcdsaKey::P521Signing(key)
    }
}

impl From<p521::ecdsa::VerifyingKey> for EcdsaKey {
    fn from(key: p521::ecdsa::VerifyingKey) -> Self {
        EcdsaKey::P521Verifying(key)
    }
}

#[derive(Clone)]
enum CurveKeys {
    P256 {
        signing: Option<p256::ecdsa::SigningKey>,
        verifying: p256::ecdsa::VerifyingKey,
    },
    P384 {
        signing: Option<p384::ecdsa::SigningKey>,
        verifying: p384::ecdsa::VerifyingKey,
    },
    P521 {
        signing: Option<p521::ecdsa::SigningKey>,
        verifying: p521::ecdsa::VerifyingKey,
    },
}

impl CurveKeys {
    fn from_key(key: EcdsaKey) -> Self {
        match key {
            EcdsaKey::P256Signing(signing) => CurveKeys::P256 {
                verifying: p256::ecdsa::VerifyingKey::from(&signing),
                signing: Some(signing),
            },
            EcdsaKey::P256Verifying(verifying) => CurveKeys::P256 {
                signing: None,
                verifying,
            },
            EcdsaKey::P384Signing(signing) => CurveKeys::P384 {
                verifying: p384::ecdsa::VerifyingKey::from(&signing),
                signing: Some(signing),
            },
            EcdsaKey::P384Verifying(verifying) => CurveKeys::P384 {
                signing: None,
                verifying,
            },
            EcdsaKey::P521Signing(signing) => CurveKeys::P521 {
                verifying: p521::ecdsa::VerifyingKey::from(&signing),
                signing: Some(signing),
            },
            EcdsaKey::P521Verifying(verifying) => CurveKeys::P521 {
                signing: None,
                verifying,
            },
        }
    }

    fn curve_name(&self) -> &'static str {
        match self {
            CurveKeys::P256 { .. } => "P-256",
            CurveKeys::P384 { .. } => "P-384",
            CurveKeys::P521 { .. } => "P-521",
        }
    }

    fn can_sign(&self) -> bool {
        match self {
            CurveKeys::P256 { signing, .. } => signing.is_some(),
            CurveKeys::P384 { signing, .. } => signing.is_some(),
            CurveKeys::P521 { signing, .. } => signing.is_some(),
        }
    }
}

/// Curve parameters implied by an algorithm name
fn params_for(name: &AlgorithmName) -> Option<(HashKind, &'static str, usize)> {
    // (hash, curve, byte width of R and of S)
    match name.as_str() {
        "ES256" => Some((HashKind::Sha256, "P-256", 32)),
        "ES384" => Some((HashKind::Sha384, "P-384", 48)),
        "ES512" => Some((HashKind::Sha512, "P-521", 66)),
        _ => None,
    }
}

/// ECDSA signer and verifier over P-256, P-384 or P-521.
///
/// P-256 and P-384 signatures are randomized; two signatures over the same
/// payload differ, and both verify.
#[derive(Clone)]
pub struct EcdsaAlgorithm {
    name: AlgorithmName,
    hash: HashKind,
    key_size: usize,
    keys: CurveKeys,
}

impl EcdsaAlgorithm {
    /// Create an ECDSA algorithm from a signing or verifying key.
    ///
    /// # Errors
    ///
    /// `UnsupportedAlgorithm` when `name` is not `ES256`, `ES384` or `ES512`,
    /// `InvalidKey` when the key's curve does not belong to `name`.
    pub fn new(name: AlgorithmName, key: impl Into<EcdsaKey>) -> JwtResult<Self> {
        let (hash, curve, key_size) =
            params_for(&name).ok_or_else(|| JwtError::unsupported_algorithm(name.as_str()))?;

        let keys = CurveKeys::from_key(key.into());
        if keys.curve_name() != curve {
            return Err(JwtError::invalid_key(format!(
                "{name} requires a {curve} key, got {}",
                keys.curve_name()
            )));
        }

        Ok(Self {
            name,
            hash,
            key_size,
            keys,
        })
    }

    /// Signing algorithm from a private key
    ///
    /// # Errors
    ///
    /// See [`EcdsaAlgorithm::new`].
    pub fn signer(name: AlgorithmName, key: impl Into<EcdsaKey>) -> JwtResult<Self> {
        let alg = Self::new(name, key)?;
        if alg.keys.can_sign() {
            Ok(alg)
        } else {
            Err(JwtError::missing_key(format!(
                "Private key required for {}",
                alg.name
            )))
        }
    }

    /// Verification-only algorithm from a public key
    ///
    /// # Errors
    ///
    /// See [`EcdsaAlgorithm::new`].
    pub fn verifier(name: AlgorithmName, key: impl Into<EcdsaKey>) -> JwtResult<Self> {
        Self::new(name, key)
    }

    /// Load a private key from PKCS#8 DER (ES256 and ES384).
    ///
    /// # Errors
    ///
    /// `InvalidKey` when the DER does not hold a key for the curve,
    /// `UnsupportedAlgorithm` for any other name.
    pub fn from_pkcs8_der(name: AlgorithmName, der: &[u8]) -> JwtResult<Self> {
        use p256::pkcs8::DecodePrivateKey;

        let key: EcdsaKey = match name.as_str() {
            "ES256" => p256::ecdsa::SigningKey::from_pkcs8_der(der)
                .map_err(|e| JwtError::invalid_key(format!("Invalid EC private key for ES256: {e}")))?
                .into(),
            "ES384" => p384::ecdsa::SigningKey::from_pkcs8_der(der)
                .map_err(|e| JwtError::invalid_key(format!("Invalid EC private key for ES384: {e}")))?
                .into(),
            _ => return Err(JwtError::unsupported_algorithm(name.as_str())),
        };
        Self::new(name, key)
    }

    /// Load a public key from SubjectPublicKeyInfo DER (ES256 and ES384).
    ///
    /// # Errors
    ///
    /// `InvalidKey` when the DER does not hold a key for the curve,
    /// `UnsupportedAlgorithm` for any other name.
    pub fn from_public_key_der(name: AlgorithmName, der: &[u8]) -> JwtResult<Self> {
        use p256::pkcs8::DecodePublicKey;

        let key: EcdsaKey = match name.as_str() {
            "ES256" => p256::ecdsa::VerifyingKey::from_public_key_der(der)
                .map_err(|e| JwtError::invalid_key(format!("Invalid EC public key for ES256: {e}")))?
                .into(),
            "ES384" => p384::ecdsa::VerifyingKey::from_public_key_der(der)
                .map_err(|e| JwtError::invalid_key(format!("Invalid EC public key for ES384: {e}")))?
                .into(),
            _ => return Err(JwtError::unsupported_algorithm(name.as_str())),
        };
        Self::new(name, key)
    }

    fn missing_private_key(&self) -> JwtError {
        JwtError::missing_key(format!("Private key required for {}", self.name))
    }
}

impl std::fmt::Debug for EcdsaAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcdsaAlgorithm")
            .field("name", &self.name)
            .field("curve", &self.keys.curve_name())
            .field("can_sign", &self.keys.can_sign())
            .finish()
    }
}

impl sealed::Sealed for EcdsaAlgorithm {}

impl AlgorithmIdentity for EcdsaAlgorithm {
    fn algorithm_name(&self) -> &AlgorithmName {
        &self.name
    }
}

impl Signer for EcdsaAlgorithm {
    fn signature_size(&self) -> usize {
        2 * self.key_size
    }

    fn sign(&self, payload: &[u8]) -> JwtResult<Vec<u8>> {
        let digest = self.hash.digest(payload);
        let failed = |e: p256::ecdsa::Error| {
            JwtError::signing_error(format!("{} signing failed: {e}", self.name))
        };

        let signature = match &self.keys {
            CurveKeys::P256 { signing, .. } => {
                let key = signing.as_ref().ok_or_else(|| self.missing_private_key())?;
                let signature: p256::ecdsa::Signature =
                    key.sign_prehash_with_rng(&mut OsRng, &digest).map_err(failed)?;
                signature.to_bytes().to_vec()
            }
            CurveKeys::P384 { signing, .. } => {
                let key = signing.as_ref().ok_or_else(|| self.missing_private_key())?;
                let signature: p384::ecdsa::Signature =
                    key.sign_prehash_with_rng(&mut OsRng, &digest).map_err(failed)?;
                signature.to_bytes().to_vec()
            }
            CurveKeys::P521 { signing, .. } => {
                let key = signing.as_ref().ok_or_else(|| self.missing_private_key())?;
                let signature: p521::ecdsa::Signature = key.sign_prehash(&digest).map_err(failed)?;
                signature.to_bytes().to_vec()
            }
        };
        Ok(signature)
    }
}

impl Verifier for EcdsaAlgorithm {
    fn verify(&self, payload: &[u8], signature: &[u8]) -> JwtResult<()> {
        check_signature_len(signature, self.signature_size())?;
        let digest = self.hash.digest(payload);

        let verified = match &self.keys {
            CurveKeys::P256 { verifying, .. } => p256::ecdsa::Signature::from_slice(signature)
                .and_then(|signature| verifying.verify_prehash(&digest, &signature)),
            CurveKeys::P384 { verifying, .. } => p384::ecdsa::Signature::from_slice(signature)
                .and_then(|signature| verifying.verify_prehash(&digest, &signature)),
            CurveKeys::P521 { verifying, .. } => p521::ecdsa::Signature::from_slice(signature)
                .and_then(|signature| verifying.verify_prehash(&digest, &signature)),
        };
        verified.map_err(|_| JwtError::InvalidSignature)
    }
}
