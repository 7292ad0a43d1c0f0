//! HMAC-based JWT algorithms (HS256, HS384, HS512)

use super::pool::MacPool;
use super::{
    AlgorithmIdentity, AlgorithmName, HashKind, Signer, Verifier, check_signature_len, sealed,
};
use crate::error::{JwtError, JwtResult};
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

enum HmacContexts {
    Sha256(MacPool<HmacSha256>),
    Sha384(MacPool<HmacSha384>),
    Sha512(MacPool<HmacSha512>),
}

/// Symmetric HMAC signer and verifier.
///
/// Keyed MAC contexts are pooled per instance, so repeated signing does not
/// re-key from scratch.
pub struct HmacAlgorithm {
    name: AlgorithmName,
    hash: HashKind,
    contexts: HmacContexts,
}

impl HmacAlgorithm {
    /// Create an HMAC algorithm for `HS256`, `HS384` or `HS512`.
    ///
    /// # Errors
    ///
    /// `MissingKey` for an empty secret, `UnsupportedAlgorithm` when `name`
    /// is not an HMAC algorithm.
    pub fn new(name: AlgorithmName, secret: impl AsRef<[u8]>) -> JwtResult<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(JwtError::missing_key(format!("HMAC secret for {name} is empty")));
        }

        let (hash, contexts) = match name.as_str() {
            "HS256" => (HashKind::Sha256, HmacContexts::Sha256(MacPool::new(keyed(secret)?))),
            "HS384" => (HashKind::Sha384, HmacContexts::Sha384(MacPool::new(keyed(secret)?))),
            "HS512" => (HashKind::Sha512, HmacContexts::Sha512(MacPool::new(keyed(secret)?))),
            _ => return Err(JwtError::unsupported_algorithm(name.as_str())),
        };

        Ok(Self {
            name,
            hash,
            contexts,
        })
    }

    /// Same as [`HmacAlgorithm::new`]; HMAC keys sign and verify alike.
    ///
    /// # Errors
    ///
    /// See [`HmacAlgorithm::new`].
    pub fn signer(name: AlgorithmName, secret: impl AsRef<[u8]>) -> JwtResult<Self> {
        Self::new(name, secret)
    }

    /// Same as [`HmacAlgorithm::new`]; HMAC keys sign and verify alike.
    ///
    /// # Errors
    ///
    /// See [`HmacAlgorithm::new`].
    pub fn verifier(name: AlgorithmName, secret: impl AsRef<[u8]>) -> JwtResult<Self> {
        Self::new(name, secret)
    }

    fn mac(&self, payload: &[u8]) -> Vec<u8> {
        match &self.contexts {
            HmacContexts::Sha256(pool) => pool.with_mac(|mac| {
                mac.update(payload);
                mac.finalize_reset().into_bytes().to_vec()
            }),
            HmacContexts::Sha384(pool) => pool.with_mac(|mac| {
                mac.update(payload);
                mac.finalize_reset().into_bytes().to_vec()
            }),
            HmacContexts::Sha512(pool) => pool.with_mac(|mac| {
                mac.update(payload);
                mac.finalize_reset().into_bytes().to_vec()
            }),
        }
    }
}

fn keyed<M: Mac + hmac::digest::KeyInit>(secret: &[u8]) -> JwtResult<M> {
    <M as Mac>::new_from_slice(secret).map_err(|_| JwtError::invalid_key("Invalid HMAC key"))
}

impl std::fmt::Debug for HmacAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacAlgorithm")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl sealed::Sealed for HmacAlgorithm {}

impl AlgorithmIdentity for HmacAlgorithm {
    fn algorithm_name(&self) -> &AlgorithmName {
        &self.name
    }
}

impl Signer for HmacAlgorithm {
    fn signature_size(&self) -> usize {
        self.hash.output_size()
    }

    fn sign(&self, payload: &[u8]) -> JwtResult<Vec<u8>> {
        Ok(self.mac(payload))
    }
}

impl Verifier for HmacAlgorithm {
    fn verify(&self, payload: &[u8], signature: &[u8]) -> JwtResult<()> {
        check_signature_len(signature, self.signature_size())?;
        let expected = self.mac(payload);
        if bool::from(expected.ct_eq(signature)) {
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
    fn rejects_empty_secret_and_foreign_names() {
        assert!(matches!(
            HmacAlgorithm::new(AlgorithmName::HS256, b""),
            Err(JwtError::MissingKey(_))
        ));
        assert!(matches!(
            HmacAlgorithm::new(AlgorithmName::RS256, b"key"),
            Err(JwtError::UnsupportedAlgorithm(_))
        ));
        assert!(matches!(
            HmacAlgorithm::new(AlgorithmName::from("HS1024"), b"key"),
            Err(JwtError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn signature_size_follows_digest() {
        for (name, size) in [
            (AlgorithmName::HS256, 32),
            (AlgorithmName::HS384, 48),
            (AlgorithmName::HS512, 64),
        ] {
            let alg = HmacAlgorithm::new(name, b"key").unwrap();
            assert_eq!(alg.signature_size(), size);
            assert_eq!(alg.sign(b"payload").unwrap().len(), size);
        }
    }

    #[test]
    fn signing_is_deterministic_and_verifies() {
        let alg = HmacAlgorithm::new(AlgorithmName::HS384, b"key2").unwrap();
        let first = alg.sign(b"header.claims").unwrap();
        let second = alg.sign(b"header.claims").unwrap();
        assert_eq!(first, second);
        alg.verify(b"header.claims", &first).unwrap();
    }

    #[test]
    fn wrong_key_or_length_fails() {
        let alg = HmacAlgorithm::new(AlgorithmName::HS256, b"key").unwrap();
        let other = HmacAlgorithm::new(AlgorithmName::HS256, b"another-key").unwrap();
        let signature = alg.sign(b"payload").unwrap();

        assert_eq!(other.verify(b"payload", &signature), Err(JwtError::InvalidSignature));
        assert_eq!(
            alg.verify(b"payload", &signature[..31]),
            Err(JwtError::InvalidSignature)
        );
        let mut longer = signature.clone();
        longer.push(0);
        assert_eq!(alg.verify(b"payload", &longer), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn debug_output_hides_key() {
        let alg = HmacAlgorithm::new(AlgorithmName::HS512, b"super-secret").unwrap();
        let debug = format!("{alg:?}");
        assert!(debug.contains("HS512"));
        assert!(!debug.contains("super-secret"));
    }
}
