//! RSA-based JWT algorithms
//!
//! RS256/RS384/RS512 use RSASSA-PKCS1-v1_5 and are deterministic.
//! PS256/PS384/PS512 use RSASSA-PSS with a salt as long as the hash output
//! and are randomized. In both cases the payload is hashed first and the
//! padding transform is applied to the digest.

use super::{
    AlgorithmIdentity, AlgorithmName, HashKind, Signer, Verifier, check_signature_len, sealed,
};
use crate::error::{JwtError, JwtResult};
use rand_core::OsRng;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Sign, Pss, RsaPrivateKey, RsaPublicKey};
use sha2::{Sha256, Sha384, Sha512};

/// Smallest modulus accepted, per RFC 7518 §3.3
const MIN_MODULUS_BITS: usize = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Padding {
    Pkcs1v15,
    Pss,
}

impl Padding {
    fn hash_for(self, name: &AlgorithmName) -> Option<HashKind> {
        match (self, name.as_str()) {
            (Padding::Pkcs1v15, "RS256") | (Padding::Pss, "PS256") => Some(HashKind::Sha256),
            (Padding::Pkcs1v15, "RS384") | (Padding::Pss, "PS384") => Some(HashKind::Sha384),
            (Padding::Pkcs1v15, "RS512") | (Padding::Pss, "PS512") => Some(HashKind::Sha512),
            _ => None,
        }
    }
}

/// Shared key handling for both RSA paddings
#[derive(Clone)]
struct RsaCore {
    name: AlgorithmName,
    hash: HashKind,
    padding: Padding,
    public: RsaPublicKey,
    private: Option<RsaPrivateKey>,
}

impl RsaCore {
    fn new(
        padding: Padding,
        name: AlgorithmName,
        private: Option<RsaPrivateKey>,
        public: Option<RsaPublicKey>,
    ) -> JwtResult<Self> {
        let hash = padding
            .hash_for(&name)
            .ok_or_else(|| JwtError::unsupported_algorithm(name.as_str()))?;

        let public = match (public, &private) {
            (Some(public), _) => public,
            (None, Some(private)) => RsaPublicKey::from(private),
            (None, None) => {
                return Err(JwtError::missing_key(format!(
                    "{name} needs a private or a public key"
                )))
            }
        };

        let bits = public.size() * 8;
        if bits < MIN_MODULUS_BITS {
            return Err(JwtError::invalid_key(format!(
                "RSA modulus of {bits} bits is below {MIN_MODULUS_BITS}"
            )));
        }

        Ok(Self {
            name,
            hash,
            padding,
            public,
            private,
        })
    }

    fn from_pkcs8_der(padding: Padding, name: AlgorithmName, der: &[u8]) -> JwtResult<Self> {
        let private = RsaPrivateKey::from_pkcs8_der(der)
            .map_err(|e| JwtError::invalid_key(format!("Invalid RSA private key: {e}")))?;
        Self::new(padding, name, Some(private), None)
    }

    fn from_public_key_der(padding: Padding, name: AlgorithmName, der: &[u8]) -> JwtResult<Self> {
        let public = RsaPublicKey::from_public_key_der(der)
            .map_err(|e| JwtError::invalid_key(format!("Invalid RSA public key: {e}")))?;
        Self::new(padding, name, None, Some(public))
    }

    fn pkcs1v15(&self) -> Pkcs1v15Sign {
        match self.hash {
            HashKind::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
            HashKind::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
            HashKind::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
        }
    }

    fn pss(&self) -> Pss {
        match self.hash {
            HashKind::Sha256 => Pss::new::<Sha256>(),
            HashKind::Sha384 => Pss::new::<Sha384>(),
            HashKind::Sha512 => Pss::new::<Sha512>(),
        }
    }

    fn signature_size(&self) -> usize {
        self.public.size()
    }

    fn sign(&self, payload: &[u8]) -> JwtResult<Vec<u8>> {
        let private = self
            .private
            .as_ref()
            .ok_or_else(|| JwtError::missing_key(format!("Private key required for {}", self.name)))?;

        let digest = self.hash.digest(payload);
        let signed = match self.padding {
            Padding::Pkcs1v15 => private.sign(self.pkcs1v15(), &digest),
            Padding::Pss => private.sign_with_rng(&mut OsRng, self.pss(), &digest),
        };
        signed.map_err(|e| JwtError::signing_error(format!("{} signing failed: {e}", self.name)))
    }

    fn verify(&self, payload: &[u8], signature: &[u8]) -> JwtResult<()> {
        check_signature_len(signature, self.signature_size())?;

        let digest = self.hash.digest(payload);
        let verified = match self.padding {
            Padding::Pkcs1v15 => self.public.verify(self.pkcs1v15(), &digest, signature),
            Padding::Pss => self.public.verify(self.pss(), &digest, signature),
        };
        verified.map_err(|_| JwtError::InvalidSignature)
    }
}

impl std::fmt::Debug for RsaCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaKeys")
            .field("name", &self.name)
            .field("modulus_bits", &(self.public.size() * 8))
            .field("can_sign", &self.private.is_some())
            .finish()
    }
}

/// RSASSA-PKCS1-v1_5 signer and verifier (RS256, RS384, RS512).
#[derive(Debug, Clone)]
pub struct RsaAlgorithm(RsaCore);

/// RSASSA-PSS signer and verifier (PS256, PS384, PS512).
///
/// Signs and verifies with a salt exactly as long as the hash output
/// (RFC 7518 §3.5). Signatures made with any other salt length, such as the
/// maximum-length salt some issuers default to, fail verification with
/// `InvalidSignature`.
#[derive(Debug, Clone)]
pub struct RsaPssAlgorithm(RsaCore);

macro_rules! rsa_constructors {
    ($ty:ident, $padding:expr, $family:literal) => {
        impl $ty {
            #[doc = concat!("Create an ", $family, " algorithm from a private and/or public key.")]
            ///
            /// When only the private key is given the public key is derived
            /// from it. Signing needs the private key.
            ///
            /// # Errors
            ///
            /// `MissingKey` when both keys are absent, `UnsupportedAlgorithm`
            /// when `name` is outside the family, `InvalidKey` for a modulus
            /// under 2048 bits.
            pub fn new(
                name: AlgorithmName,
                private: Option<RsaPrivateKey>,
                public: Option<RsaPublicKey>,
            ) -> JwtResult<Self> {
                RsaCore::new($padding, name, private, public).map(Self)
            }

            /// Signing algorithm from a private key.
            ///
            /// # Errors
            ///
            #[doc = concat!("See [`", stringify!($ty), "::new`].")]
            pub fn signer(name: AlgorithmName, private: RsaPrivateKey) -> JwtResult<Self> {
                Self::new(name, Some(private), None)
            }

            /// Verification-only algorithm from a public key.
            ///
            /// # Errors
            ///
            #[doc = concat!("See [`", stringify!($ty), "::new`].")]
            pub fn verifier(name: AlgorithmName, public: RsaPublicKey) -> JwtResult<Self> {
                Self::new(name, None, Some(public))
            }

            /// Load the private key from PKCS#8 DER.
            ///
            /// # Errors
            ///
            /// `InvalidKey` when the DER does not hold an RSA private key.
            pub fn from_pkcs8_der(name: AlgorithmName, der: &[u8]) -> JwtResult<Self> {
                RsaCore::from_pkcs8_der($padding, name, der).map(Self)
            }

            /// Load a verification-only key from SubjectPublicKeyInfo DER.
            ///
            /// # Errors
            ///
            /// `InvalidKey` when the DER does not hold an RSA public key.
            pub fn from_public_key_der(name: AlgorithmName, der: &[u8]) -> JwtResult<Self> {
                RsaCore::from_public_key_der($padding, name, der).map(Self)
            }

            /// The public half of the key
            #[must_use]
            pub fn public_key(&self) -> &RsaPublicKey {
                &self.0.public
            }
        }

        impl sealed::Sealed for $ty {}

        impl AlgorithmIdentity for $ty {
            fn algorithm_name(&self) -> &AlgorithmName {
                &self.0.name
            }
        }

        impl Signer for $ty {
            fn signature_size(&self) -> usize {
                self.0.signature_size()
            }

            fn sign(&self, payload: &[u8]) -> JwtResult<Vec<u8>> {
                self.0.sign(payload)
            }
        }

        impl Verifier for $ty {
            fn verify(&self, payload: &[u8], signature: &[u8]) -> JwtResult<()> {
                self.0.verify(payload, signature)
            }
        }
    };
}

rsa_constructors!(RsaAlgorithm, Padding::Pkcs1v15, "RSASSA-PKCS1-v1_5");
rsa_constructors!(RsaPssAlgorithm, Padding::Pss, "RSASSA-PSS");
