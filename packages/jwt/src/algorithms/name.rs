//! Algorithm identifiers carried in the `alg` header member

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Name of a JWS signing algorithm, compared by value.
///
/// The well-known names are available as associated constants. Any other
/// string can be represented (a parsed header may carry anything), but no
/// algorithm implementation can be constructed for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlgorithmName(Cow<'static, str>);

impl AlgorithmName {
    /// Ed25519 signature
    pub const EDDSA: AlgorithmName = AlgorithmName::from_static("EdDSA");

    /// HMAC using SHA-256
    pub const HS256: AlgorithmName = AlgorithmName::from_static("HS256");
    /// HMAC using SHA-384
    pub const HS384: AlgorithmName = AlgorithmName::from_static("HS384");
    /// HMAC using SHA-512
    pub const HS512: AlgorithmName = AlgorithmName::from_static("HS512");

    /// RSASSA-PKCS1-v1_5 using SHA-256
    pub const RS256: AlgorithmName = AlgorithmName::from_static("RS256");
    /// RSASSA-PKCS1-v1_5 using SHA-384
    pub const RS384: AlgorithmName = AlgorithmName::from_static("RS384");
    /// RSASSA-PKCS1-v1_5 using SHA-512
    pub const RS512: AlgorithmName = AlgorithmName::from_static("RS512");

    /// RSASSA-PSS using SHA-256
    pub const PS256: AlgorithmName = AlgorithmName::from_static("PS256");
    /// RSASSA-PSS using SHA-384
    pub const PS384: AlgorithmName = AlgorithmName::from_static("PS384");
    /// RSASSA-PSS using SHA-512
    pub const PS512: AlgorithmName = AlgorithmName::from_static("PS512");

    /// ECDSA using P-256 and SHA-256
    pub const ES256: AlgorithmName = AlgorithmName::from_static("ES256");
    /// ECDSA using P-384 and SHA-384
    pub const ES384: AlgorithmName = AlgorithmName::from_static("ES384");
    /// ECDSA using P-521 and SHA-512
    pub const ES512: AlgorithmName = AlgorithmName::from_static("ES512");

    /// Unsecured token, no signature
    pub const NONE: AlgorithmName = AlgorithmName::from_static("none");

    /// Every name this crate can construct an algorithm for.
    pub const WELL_KNOWN: [AlgorithmName; 14] = [
        Self::EDDSA,
        Self::HS256,
        Self::HS384,
        Self::HS512,
        Self::RS256,
        Self::RS384,
        Self::RS512,
        Self::PS256,
        Self::PS384,
        Self::PS512,
        Self::ES256,
        Self::ES384,
        Self::ES512,
        Self::NONE,
    ];

    /// Name backed by a static string
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        AlgorithmName(Cow::Borrowed(name))
    }

    /// Name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the name is one of [`AlgorithmName::WELL_KNOWN`]
    #[must_use]
    pub fn is_well_known(&self) -> bool {
        Self::WELL_KNOWN.iter().any(|known| known == self)
    }
}

impl fmt::Display for AlgorithmName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AlgorithmName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AlgorithmName {
    fn from(name: &str) -> Self {
        Self::WELL_KNOWN
            .iter()
            .find(|known| known.as_str() == name)
            .cloned()
            .unwrap_or_else(|| AlgorithmName(Cow::Owned(name.to_owned())))
    }
}

impl From<String> for AlgorithmName {
    fn from(name: String) -> Self {
        AlgorithmName(Cow::Owned(name))
    }
}

impl FromStr for AlgorithmName {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AlgorithmName::from(s))
    }
}

impl PartialEq<str> for AlgorithmName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for AlgorithmName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
