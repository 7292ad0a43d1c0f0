//! Claims payloads
//!
//! Anything that can become the claims segment of a token implements
//! [`EncodeClaims`]. Raw bytes and strings pass through untouched; structured
//! values go through serde JSON via [`Json`]. [`RegisteredClaims`] models the
//! registered claim names as plain data. Nothing here validates expiry,
//! audience or issuer.

use crate::error::{JwtError, JwtResult};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Produces the bytes of a token's claims segment (before base64url).
pub trait EncodeClaims {
    /// Claims bytes, borrowed when they already exist in encoded form.
    ///
    /// # Errors
    ///
    /// `ClaimsEncoding` when the value cannot be marshaled.
    fn encode_claims(&self) -> JwtResult<Cow<'_, [u8]>>;
}

impl EncodeClaims for [u8] {
    fn encode_claims(&self) -> JwtResult<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl<const N: usize> EncodeClaims for [u8; N] {
    fn encode_claims(&self) -> JwtResult<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl EncodeClaims for Vec<u8> {
    fn encode_claims(&self) -> JwtResult<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl EncodeClaims for str {
    fn encode_claims(&self) -> JwtResult<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }
}

impl EncodeClaims for String {
    fn encode_claims(&self) -> JwtResult<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }
}

impl<T: EncodeClaims + ?Sized> EncodeClaims for &T {
    fn encode_claims(&self) -> JwtResult<Cow<'_, [u8]>> {
        (**self).encode_claims()
    }
}

/// Marshals the wrapped value as JSON claims.
///
/// ```
/// use compact_jwt::claims::{EncodeClaims, Json};
///
/// let claims = Json(serde_json::json!({ "sub": "alice" }));
/// assert_eq!(&*claims.encode_claims().unwrap(), br#"{"sub":"alice"}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Json<T>(pub T);

impl<T: Serialize> EncodeClaims for Json<T> {
    fn encode_claims(&self) -> JwtResult<Cow<'_, [u8]>> {
        marshal(&self.0)
    }
}

fn marshal<T: Serialize + ?Sized>(value: &T) -> JwtResult<Cow<'static, [u8]>> {
    serde_json::to_vec(value)
        .map(Cow::Owned)
        .map_err(|e| JwtError::claims_encoding(format!("Failed to marshal claims: {e}")))
}

/// Intended recipients (`aud`).
///
/// A single recipient is written as a JSON string, several as an array.
/// Both forms are accepted on input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Audience(pub Vec<String>);

impl Audience {
    /// True when there are no recipients
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `recipient` is one of the recipients
    #[must_use]
    pub fn contains(&self, recipient: &str) -> bool {
        self.0.iter().any(|aud| aud == recipient)
    }

    /// Recipients in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for Audience {
    fn from(recipient: &str) -> Self {
        Audience(vec![recipient.to_owned()])
    }
}

impl From<String> for Audience {
    fn from(recipient: String) -> Self {
        Audience(vec![recipient])
    }
}

impl From<Vec<String>> for Audience {
    fn from(recipients: Vec<String>) -> Self {
        Audience(recipients)
    }
}

impl Serialize for Audience {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.as_slice() {
            [single] => serializer.serialize_str(single),
            many => many.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Audience {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            One(String),
            Many(Vec<String>),
        }

        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(single) => Audience(vec![single]),
            OneOrMany::Many(many) => Audience(many),
        })
    }
}

/// Registered claim names (RFC 7519 section 4.1).
///
/// Dates are seconds since the Unix epoch. Empty members are omitted when
/// serialized and unknown members are ignored when deserialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredClaims {
    /// Token identifier
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub jti: String,

    /// Intended recipients
    #[serde(default, skip_serializing_if = "Audience::is_empty")]
    pub aud: Audience,

    /// Issuer
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub iss: String,

    /// Subject
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sub: String,

    /// Expiration time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Not before
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
}

impl EncodeClaims for RegisteredClaims {
    fn encode_claims(&self) -> JwtResult<Cow<'_, [u8]>> {
        marshal(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn raw_bytes_pass_through_borrowed() {
        let raw = br#"{"jti":"x"}"#.to_vec();
        let encoded = raw.encode_claims().unwrap();
        assert!(matches!(encoded, Cow::Borrowed(_)));
        assert_eq!(&*encoded, raw.as_slice());
        assert_eq!(&*"abc".encode_claims().unwrap(), b"abc");
    }

    #[test]
    fn registered_claims_field_order_and_omission() {
        let claims = RegisteredClaims {
            jti: "just an id".to_owned(),
            aud: Audience::from("audience"),
            ..RegisteredClaims::default()
        };
        assert_eq!(
            &*claims.encode_claims().unwrap(),
            br#"{"jti":"just an id","aud":"audience"}"#
        );

        let full = RegisteredClaims {
            jti: "id".to_owned(),
            aud: Audience(vec!["a".to_owned(), "b".to_owned()]),
            iss: "issuer".to_owned(),
            sub: "subject".to_owned(),
            exp: Some(1_700_000_100),
            iat: Some(1_700_000_000),
            nbf: Some(1_700_000_000),
        };
        assert_eq!(
            serde_json::to_string(&full).unwrap(),
            r#"{"jti":"id","aud":["a","b"],"iss":"issuer","sub":"subject","exp":1700000100,"iat":1700000000,"nbf":1700000000}"#
        );
        assert_eq!(serde_json::to_string(&RegisteredClaims::default()).unwrap(), "{}");
    }

    #[test]
    fn audience_accepts_string_or_array() {
        let one: RegisteredClaims = serde_json::from_str(r#"{"aud":"admin"}"#).unwrap();
        assert_eq!(one.aud, Audience::from("admin"));

        let many: RegisteredClaims =
            serde_json::from_str(r#"{"aud":["a","b"],"extra":true}"#).unwrap();
        assert!(many.aud.contains("b"));
        assert_eq!(many.aud.iter().collect::<Vec<_>>(), ["a", "b"]);

        assert!(serde_json::from_str::<Audience>("5").is_err());
    }

    #[test]
    fn json_adapter_marshals_and_reports_failures() {
        let mut map = BTreeMap::new();
        map.insert("role", "admin");
        assert_eq!(&*Json(&map).encode_claims().unwrap(), br#"{"role":"admin"}"#);

        // JSON object keys must be strings
        let mut bad = BTreeMap::new();
        bad.insert(vec![1u8], 1u8);
        assert!(matches!(
            Json(bad).encode_claims(),
            Err(JwtError::ClaimsEncoding(_))
        ));
    }
}
