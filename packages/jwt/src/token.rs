//! Built or parsed compact tokens

use crate::error::{JwtError, JwtResult};
use crate::header::Header;
use serde::de::DeserializeOwned;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Placeholder written instead of the signature by [`Token::secure_string`]
const REDACTED_SIGNATURE: &str = "<signature>";

/// An immutable compact token.
///
/// Holds the transmitted string, the decoded header, and the decoded claims
/// and signature bytes. All accessors are views into that state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    raw: String,
    dot1: usize,
    dot2: usize,
    header: Header,
    decoded: Vec<u8>,
    claims: Range<usize>,
    signature: Range<usize>,
}

impl Token {
    pub(crate) fn from_parts(
        raw: String,
        dot1: usize,
        dot2: usize,
        header: Header,
        decoded: Vec<u8>,
        claims: Range<usize>,
        signature: Range<usize>,
    ) -> Self {
        debug_assert!(dot1 < dot2 && dot2 < raw.len());
        debug_assert!(claims.end <= signature.start && signature.end <= decoded.len());
        Self {
            raw,
            dot1,
            dot2,
            header,
            decoded,
            claims,
            signature,
        }
    }

    /// The compact form as bytes
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        self.raw.as_bytes()
    }

    /// The compact form
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Consume the token, returning the compact form
    #[must_use]
    pub fn into_string(self) -> String {
        self.raw
    }

    /// Decoded header
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The header segment, still base64url encoded
    #[must_use]
    pub fn raw_header(&self) -> &[u8] {
        &self.raw.as_bytes()[..self.dot1]
    }

    /// The decoded claims bytes
    #[must_use]
    pub fn raw_claims(&self) -> &[u8] {
        &self.decoded[self.claims.clone()]
    }

    /// The claims segment, still base64url encoded
    #[must_use]
    pub fn encoded_claims(&self) -> &[u8] {
        &self.raw.as_bytes()[self.dot1 + 1..self.dot2]
    }

    /// The signed bytes: `header "." claims` exactly as transmitted
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.raw.as_bytes()[..self.dot2]
    }

    /// The decoded signature bytes
    #[must_use]
    pub fn signature(&self) -> &[u8] {
        &self.decoded[self.signature.clone()]
    }

    /// Deserialize the claims as JSON into `T`.
    ///
    /// # Errors
    ///
    /// `ClaimsEncoding` when the claims are not valid JSON for `T`.
    pub fn decode_claims<T: DeserializeOwned>(&self) -> JwtResult<T> {
        serde_json::from_slice(self.raw_claims())
            .map_err(|e| JwtError::claims_encoding(format!("Failed to decode claims: {e}")))
    }

    /// The compact form with the signature replaced by a placeholder, for
    /// logging a token without making it replayable.
    #[must_use]
    pub fn secure_string(&self) -> String {
        let mut out = String::with_capacity(self.dot2 + 1 + REDACTED_SIGNATURE.len());
        out.push_str(&self.raw[..=self.dot2]);
        out.push_str(REDACTED_SIGNATURE);
        out
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl FromStr for Token {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_str(s)
    }
}
