//! JOSE header codec
//!
//! A header is serialized as `{"alg":..,"typ":..,"cty":..}` with empty
//! members left out, then base64url encoded. The encoded form of the common
//! `{"alg":<name>,"typ":"JWT"}` header is precomputed once per well-known
//! algorithm name and shared by every builder.

use crate::algorithms::AlgorithmName;
use crate::encoding::base64_url_encode;
use crate::error::{JwtError, JwtResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

/// Token type written by default
pub const DEFAULT_TOKEN_TYPE: &str = "JWT";

/// Decoded JOSE header of a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Signing algorithm (`alg`)
    #[serde(rename = "alg")]
    pub algorithm: AlgorithmName,

    /// Media type of the whole token (`typ`), conventionally `JWT`
    #[serde(rename = "typ", default, skip_serializing_if = "String::is_empty")]
    pub token_type: String,

    /// Media type of the claims (`cty`); empty when absent
    #[serde(rename = "cty", default, skip_serializing_if = "String::is_empty")]
    pub content_type: String,
}

impl Header {
    /// Header with `typ` set to `JWT` and no content type
    #[must_use]
    pub fn new(algorithm: AlgorithmName) -> Self {
        Self {
            algorithm,
            token_type: DEFAULT_TOKEN_TYPE.to_owned(),
            content_type: String::new(),
        }
    }

    fn is_common(&self) -> bool {
        self.token_type == DEFAULT_TOKEN_TYPE && self.content_type.is_empty()
    }
}

static COMMON_HEADERS: Lazy<HashMap<AlgorithmName, String>> = Lazy::new(|| {
    AlgorithmName::WELL_KNOWN
        .iter()
        .filter_map(|name| {
            let header = Header::new(name.clone());
            // serializing a struct of strings into a Vec cannot fail
            let json = serde_json::to_vec(&header).ok()?;
            Some((name.clone(), base64_url_encode(&json)))
        })
        .collect()
});

/// Base64url encoded form of `header`.
///
/// Borrowed from the precomputed table for `{"alg":<well-known>,"typ":"JWT"}`,
/// freshly serialized otherwise.
///
/// # Errors
///
/// `Serialization` when the header cannot be written as JSON.
pub fn encode_header(header: &Header) -> JwtResult<Cow<'static, str>> {
    if header.is_common() {
        if let Some(encoded) = COMMON_HEADERS.get(&header.algorithm) {
            tracing::trace!(alg = %header.algorithm, "using precomputed header");
            return Ok(Cow::Borrowed(encoded.as_str()));
        }
    }

    let json = serde_json::to_vec(header)
        .map_err(|e| JwtError::serialization(format!("Failed to serialize header: {e}")))?;
    tracing::trace!(alg = %header.algorithm, "serialized custom header");
    Ok(Cow::Owned(base64_url_encode(&json)))
}

/// Decode header JSON (already base64url decoded).
///
/// Unknown members are ignored; `typ` and `cty` default to empty.
///
/// # Errors
///
/// `InvalidFormat` when `json` is not a JSON object with a string `alg`.
pub fn decode_header(json: &[u8]) -> JwtResult<Header> {
    serde_json::from_slice(json)
        .map_err(|e| JwtError::invalid_format(format!("Invalid token header: {e}")))
}
