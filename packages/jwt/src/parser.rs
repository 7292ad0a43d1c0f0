//! Compact token parsing and verification
//!
//! Parsing only checks structure. [`parse_and_verify`] additionally requires
//! the header's `alg` to equal the name of the verifier the caller passes
//! in, and rejects the token before any signature check when it does not.
//! The algorithm named inside an untrusted token never selects the
//! verification method.

use crate::algorithms::Verifier;
use crate::encoding::base64_url_decode_into;
use crate::error::{JwtError, JwtResult};
use crate::header::decode_header;
use crate::token::Token;

/// Upper bound on the decoded size of a base64url segment of `len` chars
#[inline]
const fn decoded_len_bound(len: usize) -> usize {
    len.div_ceil(4) * 3
}

fn decode_segment(segment: &[u8], output: &mut [u8], name: &str) -> JwtResult<usize> {
    base64_url_decode_into(segment, output)
        .map_err(|e| JwtError::invalid_format(format!("Invalid base64url in {name} segment: {e}")))
}

/// Parse a compact token without verifying it.
///
/// # Errors
///
/// `InvalidFormat` when the input is not UTF-8, does not have three
/// segments, a segment is not base64url, or the header is not valid JSON.
pub fn parse(raw: &[u8]) -> JwtResult<Token> {
    let raw = std::str::from_utf8(raw)
        .map_err(|_| JwtError::invalid_format("Token is not valid UTF-8"))?;
    parse_owned(raw.to_owned())
}

/// Parse a compact token held in a string without verifying it.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_str(raw: &str) -> JwtResult<Token> {
    parse_owned(raw.to_owned())
}

fn parse_owned(raw: String) -> JwtResult<Token> {
    let bytes = raw.as_bytes();
    let dot1 = bytes
        .iter()
        .position(|&b| b == b'.')
        .ok_or_else(|| JwtError::invalid_format("Token has no segment separators"))?;
    let dot2 = bytes
        .iter()
        .rposition(|&b| b == b'.')
        .ok_or_else(|| JwtError::invalid_format("Token has no segment separators"))?;
    if dot2 <= dot1 + 1 {
        return Err(JwtError::invalid_format(
            "Token must have three segments with a non-empty claims segment",
        ));
    }

    let header_segment = &bytes[..dot1];
    let claims_segment = &bytes[dot1 + 1..dot2];
    let signature_segment = &bytes[dot2 + 1..];

    // claims, then signature, then header scratch space at the tail
    let mut decoded = vec![
        0u8;
        decoded_len_bound(claims_segment.len())
            + decoded_len_bound(signature_segment.len())
            + decoded_len_bound(header_segment.len())
    ];
    let claims_len = decode_segment(claims_segment, &mut decoded, "claims")?;
    let signature_len = decode_segment(signature_segment, &mut decoded[claims_len..], "signature")?;
    let kept = claims_len + signature_len;
    let header_len = decode_segment(header_segment, &mut decoded[kept..], "header")?;

    let header = decode_header(&decoded[kept..kept + header_len])?;
    decoded.truncate(kept);

    tracing::trace!(
        alg = %header.algorithm,
        claims_len,
        signature_len,
        "parsed token"
    );

    Ok(Token::from_parts(
        raw,
        dot1,
        dot2,
        header,
        decoded,
        0..claims_len,
        claims_len..kept,
    ))
}

/// Parse a compact token and verify it with `verifier`.
///
/// # Errors
///
/// `InvalidFormat` as for [`parse`]; `AlgorithmMismatch` when the header
/// names an algorithm other than the verifier's (the signature is then never
/// checked); `InvalidSignature` when the signature does not verify.
pub fn parse_and_verify<V: Verifier + ?Sized>(raw: &[u8], verifier: &V) -> JwtResult<Token> {
    verified(parse(raw)?, verifier)
}

/// [`parse_and_verify`] for a token held in a string.
///
/// # Errors
///
/// See [`parse_and_verify`].
pub fn parse_and_verify_str<V: Verifier + ?Sized>(raw: &str, verifier: &V) -> JwtResult<Token> {
    verified(parse_str(raw)?, verifier)
}

fn verified<V: Verifier + ?Sized>(token: Token, verifier: &V) -> JwtResult<Token> {
    let expected = verifier.algorithm_name();
    let found = &token.header().algorithm;
    if found != expected {
        tracing::debug!(%expected, %found, "rejecting token signed with another algorithm");
        return Err(JwtError::AlgorithmMismatch {
            expected: expected.clone(),
            found: found.clone(),
        });
    }

    if let Err(e) = verifier.verify(token.payload(), token.signature()) {
        tracing::debug!(alg = %expected, "token signature rejected");
        return Err(e);
    }
    tracing::trace!(alg = %expected, "token verified");
    Ok(token)
}
