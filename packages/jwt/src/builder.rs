//! Token builder
//!
//! The encoded header is computed once per builder. Each build allocates a
//! single output string sized for header, claims and signature, signs the
//! `header "." claims` prefix in place, then appends the signature.

use crate::algorithms::Signer;
use crate::claims::EncodeClaims;
use crate::encoding::{base64_url_encode_into, encoded_len};
use crate::error::{JwtError, JwtResult};
use crate::header::{DEFAULT_TOKEN_TYPE, Header, encode_header};
use crate::token::Token;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Header members a builder writes next to `alg`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderOptions {
    /// `typ` member; empty to omit
    pub token_type: String,
    /// `cty` member; empty to omit
    pub content_type: String,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            token_type: DEFAULT_TOKEN_TYPE.to_owned(),
            content_type: String::new(),
        }
    }
}

/// Builds signed tokens with one signer and one header.
///
/// A builder holds no mutable state; share it freely when the signer is
/// `Send + Sync`.
#[derive(Debug, Clone)]
pub struct TokenBuilder<S> {
    signer: S,
    header: Header,
    encoded_header: Cow<'static, str>,
}

impl<S: Signer> TokenBuilder<S> {
    /// Builder writing `{"alg":<signer>,"typ":"JWT"}` headers
    ///
    /// # Errors
    ///
    /// `Serialization` when the header cannot be encoded.
    pub fn new(signer: S) -> JwtResult<Self> {
        Self::with_options(signer, BuilderOptions::default())
    }

    /// Builder with custom `typ` / `cty` header members
    ///
    /// # Errors
    ///
    /// `Serialization` when the header cannot be encoded.
    pub fn with_options(signer: S, options: BuilderOptions) -> JwtResult<Self> {
        let header = Header {
            algorithm: signer.algorithm_name().clone(),
            token_type: options.token_type,
            content_type: options.content_type,
        };
        let encoded_header = encode_header(&header)?;
        tracing::debug!(
            alg = %header.algorithm,
            precomputed = matches!(encoded_header, Cow::Borrowed(_)),
            "token builder ready"
        );

        Ok(Self {
            signer,
            header,
            encoded_header,
        })
    }

    /// The header every token from this builder carries
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The base64url encoded header segment
    #[must_use]
    pub fn encoded_header(&self) -> &str {
        &self.encoded_header
    }

    /// The signer in use
    #[must_use]
    pub fn signer(&self) -> &S {
        &self.signer
    }

    /// Build and sign a token carrying `claims`.
    ///
    /// # Errors
    ///
    /// `ClaimsEncoding` when the claims cannot be marshaled or are empty,
    /// or whatever the signer returns.
    pub fn build<C: EncodeClaims + ?Sized>(&self, claims: &C) -> JwtResult<Token> {
        let claims = claims.encode_claims()?;
        if claims.is_empty() {
            return Err(JwtError::claims_encoding("Claims must not be empty"));
        }
        let signature_size = self.signer.signature_size();

        let capacity = self.encoded_header.len()
            + 1
            + encoded_len(claims.len())
            + 1
            + encoded_len(signature_size);
        let mut raw = String::with_capacity(capacity);

        raw.push_str(&self.encoded_header);
        let dot1 = raw.len();
        raw.push('.');
        base64_url_encode_into(&claims, &mut raw);
        let dot2 = raw.len();

        let signature = self.signer.sign(raw.as_bytes())?;
        raw.push('.');
        base64_url_encode_into(&signature, &mut raw);

        tracing::trace!(
            alg = %self.header.algorithm,
            claims_len = claims.len(),
            token_len = raw.len(),
            "built token"
        );

        let claims_len = claims.len();
        let mut decoded = Vec::with_capacity(claims_len + signature.len());
        decoded.extend_from_slice(&claims);
        decoded.extend_from_slice(&signature);
        let signature_range = claims_len..decoded.len();

        Ok(Token::from_parts(
            raw,
            dot1,
            dot2,
            self.header.clone(),
            decoded,
            0..claims_len,
            signature_range,
        ))
    }

    /// Build a token and return its compact form as bytes.
    ///
    /// # Errors
    ///
    /// See [`TokenBuilder::build`].
    pub fn build_bytes<C: EncodeClaims + ?Sized>(&self, claims: &C) -> JwtResult<Vec<u8>> {
        self.build_string(claims).map(String::into_bytes)
    }

    /// Build a token and return its compact form.
    ///
    /// # Errors
    ///
    /// See [`TokenBuilder::build`].
    pub fn build_string<C: EncodeClaims + ?Sized>(&self, claims: &C) -> JwtResult<String> {
        self.build(claims).map(Token::into_string)
    }
}

/// Build a single token with a default header.
///
/// # Errors
///
/// See [`TokenBuilder::new`] and [`TokenBuilder::build`].
pub fn build<S: Signer, C: EncodeClaims + ?Sized>(signer: S, claims: &C) -> JwtResult<Token> {
    TokenBuilder::new(signer)?.build(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{AlgorithmName, HmacAlgorithm, NoneAlgorithm};

    #[test]
    fn output_is_allocated_exactly_once() {
        let signer = HmacAlgorithm::new(AlgorithmName::HS512, b"key").unwrap();
        let builder = TokenBuilder::new(&signer).unwrap();
        for claims in ["1", "{}", r#"{"sub":"x"}"#, r#"{"sub":"xy"}"#] {
            let token = builder.build(claims).unwrap();
            let expected = builder.encoded_header().len()
                + 1
                + encoded_len(claims.len())
                + 1
                + encoded_len(64);
            assert_eq!(token.as_str().len(), expected);
            assert_eq!(token.into_string().capacity(), expected);
        }
    }

    #[test]
    fn empty_claims_are_rejected_before_signing() {
        let signer = HmacAlgorithm::new(AlgorithmName::HS256, b"key").unwrap();
        let builder = TokenBuilder::new(&signer).unwrap();
        assert!(matches!(builder.build(""), Err(JwtError::ClaimsEncoding(_))));
        assert!(matches!(builder.build(&Vec::<u8>::new()), Err(JwtError::ClaimsEncoding(_))));
        assert!(matches!(build(NoneAlgorithm::new(), b""), Err(JwtError::ClaimsEncoding(_))));

        // the shortest accepted claims still round-trip through the parser
        let token = builder.build("1").unwrap();
        let parsed = crate::parser::parse(token.raw()).unwrap();
        assert_eq!(parsed.raw_claims(), b"1");
    }

    #[test]
    fn options_change_the_header() {
        let signer = HmacAlgorithm::new(AlgorithmName::HS256, b"key").unwrap();
        let options = BuilderOptions {
            content_type: "JWT".to_owned(),
            ..BuilderOptions::default()
        };
        let builder = TokenBuilder::with_options(&signer, options).unwrap();
        assert_eq!(
            builder.encoded_header(),
            "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCIsImN0eSI6IkpXVCJ9"
        );
        assert_eq!(builder.header().content_type, "JWT");
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: BuilderOptions = serde_json::from_str(r#"{"content_type":"JWT"}"#).unwrap();
        assert_eq!(options.token_type, "JWT");
        assert_eq!(options.content_type, "JWT");
    }

    #[test]
    fn none_tokens_end_with_a_dot() {
        let token = build(NoneAlgorithm::new(), "{}").unwrap();
        assert_eq!(token.as_str(), "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.e30.");
        assert!(token.signature().is_empty());
    }

    #[test]
    fn signer_failures_propagate() {
        let der = include_bytes!("../tests/fixtures/rsa_public.der");
        let verifier =
            crate::algorithms::RsaAlgorithm::from_public_key_der(AlgorithmName::RS256, der).unwrap();
        assert!(matches!(build(&verifier, "{}"), Err(JwtError::MissingKey(_))));
    }
}
