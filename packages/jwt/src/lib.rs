//! Compact JSON Web Tokens
//!
//! This crate builds, parses and verifies tokens in the JWS compact form
//! `b64url(header) "." b64url(claims) "." b64url(signature)` with:
//! - HMAC (`HS256`/`HS384`/`HS512`), RSA PKCS#1 v1.5 (`RS*`), RSA-PSS (`PS*`),
//!   ECDSA (`ES256`/`ES384`/`ES512`), Ed25519 (`EdDSA`) and unsecured `none`
//! - precomputed headers and single-allocation token output
//! - verification bound to the caller's algorithm, never the token's
//!
//! Claims are opaque bytes to the core; validating expiry, audience or
//! issuer is left to the caller.
//!
//! ```
//! use compact_jwt::{AlgorithmName, HmacAlgorithm, TokenBuilder, parse_and_verify_str};
//!
//! let alg = HmacAlgorithm::new(AlgorithmName::HS256, b"secret")?;
//! let token = TokenBuilder::new(&alg)?.build(r#"{"sub":"alice"}"#)?;
//!
//! let parsed = parse_and_verify_str(token.as_str(), &alg)?;
//! assert_eq!(parsed.raw_claims(), br#"{"sub":"alice"}"#);
//! # Ok::<(), compact_jwt::JwtError>(())
//! ```

pub mod algorithms;
pub mod builder;
pub mod claims;
mod encoding;
mod error;
pub mod header;
pub mod parser;
mod token;

pub use algorithms::{
    Algorithm, AlgorithmIdentity, AlgorithmName, EcdsaAlgorithm, EcdsaKey, EdDsaAlgorithm,
    HmacAlgorithm, NoneAlgorithm, RsaAlgorithm, RsaPssAlgorithm, Signer, Verifier,
};
pub use builder::{BuilderOptions, TokenBuilder, build};
pub use claims::{Audience, EncodeClaims, Json, RegisteredClaims};
pub use error::*;
pub use header::Header;
pub use parser::{parse, parse_and_verify, parse_and_verify_str, parse_str};
pub use token::Token;
