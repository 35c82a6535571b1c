//! # kf-token
//!
//! Token signing and verification for Keyfort.
//!
//! Tokens are compact, tamper-evident HS256 JWTs carrying
//! `{sub, purpose, iat, exp, jti}`. Integrity is protected by a
//! process-wide secret loaded once at startup. Verification uses the
//! verifier's wall clock with zero leeway; callers must tolerate clock
//! skew across processes.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod claims;
pub mod error;
pub mod signer;

pub use claims::{Claims, TokenPurpose};
pub use error::{TokenError, TokenResult};
pub use signer::{decode_unverified, TokenConfig, TokenSigner};
