//! # kf-crypto
//!
//! Password hashing for Keyfort using Argon2id.
//!
//! Unlike the usual PHC embed-the-salt flow, hashing here takes an explicit
//! salt: credential verification re-derives the hash with the stored salt
//! and compares it to the stored value, so `hash(password, salt)` must be
//! byte-identical across calls with identical inputs.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod password;
pub mod random;

pub use error::{CryptoError, CryptoResult};
pub use password::{PasswordHasherService, PasswordPolicy};
pub use random::random_bytes;
