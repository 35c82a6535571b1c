//! # kf-model
//!
//! Domain models for Keyfort (credential records and issued token
//! pairs).
//!
//! This crate defines the core entities shared by the storage adapters and
//! the session manager.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod credential;
pub mod token;

pub use credential::{Credential, NewCredential};
pub use token::TokenPair;
