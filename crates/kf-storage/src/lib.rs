//! # kf-storage
//!
//! Storage abstraction traits for Keyfort.
//!
//! This crate defines the durable-store interfaces that must be
//! implemented by concrete backends (see `kf-storage-sql`).
//!
//! ## Provider Traits
//!
//! - [`CredentialStore`] - per-username credential records
//! - [`RefreshTokenStore`] - outstanding refresh-token records
//!
//! The backing store must guarantee read-your-writes for a single adapter
//! instance.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod credential;
pub mod error;
pub mod refresh;

pub use credential::CredentialStore;
pub use error::{StorageError, StorageResult};
pub use refresh::RefreshTokenStore;
