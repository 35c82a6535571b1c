//! # kf-index
//!
//! Active-token index abstraction for Keyfort.
//!
//! The index is a fast per-user keyed store mapping a user id to the set
//! of access-token strings currently considered live. It is the sole
//! mechanism for revoking an access token before its natural expiry.
//! The primary implementation is Redis-based (see `kf-index-redis`).

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod provider;

pub use error::{IndexError, IndexResult};
pub use provider::ActiveTokenIndex;
