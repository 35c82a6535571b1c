//! # kf-session
//!
//! The Keyfort session manager: turns a verified credential into an
//! access/refresh token pair, tracks which access tokens are live per
//! user, and coordinates revocation across the durable credential store
//! and the fast active-token index.
//!
//! Every operation is a short sequential pipeline of store calls; the
//! first failing step short-circuits the rest and no compensating
//! rollback is attempted. All coordination is delegated to the stores,
//! which are injected at construction so tests can substitute doubles.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod header;
pub mod manager;

pub use error::{SessionError, SessionResult};
pub use header::extract_token;
pub use manager::SessionManager;
