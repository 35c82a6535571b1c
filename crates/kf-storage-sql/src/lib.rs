//! # kf-storage-sql
//!
//! `PostgreSQL` implementations of the Keyfort storage providers.
//!
//! Username uniqueness lives in the database (a unique index on
//! `credentials.username`); the constraint violation is the
//! duplicate-username signal, never a count-then-insert check.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod credential;
pub mod entities;
pub mod error;
pub mod pool;
pub mod refresh;

pub use credential::PgCredentialStore;
pub use pool::{create_pool, run_migrations, PoolConfig};
pub use refresh::PgRefreshTokenStore;
