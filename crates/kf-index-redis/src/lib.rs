//! # kf-index-redis
//!
//! Redis implementation of the Keyfort active-token index.
//!
//! Each user's live access tokens are a Redis set under
//! `<prefix>:tokens:<user_id>`. SADD/SREM give the index its
//! independently-atomic add/remove-child primitives; no read-modify-write
//! of the whole set ever happens.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod index;

pub use config::RedisConfig;
pub use index::RedisTokenIndex;
