//! Password hashing and verification using Argon2id.
//!
//! Implements NIST SP 800-63B password recommendations:
//! - Argon2id for memory-hard hashing
//! - Secure random salt generation
//!
//! Hashing is deterministic for a fixed `(password, salt)` pair. The salt
//! is generated separately and stored alongside the credential record, so
//! verification re-derives the hash and compares the two strings.

use argon2::password_hash::{PasswordHasher as _, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::{CryptoError, CryptoResult};
use crate::random::random_bytes;

/// Password hashing configuration.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    /// Memory cost in KiB.
    pub memory_cost: u32,
    /// Time cost (iterations).
    pub time_cost: u32,
    /// Parallelism factor.
    pub parallelism: u32,
    /// Output hash length in bytes.
    pub hash_length: u32,
    /// Salt length in bytes.
    pub salt_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        // OWASP recommended settings for Argon2id
        Self {
            memory_cost: 19 * 1024, // 19 MiB
            time_cost: 2,
            parallelism: 1,
            hash_length: 32,
            salt_length: 16,
        }
    }
}

impl PasswordPolicy {
    /// Creates a new password policy with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the memory cost in KiB.
    #[must_use]
    pub const fn memory_cost(mut self, kib: u32) -> Self {
        self.memory_cost = kib;
        self
    }

    /// Sets the time cost (iterations).
    #[must_use]
    pub const fn time_cost(mut self, iterations: u32) -> Self {
        self.time_cost = iterations;
        self
    }

    /// Sets the parallelism factor.
    #[must_use]
    pub const fn parallelism(mut self, p: u32) -> Self {
        self.parallelism = p;
        self
    }

    /// Builds the Argon2 parameters.
    fn build_params(&self) -> Result<Params, argon2::Error> {
        Params::new(
            self.memory_cost,
            self.time_cost,
            self.parallelism,
            Some(self.hash_length as usize),
        )
    }
}

/// Password hasher using Argon2id with explicit salts.
pub struct PasswordHasherService {
    policy: PasswordPolicy,
}

impl PasswordHasherService {
    /// Creates a new password hasher with the given policy.
    #[must_use]
    pub const fn new(policy: PasswordPolicy) -> Self {
        Self { policy }
    }

    /// Creates a new password hasher with default policy.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PasswordPolicy::default())
    }

    /// Generates a fresh random salt, base64-encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if the generated bytes cannot be encoded.
    pub fn generate_salt(&self) -> CryptoResult<String> {
        let bytes = random_bytes(self.policy.salt_length);
        let salt =
            SaltString::encode_b64(&bytes).map_err(|e| CryptoError::Hashing(e.to_string()))?;
        Ok(salt.as_str().to_string())
    }

    /// Hashes a password with the given base64 salt.
    ///
    /// Returns the PHC-formatted hash string. Two calls with identical
    /// inputs yield byte-identical outputs.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidSalt` if the salt cannot be parsed and
    /// `CryptoError::Hashing` if the hash cannot be computed.
    pub fn hash(&self, password: &str, salt: &str) -> CryptoResult<String> {
        let salt =
            SaltString::from_b64(salt).map_err(|e| CryptoError::InvalidSalt(e.to_string()))?;

        let params = self
            .policy
            .build_params()
            .map_err(|e| CryptoError::Hashing(e.to_string()))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CryptoError::Hashing(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Verifies a password by re-deriving the hash with the stored salt.
    ///
    /// # Errors
    ///
    /// Returns an error only when the hash cannot be computed; a wrong
    /// password is `Ok(false)`.
    pub fn verify(&self, password: &str, salt: &str, expected_hash: &str) -> CryptoResult<bool> {
        let derived = self.hash(password, salt)?;
        Ok(derived == expected_hash)
    }
}

impl Default for PasswordHasherService {
    fn default() -> Self {
        Self::with_defaults()
    }
}
