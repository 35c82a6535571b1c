//! Token signer and verifier.

use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use uuid::Uuid;

use crate::claims::{Claims, TokenPurpose};
use crate::error::{TokenError, TokenResult};

/// Token lifetime configuration.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Access token lifespan in seconds.
    pub access_token_lifespan: i64,
    /// Refresh token lifespan in seconds.
    pub refresh_token_lifespan: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            access_token_lifespan: 300,      // 5 minutes
            refresh_token_lifespan: 86_400,  // 1 day
        }
    }
}

impl TokenConfig {
    /// Returns the lifespan for the given purpose.
    #[must_use]
    pub const fn lifespan(&self, purpose: TokenPurpose) -> i64 {
        match purpose {
            TokenPurpose::Access => self.access_token_lifespan,
            TokenPurpose::Refresh => self.refresh_token_lifespan,
        }
    }
}

/// Signs and verifies tokens with a process-wide HS256 secret.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: TokenConfig,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .field("config", &self.config)
            .finish()
    }
}

impl TokenSigner {
    /// Creates a signer from the process-wide secret.
    #[must_use]
    pub fn new(secret: &[u8], config: TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            config,
        }
    }

    /// Signs the given claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if encoding fails.
    pub fn sign(&self, claims: &Claims) -> TokenResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Issues a fresh token for `user_id` with the configured lifespan for
    /// `purpose`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if encoding fails.
    pub fn issue(&self, user_id: Uuid, purpose: TokenPurpose) -> TokenResult<String> {
        let claims = Claims::new(user_id, purpose, self.config.lifespan(purpose));
        self.sign(&claims)
    }

    /// Verifies signature and expiry, then checks the purpose.
    ///
    /// Expiry is checked against this process's wall clock with zero
    /// leeway.
    ///
    /// # Errors
    ///
    /// - `TokenError::Expired` when the expiry has passed.
    /// - `TokenError::Malformed` when the structure cannot be parsed or
    ///   the signature does not match.
    /// - `TokenError::Invalid` for any other validation failure,
    ///   including a purpose mismatch.
    pub fn verify(&self, token: &str, purpose: TokenPurpose) -> TokenResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(from_jwt_error)?;

        if data.claims.purpose != purpose {
            return Err(TokenError::Invalid(format!(
                "expected {} token, got {}",
                purpose.as_str(),
                data.claims.purpose.as_str()
            )));
        }

        Ok(data.claims)
    }
}

/// Extracts claims without verifying signature or expiry.
///
/// Only for use after the token has already been verified once in the same
/// call, or when claims are needed despite a verification failure (e.g. to
/// know which user's index entry to clean up).
///
/// # Errors
///
/// Returns `TokenError::Malformed` if the payload cannot be parsed at all.
pub fn decode_unverified(token: &str) -> TokenResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|_| TokenError::Malformed)?;

    Ok(data.claims)
}

/// Maps a `jsonwebtoken` error into the token error taxonomy.
fn from_jwt_error(err: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidToken
        | ErrorKind::InvalidSignature
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => TokenError::Malformed,
        _ => TokenError::Invalid(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(b"test-secret", TokenConfig::default())
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let signer = signer();
        let user = Uuid::now_v7();

        let token = signer.issue(user, TokenPurpose::Access).unwrap();
        let claims = signer.verify(&token, TokenPurpose::Access).unwrap();

        assert_eq!(claims.sub, user);
        assert_eq!(claims.purpose, TokenPurpose::Access);
    }

    #[test]
    fn issued_tokens_are_distinct() {
        let signer = signer();
        let user = Uuid::now_v7();

        let a = signer.issue(user, TokenPurpose::Access).unwrap();
        let b = signer.issue(user, TokenPurpose::Access).unwrap();

        // Same subject and second-resolution timestamps; the jti keeps
        // the strings distinct.
        assert_ne!(a, b);
    }

    #[test]
    fn expired_token_is_rejected() {
        let signer = signer();
        let claims = Claims::new(Uuid::now_v7(), TokenPurpose::Refresh, -60);
        let token = signer.sign(&claims).unwrap();

        let err = signer.verify(&token, TokenPurpose::Refresh).unwrap_err();
        assert!(matches!(err, TokenError::Expired));
    }

    #[test]
    fn garbage_is_malformed() {
        let signer = signer();
        let err = signer
            .verify("not-a-token", TokenPurpose::Access)
            .unwrap_err();
        assert!(matches!(err, TokenError::Malformed));
    }

    #[test]
    fn wrong_secret_is_malformed() {
        let signer = signer();
        let other = TokenSigner::new(b"other-secret", TokenConfig::default());

        let token = other.issue(Uuid::now_v7(), TokenPurpose::Access).unwrap();
        let err = signer.verify(&token, TokenPurpose::Access).unwrap_err();
        assert!(matches!(err, TokenError::Malformed));
    }

    #[test]
    fn purpose_mismatch_is_invalid() {
        let signer = signer();
        let token = signer.issue(Uuid::now_v7(), TokenPurpose::Refresh).unwrap();

        let err = signer.verify(&token, TokenPurpose::Access).unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
    }

    #[test]
    fn decode_unverified_recovers_expired_claims() {
        let signer = signer();
        let user = Uuid::now_v7();
        let claims = Claims::new(user, TokenPurpose::Access, -60);
        let token = signer.sign(&claims).unwrap();

        // Verification fails, but the subject is still recoverable for
        // index cleanup.
        assert!(signer.verify(&token, TokenPurpose::Access).is_err());
        let decoded = decode_unverified(&token).unwrap();
        assert_eq!(decoded.sub, user);
    }

    #[test]
    fn decode_unverified_rejects_garbage() {
        let err = decode_unverified("garbage").unwrap_err();
        assert!(matches!(err, TokenError::Malformed));
    }
}
