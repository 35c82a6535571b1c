//! Token claims model.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a token is good for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPurpose {
    /// Short-lived token authorizing individual requests.
    Access,
    /// Longer-lived, single-use token redeemable for a new access token.
    Refresh,
}

impl TokenPurpose {
    /// Returns the string representation used in token payloads.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

/// The structured payload carried inside a signed token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user this token was issued to.
    pub sub: Uuid,
    /// Token purpose.
    pub purpose: TokenPurpose,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
    /// Unique token id. Two tokens minted in the same second for the same
    /// user must still be distinct strings; the jti guarantees that.
    pub jti: Uuid,
}

impl Claims {
    /// Creates claims expiring `ttl_seconds` from now.
    #[must_use]
    pub fn new(sub: Uuid, purpose: TokenPurpose, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            sub,
            purpose,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            jti: Uuid::new_v4(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purpose_strings() {
        assert_eq!(TokenPurpose::Access.as_str(), "access");
        assert_eq!(TokenPurpose::Refresh.as_str(), "refresh");
    }

    #[test]
    fn ttl_sets_expiry_relative_to_issuance() {
        let claims = Claims::new(Uuid::now_v7(), TokenPurpose::Access, 300);
        assert_eq!(claims.exp - claims.iat, 300);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn negative_ttl_crafts_past_expiry() {
        let claims = Claims::new(Uuid::now_v7(), TokenPurpose::Refresh, -10);
        assert!(claims.exp <= Utc::now().timestamp());
    }

    #[test]
    fn jti_is_unique_per_claims() {
        let user = Uuid::now_v7();
        let a = Claims::new(user, TokenPurpose::Access, 300);
        let b = Claims::new(user, TokenPurpose::Access, 300);
        assert_ne!(a.jti, b.jti);
    }
}
