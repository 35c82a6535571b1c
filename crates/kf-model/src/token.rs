//! Issued token models.

use serde::{Deserialize, Serialize};

/// An access/refresh token pair issued by signup or login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived signed access token.
    pub access_token: String,
    /// Longer-lived, single-use signed refresh token.
    pub refresh_token: String,
}

impl TokenPair {
    /// Creates a new token pair.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_pair_roundtrip() {
        let pair = TokenPair::new("access", "refresh");
        let json = serde_json::to_string(&pair).unwrap();
        let back: TokenPair = serde_json::from_str(&json).unwrap();

        assert_eq!(back.access_token, "access");
        assert_eq!(back.refresh_token, "refresh");
    }
}
