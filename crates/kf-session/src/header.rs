//! Authorization header parsing.

use crate::error::{SessionError, SessionResult};

/// Extracts the raw token from a scheme-prefixed authorization header
/// value.
///
/// Accepts `Bearer <token>`, `JWT: <token>`, and a bare token.
///
/// # Errors
///
/// Returns `SessionError::TokenMalformed` when no token remains after the
/// scheme prefix is stripped.
pub fn extract_token(header_value: &str) -> SessionResult<&str> {
    let raw = header_value.trim();

    let token = if let Some((_, rest)) = raw.split_once(':') {
        rest.trim()
    } else if let Some((_, rest)) = raw.split_once(char::is_whitespace) {
        rest.trim()
    } else {
        raw
    };

    if token.is_empty() {
        return Err(SessionError::TokenMalformed);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_scheme() {
        assert_eq!(extract_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
    }

    #[test]
    fn colon_scheme() {
        assert_eq!(extract_token("JWT: abc.def.ghi").unwrap(), "abc.def.ghi");
        assert_eq!(extract_token("JWT:abc.def.ghi").unwrap(), "abc.def.ghi");
    }

    #[test]
    fn bare_token() {
        assert_eq!(extract_token("abc.def.ghi").unwrap(), "abc.def.ghi");
    }

    #[test]
    fn empty_value_is_malformed() {
        assert!(matches!(
            extract_token("Bearer "),
            Err(SessionError::TokenMalformed)
        ));
        assert!(matches!(
            extract_token("   "),
            Err(SessionError::TokenMalformed)
        ));
    }
}
