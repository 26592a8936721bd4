//! Opaque bearer tokens for logged-in sessions.
//!
//! A token is a random UUID v4 handed to the client once at login. Only its
//! SHA-256 hash is stored.
//! Logging out deletes the row; there is nothing to revoke client-side.

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::env_or;

/// Default session lifetime in days.
const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;
/// Default minimum password length.
const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;

/// Session and password policy settings.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Lifetime of a session token in days (default: 30).
    pub token_ttl_days: i64,
    /// Minimum accepted password length in characters (default: 8).
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }
}

impl AuthConfig {
    /// Load auth configuration from environment variables.
    ///
    /// | Env Var               | Default |
    /// |-----------------------|---------|
    /// | `TOKEN_TTL_DAYS`      | `30`    |
    /// | `MIN_PASSWORD_LENGTH` | `8`     |
    pub fn from_env() -> Self {
        let token_ttl_days: i64 = env_or("TOKEN_TTL_DAYS", DEFAULT_TOKEN_TTL_DAYS);
        assert!(token_ttl_days > 0, "TOKEN_TTL_DAYS must be positive");

        Self {
            token_ttl_days,
            min_password_length: env_or("MIN_PASSWORD_LENGTH", DEFAULT_MIN_PASSWORD_LENGTH),
        }
    }

    /// Expiry for a token issued at `now`.
    pub fn expires_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::days(self.token_ttl_days)
    }
}

/// Generate a fresh session token.
///
/// Returns `(plaintext_token, sha256_hex_hash)`. The plaintext goes to the
/// client; only the hash is persisted.
pub fn generate_session_token() -> (String, String) {
    let plaintext = Uuid::new_v4().simple().to_string();
    let hash = hash_session_token(&plaintext);
    (plaintext, hash)
}

/// SHA-256 hex digest of a session token.
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_session_token_hash_matches() {
        let (plaintext, hash) = generate_session_token();

        assert_eq!(hash, hash_session_token(&plaintext));
        assert_eq!(hash.len(), 64);
        assert_ne!(plaintext, hash);
    }

    #[test]
    fn test_tokens_are_unique() {
        let (a, _) = generate_session_token();
        let (b, _) = generate_session_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_expiry_uses_configured_ttl() {
        let config = AuthConfig {
            token_ttl_days: 7,
            ..AuthConfig::default()
        };
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(
            config.expires_at(now),
            Utc.with_ymd_and_hms(2024, 3, 8, 0, 0, 0).unwrap()
        );
    }
}
