//! Password storage with Argon2id.
//!
//! Hashes are PHC strings, so salt and parameters travel with the hash.
//! Failures inside argon2 are server faults and surface as
//! [`AppError::InternalError`]; a wrong password is just `Ok(false)`.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use quill_core::error::CoreError;

use crate::error::{AppError, AppResult};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))
}

/// Check `password` against a stored PHC hash.
pub fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::InternalError(format!("Stored password hash is malformed: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::InternalError(format!(
            "Password verification failed: {e}"
        ))),
    }
}

/// Minimum length, in characters rather than bytes.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), CoreError> {
    if password.chars().count() < min_length {
        return Err(CoreError::Validation(format!(
            "Password must be at least {min_length} characters long"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn hash_is_argon2id_and_verifies() {
        let hash = hash_password("correct-horse-battery-staple").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct-horse-battery-staple", &hash).unwrap());
        assert!(!verify_password("Correct-horse-battery-staple", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        assert_ne!(hash_password("repeat").unwrap(), hash_password("repeat").unwrap());
    }

    #[test]
    fn malformed_stored_hash_is_internal_error() {
        assert_matches!(
            verify_password("anything", "plaintext-in-db"),
            Err(AppError::InternalError(_))
        );
    }

    #[test]
    fn strength_counts_characters() {
        assert_matches!(
            validate_password_strength("short", 8),
            Err(CoreError::Validation(msg)) if msg.contains("at least 8 characters")
        );
        assert!(validate_password_strength("eightchr", 8).is_ok());
        assert!(validate_password_strength("ééééééé", 8).is_err());
        assert!(validate_password_strength("éééééééé", 8).is_ok());
    }
}
