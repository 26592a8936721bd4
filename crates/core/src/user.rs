//! User identity normalization and profile validation.

use crate::error::CoreError;

/// Maximum length for a username.
pub const MAX_USERNAME_LENGTH: usize = 150;

/// Maximum length for a user's bio.
pub const MAX_BIO_LENGTH: usize = 500;

/// Usernames and emails are stored case-folded and trimmed.
pub fn normalize_identity(value: &str) -> String {
    value.trim().to_lowercase()
}

pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if username.is_empty() {
        return Err(CoreError::Validation("Username must not be empty".to_string()));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Username must be at most {MAX_USERNAME_LENGTH} characters"
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(
            "Username must not contain whitespace".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_bio(bio: &str) -> Result<(), CoreError> {
    if bio.chars().count() > MAX_BIO_LENGTH {
        return Err(CoreError::Validation(format!(
            "Bio must be at most {MAX_BIO_LENGTH} characters"
        )));
    }
    Ok(())
}

/// The new password must be typed twice identically.
pub fn check_password_confirmation(new_password: &str, confirm_password: &str) -> Result<(), CoreError> {
    if new_password != confirm_password {
        return Err(CoreError::Validation(
            "New password and confirmation do not match.".to_string(),
        ));
    }
    Ok(())
}
