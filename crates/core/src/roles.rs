//! Blog role model.
//!
//! A user holds at most one role record. The role is a single enumerated
//! value, so the three capabilities can never be active at the same time.
//! The string forms must match the `CHECK` constraint on `user_roles.role`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_BLOGGER: &str = "blogger";
pub const ROLE_MODERATOR: &str = "moderator";
pub const ROLE_ADMIN: &str = "admin";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_BLOGGER, ROLE_MODERATOR, ROLE_ADMIN];

/// Role assigned to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Default role given at registration.
    #[default]
    Blogger,
    Moderator,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Blogger => ROLE_BLOGGER,
            Role::Moderator => ROLE_MODERATOR,
            Role::Admin => ROLE_ADMIN,
        }
    }

    /// Parse a stored or client-supplied role name (case-insensitive).
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        match name.trim().to_ascii_lowercase().as_str() {
            ROLE_BLOGGER => Ok(Role::Blogger),
            ROLE_MODERATOR => Ok(Role::Moderator),
            ROLE_ADMIN => Ok(Role::Admin),
            _ => Err(CoreError::Validation(format!(
                "Invalid role '{name}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }

    /// Build a role from the legacy three-flag representation.
    ///
    /// Exactly one flag must be set; anything else is rejected.
    pub fn from_flags(is_moderator: bool, is_blogger: bool, is_admin: bool) -> Result<Self, CoreError> {
        match (is_moderator, is_blogger, is_admin) {
            (true, false, false) => Ok(Role::Moderator),
            (false, true, false) => Ok(Role::Blogger),
            (false, false, true) => Ok(Role::Admin),
            _ => Err(CoreError::Validation(
                "Only one attribute can be True at a time!".to_string(),
            )),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
