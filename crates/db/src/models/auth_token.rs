//! Bearer token model.

use quill_core::roles::Role;
use quill_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `auth_tokens` table.
#[derive(Debug, Clone, FromRow)]
pub struct AuthToken {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new token row.
pub struct CreateAuthToken {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}

/// Identity resolved from a live token: the token row, its user, and the
/// user's role (if a role record exists).
#[derive(Debug, Clone, FromRow)]
pub struct TokenIdentity {
    pub token_id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub role: Option<String>,
}

impl TokenIdentity {
    pub fn parsed_role(&self) -> Option<Role> {
        self.role.as_deref().and_then(|r| Role::parse(r).ok())
    }
}
