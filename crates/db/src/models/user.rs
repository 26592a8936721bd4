//! User entity model and DTOs.

use quill_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserListItem`] or a handler-specific type for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public user listing entry, with the bio from the role record if any.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserListItem {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
}

/// DTO for creating a new user. Username and email are already case-folded.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Default)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
}
