//! Per-user role record.

use quill_core::roles::Role;
use quill_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_roles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserRole {
    pub id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub bio: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserRole {
    /// Parsed role. An unrecognised stored value grants nothing.
    pub fn parsed_role(&self) -> Option<Role> {
        Role::parse(&self.role).ok()
    }
}
