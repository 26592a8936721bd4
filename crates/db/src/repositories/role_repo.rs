//! Repository for the `user_roles` table.

use quill_core::roles::Role;
use quill_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::role::UserRole;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, role, bio, created_at, updated_at";

/// Provides read and upsert operations for user role records.
pub struct RoleRepo;

impl RoleRepo {
    /// Create the role record given to every new registration.
    pub async fn create_for_user<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        role: Role,
    ) -> Result<UserRole, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_roles (user_id, role)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRole>(&query)
            .bind(user_id)
            .bind(role.as_str())
            .fetch_one(executor)
            .await
    }

    /// Find the role record for a user, if one exists.
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserRole>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_roles WHERE user_id = $1");
        sqlx::query_as::<_, UserRole>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Set a user's role, creating the record if it is missing.
    ///
    /// Uses `ON CONFLICT (user_id) DO UPDATE` to guarantee one row per user.
    pub async fn upsert_role(
        pool: &PgPool,
        user_id: DbId,
        role: Role,
    ) -> Result<UserRole, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_roles (user_id, role)
             VALUES ($1, $2)
             ON CONFLICT (user_id) DO UPDATE SET role = EXCLUDED.role
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRole>(&query)
            .bind(user_id)
            .bind(role.as_str())
            .fetch_one(pool)
            .await
    }

    /// Replace a user's bio. Returns `None` when the user has no role record.
    pub async fn update_bio(
        pool: &PgPool,
        user_id: DbId,
        bio: &str,
    ) -> Result<Option<UserRole>, sqlx::Error> {
        let query = format!(
            "UPDATE user_roles SET bio = $2
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRole>(&query)
            .bind(user_id)
            .bind(bio)
            .fetch_optional(pool)
            .await
    }
}
