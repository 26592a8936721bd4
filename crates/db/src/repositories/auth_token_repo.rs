//! Repository for the `auth_tokens` table.

use quill_core::types::DbId;
use sqlx::PgPool;

use crate::models::auth_token::{AuthToken, CreateAuthToken, TokenIdentity};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, token_hash, expires_at, created_at, updated_at";

/// Provides operations on login tokens.
pub struct AuthTokenRepo;

impl AuthTokenRepo {
    /// Insert a new token row, returning it.
    pub async fn create(pool: &PgPool, input: &CreateAuthToken) -> Result<AuthToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO auth_tokens (user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuthToken>(&query)
            .bind(input.user_id)
            .bind(&input.token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Resolve an unexpired token hash to the user behind it and their role.
    pub async fn find_identity(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<TokenIdentity>, sqlx::Error> {
        sqlx::query_as::<_, TokenIdentity>(
            "SELECT t.id AS token_id, u.id AS user_id, u.username, r.role
             FROM auth_tokens t
             INNER JOIN users u ON u.id = t.user_id
             LEFT JOIN user_roles r ON r.user_id = u.id
             WHERE t.token_hash = $1
               AND t.expires_at > NOW()",
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await
    }

    /// Delete a single token. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every token of a user except `keep_id`. Returns the count removed.
    pub async fn delete_others_for_user(
        pool: &PgPool,
        user_id: DbId,
        keep_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE user_id = $1 AND id <> $2")
            .bind(user_id)
            .bind(keep_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete expired tokens. Returns the count of deleted rows.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE expires_at < NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
