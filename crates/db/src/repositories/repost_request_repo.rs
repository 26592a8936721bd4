//! Repository for the `repost_requests` table.

use quill_core::repost::RepostStatus;
use quill_core::types::DbId;
use sqlx::PgPool;

use crate::models::repost_request::RepostRequest;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "rr.id, rr.requester_id, rr.post_id, rr.status, rr.created_at";

/// Provides CRUD operations for repost requests.
pub struct RepostRequestRepo;

impl RepostRequestRepo {
    /// Create a request in the `requested` state.
    ///
    /// Returns `None` if the requester already has a request for this post.
    pub async fn create_if_absent(
        pool: &PgPool,
        requester_id: DbId,
        post_id: DbId,
    ) -> Result<Option<RepostRequest>, sqlx::Error> {
        sqlx::query_as::<_, RepostRequest>(
            "INSERT INTO repost_requests AS rr (requester_id, post_id, status)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_repost_requests_requester_post DO NOTHING
             RETURNING rr.id, rr.requester_id, rr.post_id, rr.status, rr.created_at",
        )
        .bind(requester_id)
        .bind(post_id)
        .bind(RepostStatus::Requested.as_str())
        .fetch_optional(pool)
        .await
    }

    /// Find a request on a post owned by `owner_id`.
    pub async fn find_for_post_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<RepostRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM repost_requests rr
             INNER JOIN posts p ON p.id = rr.post_id
             WHERE rr.id = $1 AND p.user_id = $2"
        );
        sqlx::query_as::<_, RepostRequest>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a request sent by `requester_id`.
    pub async fn find_for_requester(
        pool: &PgPool,
        id: DbId,
        requester_id: DbId,
    ) -> Result<Option<RepostRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM repost_requests rr
             WHERE rr.id = $1 AND rr.requester_id = $2"
        );
        sqlx::query_as::<_, RepostRequest>(&query)
            .bind(id)
            .bind(requester_id)
            .fetch_optional(pool)
            .await
    }

    /// Requests received on any post owned by `owner_id`, newest first.
    pub async fn list_received(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<RepostRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM repost_requests rr
             INNER JOIN posts p ON p.id = rr.post_id
             WHERE p.user_id = $1
             ORDER BY rr.created_at DESC, rr.id DESC"
        );
        sqlx::query_as::<_, RepostRequest>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Requests sent by `requester_id`, newest first.
    pub async fn list_sent(
        pool: &PgPool,
        requester_id: DbId,
    ) -> Result<Vec<RepostRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM repost_requests rr
             WHERE rr.requester_id = $1
             ORDER BY rr.created_at DESC, rr.id DESC"
        );
        sqlx::query_as::<_, RepostRequest>(&query)
            .bind(requester_id)
            .fetch_all(pool)
            .await
    }

    /// Set a request's status. Returns `None` if the request is gone.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: RepostStatus,
    ) -> Result<Option<RepostRequest>, sqlx::Error> {
        sqlx::query_as::<_, RepostRequest>(
            "UPDATE repost_requests AS rr SET status = $2
             WHERE rr.id = $1
             RETURNING rr.id, rr.requester_id, rr.post_id, rr.status, rr.created_at",
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM repost_requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
