//! Repository for the `post_views` table.
//!
//! Recording a view is a read-then-write; callers hold [`ViewRepo::lock_viewer`]
//! inside a transaction so concurrent attempts by the same viewer serialize.

use quill_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::models::view::PostView;

/// Advisory lock namespace for view recording.
const VIEW_LOCK_NAMESPACE: i32 = 0x5649;

pub struct ViewRepo;

impl ViewRepo {
    /// Take a transaction-scoped advisory lock on (post, viewer).
    pub async fn lock_viewer(
        conn: &mut PgConnection,
        post_id: DbId,
        user_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock($1, hashtext($2::TEXT || ':' || $3::TEXT))")
            .bind(VIEW_LOCK_NAMESPACE)
            .bind(post_id)
            .bind(user_id)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Timestamp of the viewer's most recent recorded view of a post.
    pub async fn latest_for_viewer(
        conn: &mut PgConnection,
        post_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        sqlx::query_scalar::<_, Timestamp>(
            "SELECT created_at FROM post_views
             WHERE post_id = $1 AND user_id = $2
             ORDER BY created_at DESC
             LIMIT 1",
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_optional(conn)
        .await
    }

    /// Append a view row stamped with `at`.
    pub async fn insert(
        conn: &mut PgConnection,
        post_id: DbId,
        user_id: DbId,
        at: Timestamp,
    ) -> Result<PostView, sqlx::Error> {
        sqlx::query_as::<_, PostView>(
            "INSERT INTO post_views (post_id, user_id, created_at)
             VALUES ($1, $2, $3)
             RETURNING id, post_id, user_id, created_at",
        )
        .bind(post_id)
        .bind(user_id)
        .bind(at)
        .fetch_one(conn)
        .await
    }

    /// Number of recorded views for a post.
    pub async fn count_for_post(pool: &PgPool, post_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM post_views WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(pool)
            .await
    }
}
