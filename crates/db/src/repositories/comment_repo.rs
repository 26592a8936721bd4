//! Repository for the `comments` table.

use quill_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CreateComment};

/// Projection joining each comment with its author's username.
const SELECT: &str = "SELECT c.id, c.post_id, c.author_id, u.username AS author_username,
        c.parent_id, c.body, c.created_at
     FROM comments c
     LEFT JOIN users u ON u.id = c.author_id";

/// Provides CRUD operations for comments and replies.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment (or a reply when `parent_id` is set).
    pub async fn create(pool: &PgPool, input: &CreateComment) -> Result<Comment, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            "WITH inserted AS (
                INSERT INTO comments (post_id, author_id, parent_id, body)
                VALUES ($1, $2, $3, $4)
                RETURNING *
             )
             SELECT c.id, c.post_id, c.author_id, u.username AS author_username,
                    c.parent_id, c.body, c.created_at
             FROM inserted c
             LEFT JOIN users u ON u.id = c.author_id",
        )
        .bind(input.post_id)
        .bind(input.author_id)
        .bind(input.parent_id)
        .bind(&input.body)
        .fetch_one(pool)
        .await
    }

    /// Find a comment by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("{SELECT} WHERE c.id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Top-level comments on a post, newest first.
    pub async fn list_top_level(pool: &PgPool, post_id: DbId) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "{SELECT} WHERE c.post_id = $1 AND c.parent_id IS NULL
             ORDER BY c.created_at DESC, c.id DESC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(post_id)
            .fetch_all(pool)
            .await
    }

    /// Every reply on a post, oldest first. Callers group them by `parent_id`.
    pub async fn list_replies_for_post(
        pool: &PgPool,
        post_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "{SELECT} WHERE c.post_id = $1 AND c.parent_id IS NOT NULL
             ORDER BY c.created_at ASC, c.id ASC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(post_id)
            .fetch_all(pool)
            .await
    }

    /// Replace a comment's body. Returns `false` if the comment is gone.
    pub async fn update_body(pool: &PgPool, id: DbId, body: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE comments SET body = $2 WHERE id = $1")
            .bind(id)
            .bind(body)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a comment and, by cascade, its replies.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
