//! Comment and reply models.

use quill_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `comments` table joined with the author's username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub post_id: DbId,
    #[serde(rename = "author")]
    pub author_id: Option<DbId>,
    pub author_username: Option<String>,
    pub parent_id: Option<DbId>,
    pub body: String,
    pub created_at: Timestamp,
}

/// A top-level comment with its replies, as listed under a post.
#[derive(Debug, Clone, Serialize)]
pub struct CommentThread {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies_count: usize,
    pub replies: Vec<Comment>,
}

/// DTO for creating a comment or a reply.
#[derive(Debug)]
pub struct CreateComment {
    pub post_id: DbId,
    pub author_id: DbId,
    pub parent_id: Option<DbId>,
    pub body: String,
}
