//! Post entity model, read model, and DTOs.

use quill_core::post::PostStatus;
use quill_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub title: String,
    pub body: String,
    pub description: String,
    pub status: String,
    pub min_read: String,
    pub created_at: Timestamp,
    #[serde(rename = "last_updated")]
    pub updated_at: Timestamp,
}

impl Post {
    /// Parsed lifecycle status. The table's `CHECK` constraint keeps this valid;
    /// an unexpected value is treated as the most restrictive state.
    pub fn parsed_status(&self) -> PostStatus {
        PostStatus::parse(&self.status).unwrap_or(PostStatus::Editing)
    }
}

/// Post as returned by the API: joined with its author, the author's bio,
/// and the names of its categories.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostDetail {
    pub id: DbId,
    pub title: String,
    pub user_id: Option<DbId>,
    pub author: Option<String>,
    pub bio: Option<String>,
    pub categories: Vec<String>,
    pub status: String,
    pub min_read: String,
    pub description: String,
    pub body: String,
    pub created_at: Timestamp,
    #[serde(rename = "last_updated")]
    pub updated_at: Timestamp,
}

/// DTO for inserting a post. Fields are already validated and cleaned.
#[derive(Debug)]
pub struct CreatePost {
    pub title: String,
    pub body: String,
    pub description: String,
    pub status: PostStatus,
    pub min_read: String,
}

/// DTO for updating a post. All fields are optional.
#[derive(Debug, Default)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub body: Option<String>,
    pub description: Option<String>,
    pub status: Option<PostStatus>,
    pub min_read: Option<String>,
}
