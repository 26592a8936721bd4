//! Category entity model.

use quill_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    #[serde(rename = "category_name")]
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Category listing entry with post counts (aggregate query result).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryStats {
    pub id: DbId,
    #[serde(rename = "category_name")]
    pub name: String,
    pub num_posts: i64,
    pub num_published_posts: i64,
}
