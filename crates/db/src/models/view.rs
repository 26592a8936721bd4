//! Post view log model.

use quill_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `post_views` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostView {
    pub id: DbId,
    pub post_id: DbId,
    pub user_id: DbId,
    #[serde(rename = "timestamp")]
    pub created_at: Timestamp,
}
