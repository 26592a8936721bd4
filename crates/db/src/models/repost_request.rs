//! Repost request model.

use quill_core::repost::RepostStatus;
use quill_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `repost_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RepostRequest {
    pub id: DbId,
    pub requester_id: DbId,
    pub post_id: DbId,
    pub status: String,
    pub created_at: Timestamp,
}

impl RepostRequest {
    pub fn parsed_status(&self) -> Option<RepostStatus> {
        RepostStatus::parse(&self.status).ok()
    }
}
