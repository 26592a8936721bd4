//! Comment and reply rules.
//!
//! Comments form a two-tier tree: top-level comments hang off a post and
//! replies hang off a top-level comment.

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length for a comment or reply body.
pub const MAX_COMMENT_LENGTH: usize = 500;

pub fn validate_comment_body(body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(CoreError::Validation(
            "Comment body must not be empty".to_string(),
        ));
    }
    if body.chars().count() > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment body must be at most {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Pick the comment a new reply attaches to.
///
/// `target_id` is the comment being replied to and `target_parent_id` its
/// own parent. Replying to a reply attaches to that reply's top-level
/// comment so the tree never grows past two tiers.
pub fn reply_anchor(target_id: DbId, target_parent_id: Option<DbId>) -> DbId {
    target_parent_id.unwrap_or(target_id)
}
