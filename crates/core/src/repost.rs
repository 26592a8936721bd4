//! Repost request statuses and decision parsing.
//!
//! A request starts as `requested` and the post owner moves it to one of the
//! two terminal states. There is no way back to `requested`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const STATUS_REQUESTED: &str = "requested";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_DENIED: &str = "denied";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepostStatus {
    Requested,
    Approved,
    Denied,
}

impl RepostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RepostStatus::Requested => STATUS_REQUESTED,
            RepostStatus::Approved => STATUS_APPROVED,
            RepostStatus::Denied => STATUS_DENIED,
        }
    }

    /// Parse a stored status value.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            STATUS_REQUESTED => Ok(RepostStatus::Requested),
            STATUS_APPROVED => Ok(RepostStatus::Approved),
            STATUS_DENIED => Ok(RepostStatus::Denied),
            _ => Err(CoreError::Validation(format!(
                "Invalid repost request status '{value}'"
            ))),
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, RepostStatus::Requested)
    }
}

impl fmt::Display for RepostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse the owner's decision on a request.
///
/// Comparison is case-insensitive; only `approved` and `denied` are accepted.
pub fn parse_decision(value: &str) -> Result<RepostStatus, CoreError> {
    match value.trim().to_ascii_lowercase().as_str() {
        STATUS_APPROVED => Ok(RepostStatus::Approved),
        STATUS_DENIED => Ok(RepostStatus::Denied),
        _ => Err(CoreError::Validation("Invalid status choice".to_string())),
    }
}
