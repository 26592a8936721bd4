//! View recording rules.
//!
//! A view counts unless the viewer wrote the post or viewed it again before
//! the post's cooldown elapsed. The cooldown length in minutes is the
//! post's `min_read` value.

use chrono::Duration;

use crate::error::CoreError;
use crate::post::parse_min_read;
use crate::types::{DbId, Timestamp};

/// Outcome of a view attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewDecision {
    /// Record a new view row.
    Record,
    /// The author viewing their own post; never counted.
    SelfView,
    /// The previous view is still inside the cooldown window.
    CoolingDown { retry_after: Duration },
}

/// Cooldown window for a post, derived from its `min_read` field.
pub fn cooldown_for(min_read: &str) -> Result<Duration, CoreError> {
    Ok(Duration::minutes(i64::from(parse_min_read(min_read)?)))
}

/// Decide whether a view should be recorded.
///
/// A new view is recorded when there is no prior view, or when strictly more
/// than `cooldown` has passed since the latest one.
pub fn evaluate_view(
    viewer: DbId,
    post_owner: Option<DbId>,
    last_view: Option<Timestamp>,
    now: Timestamp,
    cooldown: Duration,
) -> ViewDecision {
    if post_owner == Some(viewer) {
        return ViewDecision::SelfView;
    }

    match last_view {
        None => ViewDecision::Record,
        Some(last) => {
            let elapsed = now - last;
            if elapsed > cooldown {
                ViewDecision::Record
            } else {
                ViewDecision::CoolingDown {
                    retry_after: cooldown - elapsed,
                }
            }
        }
    }
}

impl ViewDecision {
    /// Convert a non-recording decision into the error reported to the caller.
    pub fn into_result(self) -> Result<(), CoreError> {
        match self {
            ViewDecision::Record => Ok(()),
            ViewDecision::SelfView => Err(CoreError::Forbidden(
                "Author's own view is not counted".to_string(),
            )),
            ViewDecision::CoolingDown { retry_after } => Err(CoreError::RateLimited(format!(
                "Cooldown period not elapsed, retry in {} seconds",
                retry_after.num_seconds().max(1)
            ))),
        }
    }
}
