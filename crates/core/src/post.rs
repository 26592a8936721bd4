//! Post status, field validation, and category reconciliation.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

pub const STATUS_PUBLISHED: &str = "published";
pub const STATUS_PRIVATE: &str = "private";
pub const STATUS_EDITING: &str = "editing";

/// All valid post status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_PUBLISHED, STATUS_PRIVATE, STATUS_EDITING];

/// Maximum length for a post title.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum length for a post description (after tag stripping).
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/* --------------------------------------------------------------------------
Status
-------------------------------------------------------------------------- */

/// Lifecycle status of a post. No transition graph is enforced between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Published,
    Private,
    Editing,
}

impl PostStatus {
    /// Status assigned by the create path, whatever the client sent.
    pub const ON_CREATE: PostStatus = PostStatus::Published;

    /// Status forced by the moderator hide action.
    pub const HIDDEN: PostStatus = PostStatus::Editing;

    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Published => STATUS_PUBLISHED,
            PostStatus::Private => STATUS_PRIVATE,
            PostStatus::Editing => STATUS_EDITING,
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            STATUS_PUBLISHED => Ok(PostStatus::Published),
            STATUS_PRIVATE => Ok(PostStatus::Private),
            STATUS_EDITING => Ok(PostStatus::Editing),
            _ => Err(CoreError::Validation(format!(
                "Invalid post status '{value}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    pub fn is_published(self) -> bool {
        self == PostStatus::Published
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/* --------------------------------------------------------------------------
Field validation
-------------------------------------------------------------------------- */

/// Remove HTML tags from a description, keeping the text between them.
pub fn strip_html(value: &str) -> String {
    HTML_TAG_RE.replace_all(value, "").into_owned()
}

/// Strip tags from a description and check the resulting length.
pub fn clean_description(value: &str) -> Result<String, CoreError> {
    let cleaned = strip_html(value);
    if cleaned.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description must be at most {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(cleaned)
}

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_body(body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(CoreError::Validation("Body must not be empty".to_string()));
    }
    Ok(())
}

/// Parse `min_read` as whole minutes.
///
/// The value is stored as text but must always be usable as a view cooldown.
pub fn parse_min_read(min_read: &str) -> Result<u32, CoreError> {
    min_read.trim().parse::<u32>().map_err(|_| {
        CoreError::Validation(format!(
            "min_read must be a non-negative whole number of minutes, got '{min_read}'"
        ))
    })
}

/* --------------------------------------------------------------------------
Category reconciliation
-------------------------------------------------------------------------- */

/// Changes needed to move a post from its current category set to a
/// requested one. Categories present in both sets are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryDiff {
    pub to_remove: Vec<DbId>,
    pub to_add: Vec<DbId>,
}

impl CategoryDiff {
    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_add.is_empty()
    }
}

/// Compute the category links to drop and to create.
///
/// Duplicate ids in `requested` are collapsed. Output ids are sorted.
pub fn reconcile_categories(current: &[DbId], requested: &[DbId]) -> CategoryDiff {
    let current: BTreeSet<DbId> = current.iter().copied().collect();
    let requested: BTreeSet<DbId> = requested.iter().copied().collect();

    CategoryDiff {
        to_remove: current.difference(&requested).copied().collect(),
        to_add: requested.difference(&current).copied().collect(),
    }
}
