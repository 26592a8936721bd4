//! Category name rules.

use crate::error::CoreError;

/// Maximum length for a category name.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 255;

/// Trim a category name and check it is usable.
pub fn clean_category_name(name: &str) -> Result<String, CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation(
            "Category name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_CATEGORY_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Category name must be at most {MAX_CATEGORY_NAME_LENGTH} characters"
        )));
    }
    Ok(name.to_string())
}
