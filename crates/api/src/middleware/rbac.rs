//! Role-gated extractors layered on [`AuthUser`].
//!
//! The role is read from the session lookup on every request, so a role
//! change applies to sessions that are already open. A user with no role
//! record passes none of these gates.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use quill_core::error::CoreError;
use quill_core::permissions::{is_admin, is_moderator, is_staff};
use quill_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticate, then check the caller's role with `allowed`.
async fn authorize(
    parts: &mut Parts,
    state: &AppState,
    allowed: fn(Option<Role>) -> bool,
    denial: &'static str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if allowed(user.role) {
        Ok(user)
    } else {
        tracing::debug!(user_id = user.user_id, role = ?user.role, denial, "Role check failed");
        Err(AppError::Core(CoreError::Forbidden(denial.into())))
    }
}

/// Admins only. Used by role management.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        authorize(parts, state, is_admin, "Admin role required")
            .await
            .map(RequireAdmin)
    }
}

/// Moderators only: hiding posts and removing comments.
pub struct RequireModerator(pub AuthUser);

impl FromRequestParts<AppState> for RequireModerator {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        authorize(parts, state, is_moderator, "Moderator role required")
            .await
            .map(RequireModerator)
    }
}

/// Admin or moderator.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        authorize(parts, state, is_staff, "Admin or moderator role required")
            .await
            .map(RequireStaff)
    }
}
