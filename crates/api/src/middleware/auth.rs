//! Session-token authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use quill_core::error::CoreError;
use quill_core::roles::Role;
use quill_core::types::DbId;
use quill_db::repositories::AuthTokenRepo;

use crate::auth::token::hash_session_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Authenticated user resolved from the `Authorization: Bearer <token>` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub username: String,
    /// Row id of the session token used for this request.
    pub token_id: DbId,
    /// `None` when the user has no role record.
    pub role: Option<Role>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        resolve_session(auth_header, state).await
    }
}

/// Optional authentication: `None` for anonymous requests.
///
/// A header that is present but invalid is still rejected with 401 rather
/// than silently treated as anonymous.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl MaybeAuthUser {
    pub fn user_id(&self) -> Option<DbId> {
        self.0.as_ref().map(|u| u.user_id)
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match parts.headers.get(AUTHORIZATION) {
            None => Ok(MaybeAuthUser(None)),
            Some(value) => {
                let header = value.to_str().map_err(|_| {
                    AppError::Core(CoreError::Unauthorized(
                        "Invalid Authorization header".into(),
                    ))
                })?;
                Ok(MaybeAuthUser(Some(resolve_session(header, state).await?)))
            }
        }
    }
}

async fn resolve_session(auth_header: &str, state: &AppState) -> AppResult<AuthUser> {
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>".into(),
        ))
    })?;

    let identity = AuthTokenRepo::find_identity(&state.pool, &hash_session_token(token.trim()))
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

    Ok(AuthUser {
        user_id: identity.user_id,
        role: identity.parsed_role(),
        username: identity.username,
        token_id: identity.token_id,
    })
}
