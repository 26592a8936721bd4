//! Handlers for the `/repost_request` resource.
//!
//! A user asks to repost someone else's post; the post's owner approves or
//! denies. Lookups are scoped to the caller, so a request the caller may not
//! touch is reported as missing.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use quill_core::error::CoreError;
use quill_core::repost::parse_decision;
use quill_core::types::DbId;
use quill_db::repositories::{PostRepo, RepostRequestRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /repost_request/update_request/{request_id}/`.
#[derive(Debug, Deserialize)]
pub struct UpdateRepostRequest {
    pub status: String,
}

/// POST /api/v1/repost_request/request_repost/{post_id}/
///
/// One request per (requester, post); a second attempt is a 400.
pub async fn request_repost(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    PostRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id: post_id,
        }))?;

    let request = RepostRequestRepo::create_if_absent(&state.pool, auth.user_id, post_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "You have already requested to repost this post".into(),
            ))
        })?;

    tracing::info!(
        request_id = request.id,
        post_id,
        requester_id = auth.user_id,
        "Repost requested"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /api/v1/repost_request/requests_received/
pub async fn requests_received(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let requests = RepostRequestRepo::list_received(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/repost_request/requests_sent/
pub async fn requests_sent(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let requests = RepostRequestRepo::list_sent(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// PUT /api/v1/repost_request/update_request/{request_id}/
///
/// The target post's owner sets `approved` or `denied`.
pub async fn update_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
    AppJson(input): AppJson<UpdateRepostRequest>,
) -> AppResult<impl IntoResponse> {
    RepostRequestRepo::find_for_post_owner(&state.pool, request_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "RepostRequest",
            id: request_id,
        }))?;

    let decision = parse_decision(&input.status)?;

    let updated = RepostRequestRepo::update_status(&state.pool, request_id, decision)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "RepostRequest",
            id: request_id,
        }))?;

    tracing::info!(request_id, status = %decision, owner_id = auth.user_id, "Repost request decided");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/repost_request/delete_request/{request_id}/
///
/// Only the requester may withdraw a request, whatever its status.
pub async fn delete_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    RepostRequestRepo::find_for_requester(&state.pool, request_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "RepostRequest",
            id: request_id,
        }))?;

    RepostRequestRepo::delete(&state.pool, request_id).await?;

    tracing::info!(request_id, requester_id = auth.user_id, "Repost request deleted");

    Ok(StatusCode::NO_CONTENT)
}
