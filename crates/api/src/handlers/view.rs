//! Handlers for the `/views` resource.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use quill_core::error::CoreError;
use quill_core::types::DbId;
use quill_core::views::{cooldown_for, evaluate_view};
use quill_db::repositories::{PostRepo, ViewRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ViewCount {
    pub view_count: i64,
}

/// POST /api/v1/views/create_post_view/{post_id}/
///
/// Record a view unless the caller wrote the post (403) or viewed it within
/// the last `min_read` minutes (429).
pub async fn create_post_view(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = PostRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id: post_id,
        }))?;
    let cooldown = cooldown_for(&post.min_read)?;

    let mut tx = state.pool.begin().await?;
    ViewRepo::lock_viewer(&mut tx, post_id, auth.user_id).await?;
    let last_view = ViewRepo::latest_for_viewer(&mut tx, post_id, auth.user_id).await?;

    let now = Utc::now();
    let decision = evaluate_view(auth.user_id, post.user_id, last_view, now, cooldown);
    if let Err(err) = decision.into_result() {
        tracing::debug!(post_id, viewer_id = auth.user_id, ?decision, "View not counted");
        return Err(err.into());
    }

    let view = ViewRepo::insert(&mut tx, post_id, auth.user_id, now).await?;
    tx.commit().await?;

    tracing::info!(post_id, viewer_id = auth.user_id, "View recorded");

    Ok(Json(DataResponse { data: view }))
}

/// GET /api/v1/views/view_count/{post_id}/
///
/// A post with no recorded views is reported as 404 rather than zero.
pub async fn view_count(
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    PostRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id: post_id,
        }))?;

    let view_count = ViewRepo::count_for_post(&state.pool, post_id).await?;
    if view_count == 0 {
        return Err(AppError::NotFound("No views found for this post".into()));
    }

    Ok(Json(DataResponse {
        data: ViewCount { view_count },
    }))
}
