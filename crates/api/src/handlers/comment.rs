//! Handlers for the `/comment` resource.
//!
//! Comments form a two-tier tree: a reply always hangs off a top-level
//! comment, and its post is inherited from that comment.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use quill_core::comment::{reply_anchor, validate_comment_body};
use quill_core::error::CoreError;
use quill_core::permissions::is_comment_author;
use quill_core::types::DbId;
use quill_db::models::comment::{Comment, CommentThread, CreateComment};
use quill_db::repositories::{CommentRepo, PostRepo};
use quill_db::DbPool;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireModerator;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for creating or editing a comment or reply.
#[derive(Debug, Deserialize)]
pub struct CommentBody {
    pub body: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/comment/comments/{post_id}/
///
/// Top-level comments (newest first), each with its replies (oldest first).
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    PostRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id: post_id,
        }))?;

    let top_level = CommentRepo::list_top_level(&state.pool, post_id).await?;
    let replies = CommentRepo::list_replies_for_post(&state.pool, post_id).await?;

    Ok(Json(DataResponse {
        data: build_threads(top_level, replies),
    }))
}

/// POST /api/v1/comment/create_comment/{post_id}/
///
/// The post must exist and be published.
pub async fn create_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
    AppJson(input): AppJson<CommentBody>,
) -> AppResult<impl IntoResponse> {
    validate_comment_body(&input.body)?;

    let post = PostRepo::find_by_id(&state.pool, post_id)
        .await?
        .filter(|p| p.parsed_status().is_published())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id: post_id,
        }))?;

    let comment = CommentRepo::create(
        &state.pool,
        &CreateComment {
            post_id: post.id,
            author_id: auth.user_id,
            parent_id: None,
            body: input.body,
        },
    )
    .await?;

    tracing::info!(comment_id = comment.id, post_id, user_id = auth.user_id, "Comment created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// POST /api/v1/comment/create_reply/{comment_id}/
///
/// Reply to an existing comment. Replying to a reply attaches to its
/// top-level comment.
pub async fn create_reply(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(comment_id): Path<DbId>,
    AppJson(input): AppJson<CommentBody>,
) -> AppResult<impl IntoResponse> {
    validate_comment_body(&input.body)?;

    let target = find_comment(&state.pool, comment_id).await?;
    let parent_id = reply_anchor(target.id, target.parent_id);

    let reply = CommentRepo::create(
        &state.pool,
        &CreateComment {
            post_id: target.post_id,
            author_id: auth.user_id,
            parent_id: Some(parent_id),
            body: input.body,
        },
    )
    .await?;

    tracing::info!(
        comment_id = reply.id,
        parent_id,
        post_id = target.post_id,
        user_id = auth.user_id,
        "Reply created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: reply })))
}

/// GET /api/v1/comment/update_comment/{comment_id}/
pub async fn get_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let comment = find_comment(&state.pool, comment_id).await?;
    Ok(Json(DataResponse { data: comment }))
}

/// PUT /api/v1/comment/update_comment/{comment_id}/
///
/// Author only.
pub async fn update_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(comment_id): Path<DbId>,
    AppJson(input): AppJson<CommentBody>,
) -> AppResult<impl IntoResponse> {
    let comment = find_comment(&state.pool, comment_id).await?;
    if !is_comment_author(auth.user_id, comment.author_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author can edit this comment".into(),
        )));
    }

    validate_comment_body(&input.body)?;
    CommentRepo::update_body(&state.pool, comment_id, &input.body).await?;

    tracing::info!(comment_id, user_id = auth.user_id, "Comment updated");

    let comment = find_comment(&state.pool, comment_id).await?;
    Ok(Json(DataResponse { data: comment }))
}

/// DELETE /api/v1/comment/update_comment/{comment_id}/
///
/// Author only. Replies go with their parent.
pub async fn delete_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(comment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let comment = find_comment(&state.pool, comment_id).await?;
    if !is_comment_author(auth.user_id, comment.author_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author can delete this comment".into(),
        )));
    }

    CommentRepo::delete(&state.pool, comment_id).await?;

    tracing::info!(comment_id, user_id = auth.user_id, "Comment deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/comment/moderator_rm_comment/{comment_id}/
///
/// Moderator removal, regardless of authorship.
pub async fn moderator_remove_comment(
    RequireModerator(moderator): RequireModerator,
    State(state): State<AppState>,
    Path(comment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = CommentRepo::delete(&state.pool, comment_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id: comment_id,
        }));
    }

    tracing::info!(comment_id, moderator_id = moderator.user_id, "Comment removed by moderator");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_comment(pool: &DbPool, comment_id: DbId) -> AppResult<Comment> {
    CommentRepo::find_by_id(pool, comment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id: comment_id,
        }))
}

/// Attach replies to their top-level comments, keeping both orderings.
///
/// Replies whose parent is not in `top_level` are dropped.
fn build_threads(top_level: Vec<Comment>, replies: Vec<Comment>) -> Vec<CommentThread> {
    let mut by_parent: HashMap<DbId, Vec<Comment>> = HashMap::new();
    for reply in replies {
        if let Some(parent_id) = reply.parent_id {
            by_parent.entry(parent_id).or_default().push(reply);
        }
    }

    top_level
        .into_iter()
        .map(|comment| {
            let replies = by_parent.remove(&comment.id).unwrap_or_default();
            CommentThread {
                replies_count: replies.len(),
                replies,
                comment,
            }
        })
        .collect()
}
