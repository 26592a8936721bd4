//! Handlers for the `/post` resource.
//!
//! Read access follows ownership-or-published; writes are owner-only except
//! the moderator hide action, which forces a post back to `editing`.

use std::collections::BTreeSet;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use quill_core::error::CoreError;
use quill_core::permissions::{can_read_post, is_owner};
use quill_core::post::{
    clean_description, parse_min_read, reconcile_categories, validate_body, validate_title,
    PostStatus,
};
use quill_core::types::DbId;
use quill_core::user::normalize_identity;
use quill_db::models::post::{CreatePost, PostDetail, UpdatePost};
use quill_db::repositories::{CategoryRepo, PostRepo, UserRepo};
use quill_db::DbPool;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::middleware::rbac::{RequireModerator, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Request types
-------------------------------------------------------------------------- */

fn default_min_read() -> String {
    "0".to_string()
}

/// Request body for `POST /post/post_create/`.
///
/// `status` is accepted for compatibility but ignored: new posts are always
/// published.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_min_read")]
    pub min_read: String,
    #[serde(default, alias = "categories")]
    pub category: Vec<DbId>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Request body for `PUT /post/post_detail/{id}/`. Absent fields are left unchanged.
///
/// When `category` is present the post's categories are reconciled to exactly
/// that set.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub description: Option<String>,
    pub min_read: Option<String>,
    pub status: Option<String>,
    #[serde(alias = "categories")]
    pub category: Option<Vec<DbId>>,
}

/* --------------------------------------------------------------------------
Listing
-------------------------------------------------------------------------- */

/// GET /api/v1/post/post_list/
///
/// Every post regardless of status. Admins and moderators only.
pub async fn post_list(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let posts = PostRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/v1/post/public_posts/
pub async fn public_posts(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let posts = PostRepo::list_published(&state.pool).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/v1/post/user_posts/{username}/
///
/// A user's published posts plus the posts they were approved to repost.
pub async fn user_posts(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_username(&state.pool, &normalize_identity(&username))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{username}' not found")))?;

    let posts = PostRepo::list_visible_for_user(&state.pool, user.id).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/v1/post/my_posts/
///
/// The caller's own posts in every status. An empty list is a 200.
pub async fn my_posts(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let posts = PostRepo::list_for_owner(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: posts }))
}

/* --------------------------------------------------------------------------
Create / read / update / delete
-------------------------------------------------------------------------- */

/// POST /api/v1/post/post_create/
///
/// Create a post owned by the caller. The status is forced to `published`.
pub async fn create_post(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreatePostRequest>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title)?;
    validate_body(&input.body)?;
    let description = clean_description(&input.description)?;
    parse_min_read(&input.min_read)?;

    if let Some(requested) = input.status.as_deref() {
        if requested != PostStatus::ON_CREATE.as_str() {
            tracing::debug!(requested, "Ignoring client status on post creation");
        }
    }

    if PostRepo::body_exists(&state.pool, &input.body).await? {
        return Err(AppError::Core(CoreError::Validation(
            "Post with the same body already exists! Please choose another text".into(),
        )));
    }

    let category_ids = ensure_categories_exist(&state.pool, &input.category).await?;

    let create = CreatePost {
        title: input.title,
        body: input.body,
        description,
        status: PostStatus::ON_CREATE,
        min_read: input.min_read.trim().to_string(),
    };

    let mut tx = state.pool.begin().await?;
    let post = PostRepo::create(&mut *tx, auth.user_id, &create).await?;
    PostRepo::attach_categories(&mut tx, post.id, &category_ids).await?;
    tx.commit().await?;

    tracing::info!(post_id = post.id, user_id = auth.user_id, "Post created");

    let detail = load_detail(&state.pool, post.id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/v1/post/post_detail/{id}/
///
/// Anyone may read a published post; other statuses are visible to the owner only.
pub async fn get_post(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = load_detail(&state.pool, post_id).await?;
    let status = PostStatus::parse(&detail.status).unwrap_or(PostStatus::HIDDEN);

    if !can_read_post(viewer.user_id(), detail.user_id, status) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have permission to view this post".into(),
        )));
    }

    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/post/post_detail/{id}/
///
/// Owner-only partial update. Category membership and field changes commit
/// together.
pub async fn update_post(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
    AppJson(input): AppJson<UpdatePostRequest>,
) -> AppResult<impl IntoResponse> {
    let post = PostRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id: post_id,
        }))?;

    if !is_owner(Some(auth.user_id), post.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author can edit this post".into(),
        )));
    }

    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(body) = &input.body {
        validate_body(body)?;
    }
    if let Some(min_read) = &input.min_read {
        parse_min_read(min_read)?;
    }
    let description = input.description.as_deref().map(clean_description).transpose()?;
    let status = input.status.as_deref().map(PostStatus::parse).transpose()?;

    let requested_categories = match &input.category {
        Some(ids) => Some(ensure_categories_exist(&state.pool, ids).await?),
        None => None,
    };

    let update = UpdatePost {
        title: input.title,
        body: input.body,
        description,
        status,
        min_read: input.min_read.map(|m| m.trim().to_string()),
    };

    let mut tx = state.pool.begin().await?;
    PostRepo::update(&mut *tx, post_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id: post_id,
        }))?;

    if let Some(requested) = requested_categories {
        let current = PostRepo::category_ids(&mut tx, post_id).await?;
        let diff = reconcile_categories(&current, &requested);
        if !diff.is_empty() {
            PostRepo::detach_categories(&mut tx, post_id, &diff.to_remove).await?;
            PostRepo::attach_categories(&mut tx, post_id, &diff.to_add).await?;
            tracing::debug!(
                post_id,
                removed = diff.to_remove.len(),
                added = diff.to_add.len(),
                "Post categories reconciled"
            );
        }
    }
    tx.commit().await?;

    tracing::info!(post_id, user_id = auth.user_id, "Post updated");

    let detail = load_detail(&state.pool, post_id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// DELETE /api/v1/post/post_detail/{id}/
pub async fn delete_post(
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

    if !is_owner(Some(auth.user_id), post.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author can delete this post".into(),
        )));
    }

    PostRepo::delete(&state.pool, post_id).await?;

    tracing::info!(post_id, user_id = auth.user_id, "Post deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/post/hide_post/{id}
///
/// Moderator action: force the post into `editing`, whoever owns it.
pub async fn hide_post(
    RequireModerator(moderator): RequireModerator,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    PostRepo::set_status(&state.pool, post_id, PostStatus::HIDDEN)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id: post_id,
        }))?;

    tracing::info!(post_id, moderator_id = moderator.user_id, "Post hidden");

    let detail = load_detail(&state.pool, post_id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

async fn load_detail(pool: &DbPool, post_id: DbId) -> AppResult<PostDetail> {
    PostRepo::find_detail(pool, post_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id: post_id,
        }))
}

/// Deduplicate requested category ids and reject any that do not exist.
async fn ensure_categories_exist(pool: &DbPool, requested: &[DbId]) -> AppResult<Vec<DbId>> {
    let wanted: Vec<DbId> = requested
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if wanted.is_empty() {
        return Ok(wanted);
    }

    let existing = CategoryRepo::existing_ids(pool, &wanted).await?;
    if existing.len() != wanted.len() {
        let missing: Vec<String> = wanted
            .iter()
            .filter(|id| !existing.contains(id))
            .map(ToString::to_string)
            .collect();
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown category id(s): {}",
            missing.join(", ")
        ))));
    }
    Ok(wanted)
}
