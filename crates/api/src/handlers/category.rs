//! Handlers for the `/category` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use quill_core::category::{clean_category_name, MAX_CATEGORY_NAME_LENGTH};
use quill_core::error::CoreError;
use quill_core::types::DbId;
use quill_db::repositories::{CategoryRepo, PostRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// `validator` length bounds are `u64`.
const MAX_CATEGORY_NAME_LENGTH_U64: u64 = MAX_CATEGORY_NAME_LENGTH as u64;

/// Request body for `POST /category/create_category/`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = MAX_CATEGORY_NAME_LENGTH_U64))]
    pub category_name: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedCategory {
    pub category_id: DbId,
}

/// POST /api/v1/category/create_category/
///
/// Create a uniquely named category. A duplicate name is a 400.
pub async fn create_category(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCategoryRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let name = clean_category_name(&input.category_name)?;

    let category = CategoryRepo::create_if_absent(&state.pool, &name)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Category with this name already exists".into(),
            ))
        })?;

    tracing::info!(category_id = category.id, user_id = auth.user_id, "Category created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedCategory {
                category_id: category.id,
            },
        }),
    ))
}

/// GET /api/v1/category/list_categories/
///
/// All categories with total and published post counts.
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list_with_counts(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/category/posts/{category_name}
///
/// Published posts in a category, looked up by name ignoring case.
pub async fn posts_in_category(
    State(state): State<AppState>,
    Path(category_name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_name_ci(&state.pool, category_name.trim())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category '{category_name}' not found")))?;

    let posts = PostRepo::list_published_in_category(&state.pool, category.id).await?;
    Ok(Json(DataResponse { data: posts }))
}
