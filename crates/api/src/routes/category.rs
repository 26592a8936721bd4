//! Route definitions for the `/category` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

/// Routes mounted at `/category`.
///
/// ```text
/// POST /create_category/          -> create_category (auth)
/// GET  /list_categories/          -> list_categories
/// GET  /posts/{category_name}     -> posts_in_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create_category/", post(category::create_category))
        .route("/list_categories/", get(category::list_categories))
        .route("/posts/{category_name}", get(category::posts_in_category))
}
