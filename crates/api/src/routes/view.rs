//! Route definitions for the `/views` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::view;
use crate::state::AppState;

/// Routes mounted at `/views`.
///
/// ```text
/// POST /create_post_view/{post_id}/  -> create_post_view (auth)
/// GET  /view_count/{post_id}/        -> view_count
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create_post_view/{post_id}/", post(view::create_post_view))
        .route("/view_count/{post_id}/", get(view::view_count))
}
