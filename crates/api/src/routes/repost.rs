//! Route definitions for the `/repost_request` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::repost;
use crate::state::AppState;

/// Routes mounted at `/repost_request`.
///
/// ```text
/// POST   /request_repost/{post_id}/        -> request_repost
/// GET    /requests_received/               -> requests_received
/// GET    /requests_sent/                   -> requests_sent
/// PUT    /update_request/{request_id}/     -> update_request (post owner)
/// DELETE /delete_request/{request_id}/     -> delete_request (requester)
/// ```
///
/// Every route requires authentication.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/request_repost/{post_id}/", post(repost::request_repost))
        .route("/requests_received/", get(repost::requests_received))
        .route("/requests_sent/", get(repost::requests_sent))
        .route("/update_request/{request_id}/", put(repost::update_request))
        .route("/delete_request/{request_id}/", delete(repost::delete_request))
}
