//! Route definitions for the `/comment` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::comment;
use crate::state::AppState;

/// Routes mounted at `/comment`.
///
/// ```text
/// GET    /comments/{post_id}/                  -> list_comments
/// POST   /create_comment/{post_id}/            -> create_comment (auth)
/// POST   /create_reply/{comment_id}/           -> create_reply (auth)
/// GET    /update_comment/{comment_id}/         -> get_comment
/// PUT    /update_comment/{comment_id}/         -> update_comment (author)
/// DELETE /update_comment/{comment_id}/         -> delete_comment (author)
/// DELETE /moderator_rm_comment/{comment_id}/   -> moderator_remove_comment (moderator)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/comments/{post_id}/", get(comment::list_comments))
        .route("/create_comment/{post_id}/", post(comment::create_comment))
        .route("/create_reply/{comment_id}/", post(comment::create_reply))
        .route(
            "/update_comment/{comment_id}/",
            get(comment::get_comment)
                .put(comment::update_comment)
                .delete(comment::delete_comment),
        )
        .route(
            "/moderator_rm_comment/{comment_id}/",
            delete(comment::moderator_remove_comment),
        )
}
