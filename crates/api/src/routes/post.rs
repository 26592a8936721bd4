//! Route definitions for the `/post` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::post as handlers;
use crate::state::AppState;

/// Routes mounted at `/post`.
///
/// ```text
/// GET    /post_list/              -> post_list (admin or moderator)
/// POST   /post_create/            -> create_post (auth)
/// GET    /post_detail/{id}/       -> get_post
/// PUT    /post_detail/{id}/       -> update_post (owner)
/// DELETE /post_detail/{id}/       -> delete_post (owner)
/// GET    /public_posts/           -> public_posts
/// GET    /user_posts/{username}/  -> user_posts
/// GET    /my_posts/               -> my_posts (auth)
/// PUT    /hide_post/{id}          -> hide_post (moderator)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/post_list/", get(handlers::post_list))
        .route("/post_create/", post(handlers::create_post))
        .route(
            "/post_detail/{id}/",
            get(handlers::get_post)
                .put(handlers::update_post)
                .delete(handlers::delete_post),
        )
        .route("/public_posts/", get(handlers::public_posts))
        .route("/user_posts/{username}/", get(handlers::user_posts))
        .route("/my_posts/", get(handlers::my_posts))
        .route("/hide_post/{id}", put(handlers::hide_post))
}
