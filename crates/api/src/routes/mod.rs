pub mod category;
pub mod comment;
pub mod health;
pub mod post;
pub mod repost;
pub mod user;
pub mod view;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /category/create_category/                       create (auth)
/// /category/list_categories/                       list with counts
/// /category/posts/{category_name}                  published posts in category
///
/// /post/post_list/                                 all posts (admin or moderator)
/// /post/post_create/                               create (auth)
/// /post/post_detail/{id}/                          get, update, delete
/// /post/public_posts/                              published posts
/// /post/user_posts/{username}/                     published + approved reposts
/// /post/my_posts/                                  caller's posts (auth)
/// /post/hide_post/{id}                             hide (moderator)
///
/// /comment/comments/{post_id}/                     threads for a post
/// /comment/create_comment/{post_id}/               top-level comment (auth)
/// /comment/create_reply/{comment_id}/              reply (auth)
/// /comment/update_comment/{comment_id}/            get, update, delete
/// /comment/moderator_rm_comment/{comment_id}/      remove (moderator)
///
/// /user/register/                                  register (public)
/// /user/login/                                     login (public)
/// /user/logout/                                    logout (auth)
/// /user/update_user/                               username/email (auth)
/// /user/change_password/                           password (auth)
/// /user/update_role/{username}/                    role (admin)
/// /user/update_bio/                                get, update bio (auth)
/// /user/users_list/                                all users
///
/// /repost_request/request_repost/{post_id}/        request (auth)
/// /repost_request/requests_received/               received (auth)
/// /repost_request/requests_sent/                   sent (auth)
/// /repost_request/update_request/{request_id}/     approve/deny (post owner)
/// /repost_request/delete_request/{request_id}/     withdraw (requester)
///
/// /views/create_post_view/{post_id}/               record view (auth)
/// /views/view_count/{post_id}/                     count
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/category", category::router())
        .nest("/post", post::router())
        .nest("/comment", comment::router())
        .nest("/user", user::router())
        .nest("/repost_request", repost::router())
        .nest("/views", view::router())
}
