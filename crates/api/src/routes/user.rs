//! Route definitions for the `/user` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// POST     /register/                -> register
/// POST     /login/                   -> login
/// GET|POST /logout/                  -> logout (auth)
/// PUT      /update_user/             -> update_user (auth)
/// PUT      /change_password/         -> change_password (auth)
/// PUT      /update_role/{username}/  -> update_role (admin)
/// GET|PUT  /update_bio/              -> get_bio, update_bio (auth)
/// GET      /users_list/              -> users_list
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register/", post(user::register))
        .route("/login/", post(user::login))
        .route("/logout/", get(user::logout).post(user::logout))
        .route("/update_user/", put(user::update_user))
        .route("/change_password/", put(user::change_password))
        .route("/update_role/{username}/", put(user::update_role))
        .route("/update_bio/", get(user::get_bio).put(user::update_bio))
        .route("/users_list/", get(user::users_list))
}
