//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Reads take `&PgPool`; writes that may run inside a transaction take any
//! [`sqlx::PgExecutor`] so handlers can pass either the pool or `&mut *tx`.

pub mod auth_token_repo;
pub mod category_repo;
pub mod comment_repo;
pub mod post_repo;
pub mod repost_request_repo;
pub mod role_repo;
pub mod user_repo;
pub mod view_repo;

pub use auth_token_repo::AuthTokenRepo;
pub use category_repo::CategoryRepo;
pub use comment_repo::CommentRepo;
pub use post_repo::PostRepo;
pub use repost_request_repo::RepostRequestRepo;
pub use role_repo::RoleRepo;
pub use user_repo::UserRepo;
pub use view_repo::ViewRepo;
