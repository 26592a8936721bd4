pub mod category;
pub mod comment;
pub mod error;
pub mod permissions;
pub mod post;
pub mod repost;
pub mod roles;
pub mod types;
pub mod user;
pub mod views;
