pub mod category;
pub mod comment;
pub mod post;
pub mod repost;
pub mod user;
pub mod view;
