//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) where the entity is mutable

pub mod auth_token;
pub mod category;
pub mod comment;
pub mod post;
pub mod repost_request;
pub mod role;
pub mod user;
pub mod view;
