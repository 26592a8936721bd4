//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the session behind a Bearer token.
//! - [`auth::MaybeAuthUser`] -- Same, but anonymous requests are allowed.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireModerator`] -- Requires the `moderator` role.
//! - [`rbac::RequireStaff`] -- Requires `admin` or `moderator`.

pub mod auth;
pub mod rbac;
