//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`token`] -- opaque session tokens and their configuration.

pub mod password;
pub mod token;
