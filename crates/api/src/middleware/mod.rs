//! The auth gate.
//!
//! - [`guard`] -- the two guard stages as pure functions.
//! - [`auth::AuthUser`] -- runs `authenticate` and records the identity.
//! - [`rbac::RequireAdmin`] -- runs `authenticate` then `authorize([admin])`.

pub mod auth;
pub mod guard;
pub mod rbac;
