//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- signed bearer token issuing and verification.

pub mod jwt;
pub mod password;
