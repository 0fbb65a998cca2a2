//! Business logic behind the HTTP handlers.
//!
//! Services own the rules (validation, defaults, error mapping) and talk to
//! the store traits only, so they run unchanged against Postgres or the
//! in-memory store.

pub mod credentials;
pub mod internships;
