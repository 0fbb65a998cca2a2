//! Domain types shared by the InternHub crates.
//!
//! Nothing in here touches the network or the database; the `db` and `api`
//! crates build on these types.

pub mod error;
pub mod internship;
pub mod roles;
pub mod types;
pub mod validation;
