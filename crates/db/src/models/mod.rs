pub mod internship;
pub mod user;
