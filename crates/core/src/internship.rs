//! Closed vocabularies for internship postings.
//!
//! Both enums serialize with their capitalised variant names (`"Remote"`,
//! `"Accepting"`, ...) which is also how they are stored in Postgres. Parsing
//! is case-insensitive so `"remote"` from a form field is accepted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseEnumError;

/// Where the intern works.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InternshipMode {
    Remote,
    Hybrid,
    Onsite,
}

impl InternshipMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InternshipMode::Remote => "Remote",
            InternshipMode::Hybrid => "Hybrid",
            InternshipMode::Onsite => "Onsite",
        }
    }
}

/// Whether a posting still takes applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InternshipStatus {
    #[default]
    Accepting,
    Waitlist,
    Closed,
}

impl InternshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InternshipStatus::Accepting => "Accepting",
            InternshipStatus::Waitlist => "Waitlist",
            InternshipStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for InternshipMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for InternshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InternshipMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(InternshipMode::Remote),
            "hybrid" => Ok(InternshipMode::Hybrid),
            "onsite" | "on-site" => Ok(InternshipMode::Onsite),
            _ => Err(ParseEnumError {
                kind: "mode",
                value: s.to_string(),
                expected: "Remote, Hybrid, Onsite",
            }),
        }
    }
}

impl FromStr for InternshipStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accepting" => Ok(InternshipStatus::Accepting),
            "waitlist" => Ok(InternshipStatus::Waitlist),
            "closed" => Ok(InternshipStatus::Closed),
            _ => Err(ParseEnumError {
                kind: "status",
                value: s.to_string(),
                expected: "Accepting, Waitlist, Closed",
            }),
        }
    }
}

impl TryFrom<String> for InternshipMode {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for InternshipStatus {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
