//! Identifiers and faculty metadata.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Stable identifier assigned to an event when it is created.
///
/// Edits keep the ID; each day of a multi-day add gets its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Generates a fresh random ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The first eight hex digits, for compact listings.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EventId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ValidationError::InvalidId {
                value: s.to_string(),
            })
    }
}

/// Who the schedule belongs to. Used for display and file names only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub semester: String,
}

impl FacultyInfo {
    pub fn new(name: impl Into<String>, semester: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            semester: semester.into(),
        }
    }

    /// Name with whitespace runs replaced by `_`, for file names.
    pub fn name_slug(&self) -> String {
        underscore_whitespace(&self.name)
    }

    /// Semester with whitespace runs replaced by `_`, for file names.
    pub fn semester_slug(&self) -> String {
        underscore_whitespace(&self.semester)
    }
}

fn underscore_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}
