//! Error types for schedule operations.

use thiserror::Error;

use crate::conflict::ConflictSet;
use crate::time::TimeError;
use crate::types::EventId;

/// Rejected user input. The operation made no change.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was missing or blank.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// No days were selected for a new event.
    #[error("at least one day is required")]
    NoDays,

    /// A numeric field was not a number or fell outside its allowed range.
    #[error("{field} is not a valid number of hours: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// Unrecognized hours category.
    #[error("unknown hours type: {value} (expected teaching, student or campus)")]
    UnknownCategory { value: String },

    /// Unrecognized day name.
    #[error("unknown day: {value}")]
    UnknownDay { value: String },

    /// An event ID that is not a UUID.
    #[error("invalid event ID: {value}")]
    InvalidId { value: String },
}

/// Errors from the schedule store and planner.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScheduleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Time(#[from] TimeError),

    /// The new block overlaps existing events.
    #[error("time conflict with existing events:\n{0}")]
    Conflict(ConflictSet),

    /// No event with this ID exists.
    #[error("event not found: {id}")]
    EventNotFound { id: EventId },
}
