//! Core domain logic for the faculty schedule planner.
//!
//! This crate contains the fundamental types and logic for:
//! - Time arithmetic: parsing `HH:MM` and computing billed durations
//! - Conflict detection: overlapping blocks on the same day
//! - The schedule store: pure add/edit/delete over one week of events
//! - Totals: per-category hours, overload and temporary teaching
//! - The planner: the single owner of application state

mod conflict;
pub mod day;
mod error;
pub mod event;
pub mod export;
mod planner;
mod schedule;
mod snapshot;
pub mod store;
pub mod time;
mod totals;
pub mod types;

pub use conflict::{Candidate, Conflict, ConflictSet, find_conflicts, find_conflicts_excluding};
pub use day::Day;
pub use error::{ScheduleError, ValidationError};
pub use event::{Category, Event, EventKind, Temporary};
pub use planner::{Change, EditOutcome, Planner, PlannerObserver};
pub use schedule::Schedule;
pub use snapshot::Snapshot;
pub use store::{EventDraft, EventPatch, add_event, delete_event, edit_event};
pub use time::{Granularity, TimeError, TimeOfDay};
pub use totals::{Bucket, Contribution, Totals};
pub use types::{EventId, FacultyInfo};
