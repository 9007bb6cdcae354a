//! Application state and the only place it changes.
//!
//! The [`Planner`] owns faculty info, the schedule, totals and notes. Every
//! schedule change goes through the pure store operations, after which totals
//! are rebuilt from the schedule and observers are told what changed.

use std::fmt;

use crate::conflict::{Candidate, Conflict, find_conflicts_excluding};
use crate::error::ScheduleError;
use crate::event::Event;
use crate::export::ExportSnapshot;
use crate::schedule::Schedule;
use crate::snapshot::Snapshot;
use crate::store::{self, EventDraft, EventPatch};
use crate::totals::Totals;
use crate::types::{EventId, FacultyInfo};

/// What a state change did.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// Events created by one add, one per day.
    Added(Vec<Event>),
    /// The event after an edit.
    Edited(Event),
    /// The event that was removed.
    Deleted(Event),
    /// The whole state was replaced (file load).
    Replaced,
    FacultyUpdated,
    NotesUpdated,
}

/// Receives every state change after it is applied.
pub trait PlannerObserver {
    fn on_change(&self, change: &Change, planner: &Planner);
}

/// Result of an edit.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    pub event: Event,
    /// Events on the same day that the edited event now overlaps.
    pub overlaps: Vec<Conflict>,
}

/// Owner of the application state.
#[derive(Default)]
pub struct Planner {
    faculty: FacultyInfo,
    schedule: Schedule,
    totals: Totals,
    notes: String,
    observers: Vec<Box<dyn PlannerObserver>>,
}

impl fmt::Debug for Planner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Planner")
            .field("faculty", &self.faculty)
            .field("events", &self.schedule.len())
            .field("totals", &self.totals)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Planner {
    /// Creates an empty planner for one faculty member.
    pub fn new(faculty: FacultyInfo) -> Self {
        Self {
            faculty,
            ..Self::default()
        }
    }

    /// Builds a planner from loaded state.
    ///
    /// Events are kept exactly as stored, drifted durations included. Totals
    /// are always rebuilt from the schedule.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let (schedule, totals) = normalize(snapshot.schedule, snapshot.totals);
        Self {
            faculty: snapshot.faculty_info,
            schedule,
            totals,
            notes: snapshot.notes,
            observers: Vec::new(),
        }
    }

    /// Current state in save-file shape.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            faculty_info: self.faculty.clone(),
            schedule: self.schedule.clone(),
            totals: self.totals,
            notes: self.notes.clone(),
        }
    }

    /// Read-only view for export sinks.
    pub fn export_snapshot(&self) -> ExportSnapshot<'_> {
        ExportSnapshot {
            faculty: &self.faculty,
            schedule: &self.schedule,
            totals: &self.totals,
            notes: &self.notes,
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn PlannerObserver>) {
        self.observers.push(observer);
    }

    pub const fn faculty(&self) -> &FacultyInfo {
        &self.faculty
    }

    pub const fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub const fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Adds a block on each requested day. Nothing changes on error.
    pub fn add(&mut self, draft: &EventDraft) -> Result<Vec<Event>, ScheduleError> {
        let (schedule, created) = store::add_event(&self.schedule, draft)?;
        self.commit(schedule, Change::Added(created.clone()));
        Ok(created)
    }

    /// Edits one event and reports anything it now overlaps.
    pub fn edit(&mut self, id: EventId, patch: &EventPatch) -> Result<EditOutcome, ScheduleError> {
        let (schedule, event) = store::edit_event(&self.schedule, id, patch)?;

        let overlaps = schedule
            .locate(id)
            .map(|(day, _)| {
                let candidate = Candidate {
                    days: vec![day],
                    start: event.start(),
                    end: event.end(),
                };
                find_conflicts_excluding(&schedule, &candidate, id)
            })
            .unwrap_or_default();
        if !overlaps.is_empty() {
            tracing::warn!(%id, count = overlaps.len(), "edited event overlaps other events");
        }

        self.commit(schedule, Change::Edited(event.clone()));
        Ok(EditOutcome { event, overlaps })
    }

    /// Deletes one event.
    pub fn delete(&mut self, id: EventId) -> Result<Event, ScheduleError> {
        let (schedule, removed) = store::delete_event(&self.schedule, id)?;
        self.commit(schedule, Change::Deleted(removed.clone()));
        Ok(removed)
    }

    /// Replaces the whole state, as when loading a file.
    pub fn replace(&mut self, snapshot: Snapshot) {
        let (schedule, totals) = normalize(snapshot.schedule, snapshot.totals);
        self.faculty = snapshot.faculty_info;
        self.schedule = schedule;
        self.totals = totals;
        self.notes = snapshot.notes;
        self.notify(&Change::Replaced);
    }

    pub fn set_faculty_info(&mut self, faculty: FacultyInfo) {
        self.faculty = faculty;
        self.notify(&Change::FacultyUpdated);
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
        self.notify(&Change::NotesUpdated);
    }

    fn commit(&mut self, schedule: Schedule, change: Change) {
        self.schedule = schedule;
        self.totals = Totals::recompute(&self.schedule);
        tracing::debug!(
            events = self.schedule.len(),
            total_hours = self.totals.total_hours(),
            "schedule updated"
        );
        self.notify(&change);
    }

    fn notify(&self, change: &Change) {
        for observer in &self.observers {
            observer.on_change(change, self);
        }
    }
}

/// Keeps loaded events as stored, warning about drifted durations, and
/// rebuilds totals from them.
fn normalize(schedule: Schedule, stored_totals: Totals) -> (Schedule, Totals) {
    let drifted = schedule
        .iter()
        .filter(|(_, event)| !event.has_consistent_duration())
        .count();
    if drifted > 0 {
        tracing::warn!(drifted, "stored event durations disagree with their times");
    }

    let totals = Totals::recompute(&schedule);
    if totals != stored_totals {
        tracing::warn!(
            stored = stored_totals.total_hours(),
            recomputed = totals.total_hours(),
            "stored totals disagree with schedule; using recomputed totals"
        );
    }
    (schedule, totals)
}
