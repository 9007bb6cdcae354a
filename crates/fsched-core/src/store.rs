//! Pure add/edit/delete over a [`Schedule`].
//!
//! Every operation borrows the current schedule and returns a new one, or an
//! error with no change. Totals are derived separately (see [`crate::Totals`]).

use chrono::{Duration, NaiveDate};

use crate::conflict::{Candidate, ConflictSet, find_conflicts};
use crate::day::Day;
use crate::error::{ScheduleError, ValidationError};
use crate::event::{Category, Event, EventKind, Temporary};
use crate::schedule::Schedule;
use crate::time::{self, TimeOfDay};
use crate::types::EventId;

/// User input for a new block, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub category: Option<Category>,
    pub days: Vec<Day>,
    pub start: Option<TimeOfDay>,
    pub end: Option<TimeOfDay>,
    pub description: Option<String>,
    pub class_name: Option<String>,
    pub class_location: Option<String>,
    pub is_overload: bool,
    pub is_temporary: bool,
    /// Counted hours as typed; parsed during validation.
    pub counted_hours: Option<String>,
    pub expected_end_date: Option<NaiveDate>,
}

/// Changes to an existing block. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub category: Option<Category>,
    pub start: Option<TimeOfDay>,
    pub end: Option<TimeOfDay>,
    /// `Some("")` clears the description.
    pub description: Option<String>,
    pub class_name: Option<String>,
    pub class_location: Option<String>,
    pub is_overload: Option<bool>,
    pub is_temporary: Option<bool>,
    pub counted_hours: Option<String>,
    pub expected_end_date: Option<NaiveDate>,
}

/// Trims and drops blank text.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn require(value: Option<&str>, field: &'static str) -> Result<String, ValidationError> {
    non_blank(value).ok_or(ValidationError::MissingField { field })
}

fn parse_counted_hours(raw: &str) -> Result<Duration, ValidationError> {
    let invalid = || ValidationError::InvalidNumber {
        field: "countedHours",
        value: raw.to_string(),
    };
    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    time::from_counted_hours(value).ok_or_else(invalid)
}

impl EventDraft {
    /// Checks required fields in order, failing on the first problem.
    fn validate(
        &self,
    ) -> Result<(EventKind, TimeOfDay, TimeOfDay, Option<Temporary>), ValidationError> {
        let category = self
            .category
            .ok_or(ValidationError::MissingField { field: "type" })?;
        if self.days.is_empty() {
            return Err(ValidationError::NoDays);
        }
        let start = self
            .start
            .ok_or(ValidationError::MissingField { field: "startTime" })?;
        let end = self
            .end
            .ok_or(ValidationError::MissingField { field: "endTime" })?;

        let kind = match category {
            Category::Teaching => EventKind::Teaching {
                class_name: require(self.class_name.as_deref(), "className")?,
                class_location: require(self.class_location.as_deref(), "classLocation")?,
            },
            Category::Student => EventKind::Student,
            Category::Campus => EventKind::Campus,
        };

        let temporary = if self.is_temporary {
            let raw = non_blank(self.counted_hours.as_deref())
                .ok_or(ValidationError::MissingField { field: "countedHours" })?;
            Some(Temporary {
                counted: parse_counted_hours(&raw)?,
                expected_end_date: self.expected_end_date,
            })
        } else {
            None
        };

        Ok((kind, start, end, temporary))
    }
}

/// Adds a block on each requested day.
///
/// Validates the draft, then rejects the add if the block overlaps anything
/// on any of its days, reporting every conflict. On success returns the new
/// schedule and the created events, one per distinct day in week order.
pub fn add_event(
    schedule: &Schedule,
    draft: &EventDraft,
) -> Result<(Schedule, Vec<Event>), ScheduleError> {
    let (kind, start, end, temporary) = draft.validate()?;

    let mut template = Event::new(kind, start, end)?.with_overload(draft.is_overload);
    template.description = non_blank(draft.description.as_deref());
    template.temporary = temporary;

    let candidate = Candidate {
        days: draft.days.clone(),
        start,
        end,
    };
    let conflicts = find_conflicts(schedule, &candidate);
    if !conflicts.is_empty() {
        return Err(ScheduleError::Conflict(ConflictSet(conflicts)));
    }

    let mut next = schedule.clone();
    let mut created = Vec::new();
    for day in Day::ALL.into_iter().filter(|d| draft.days.contains(d)) {
        let event = template.with_fresh_id();
        next.day_mut(day).push(event.clone());
        created.push(event);
    }

    tracing::debug!(
        category = %template.category(),
        start = %start,
        end = %end,
        days = created.len(),
        "added event"
    );
    Ok((next, created))
}

/// Replaces an event with the patch merged in, recomputing its durations.
///
/// The event keeps its ID, day and position. Overlaps with the rest of the
/// day are not rejected; see [`crate::find_conflicts_excluding`].
pub fn edit_event(
    schedule: &Schedule,
    id: EventId,
    patch: &EventPatch,
) -> Result<(Schedule, Event), ScheduleError> {
    let (day, index) = schedule
        .locate(id)
        .ok_or(ScheduleError::EventNotFound { id })?;
    let current = &schedule.day(day)[index];

    let category = patch.category.unwrap_or_else(|| current.category());
    let kind = match category {
        Category::Teaching => EventKind::Teaching {
            class_name: require(
                patch
                    .class_name
                    .as_deref()
                    .or_else(|| current.kind().class_name()),
                "className",
            )?,
            class_location: require(
                patch
                    .class_location
                    .as_deref()
                    .or_else(|| current.kind().class_location()),
                "classLocation",
            )?,
        },
        Category::Student => EventKind::Student,
        Category::Campus => EventKind::Campus,
    };

    let is_temporary = patch.is_temporary.unwrap_or_else(|| current.is_temporary());
    let temporary = if is_temporary {
        let counted = match non_blank(patch.counted_hours.as_deref()) {
            Some(raw) => parse_counted_hours(&raw)?,
            None => current
                .temporary
                .as_ref()
                .map(|t| t.counted)
                .ok_or(ValidationError::MissingField { field: "countedHours" })?,
        };
        let expected_end_date = patch.expected_end_date.or_else(|| {
            current
                .temporary
                .as_ref()
                .and_then(|t| t.expected_end_date)
        });
        Some(Temporary {
            counted,
            expected_end_date,
        })
    } else {
        None
    };

    let start = patch.start.unwrap_or_else(|| current.start());
    let end = patch.end.unwrap_or_else(|| current.end());

    let mut updated = current.reschedule(kind, start, end)?;
    if let Some(description) = &patch.description {
        updated.description = non_blank(Some(description));
    }
    if let Some(is_overload) = patch.is_overload {
        updated.is_overload = is_overload;
    }
    updated.temporary = temporary;

    let mut next = schedule.clone();
    next.day_mut(day)[index] = updated.clone();

    tracing::debug!(%id, %day, index, "edited event");
    Ok((next, updated))
}

/// Removes an event. Later events on the same day shift down one position.
pub fn delete_event(schedule: &Schedule, id: EventId) -> Result<(Schedule, Event), ScheduleError> {
    let (day, index) = schedule
        .locate(id)
        .ok_or(ScheduleError::EventNotFound { id })?;

    let mut next = schedule.clone();
    let removed = next.day_mut(day).remove(index);

    tracing::debug!(%id, %day, index, "deleted event");
    Ok((next, removed))
}
