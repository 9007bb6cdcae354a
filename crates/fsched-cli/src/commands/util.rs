//! Shared utilities for CLI commands.

use std::path::Path;

use anyhow::{Context, Result, bail};
use fsched_core::time::parse_time;
use fsched_core::{
    Change, Day, Event, EventId, Granularity, Planner, PlannerObserver, Schedule, TimeOfDay,
};

/// Shortest ID prefix accepted on the command line.
pub const MIN_ID_PREFIX: usize = 4;

/// Logs every planner change.
struct ChangeLog;

impl PlannerObserver for ChangeLog {
    fn on_change(&self, change: &Change, planner: &Planner) {
        let kind = match change {
            Change::Added(_) => "added",
            Change::Edited(_) => "edited",
            Change::Deleted(_) => "deleted",
            Change::Replaced => "replaced",
            Change::FacultyUpdated => "faculty",
            Change::NotesUpdated => "notes",
        };
        tracing::debug!(
            change = kind,
            events = planner.schedule().len(),
            total_hours = planner.totals().total_hours(),
            "planner changed"
        );
    }
}

fn watched(mut planner: Planner) -> Planner {
    planner.subscribe(Box::new(ChangeLog));
    planner
}

/// Opens the schedule file, failing if it does not exist yet.
pub fn open_planner(path: &Path) -> Result<Planner> {
    let Some(planner) = open_existing(path)? else {
        bail!("no schedule at {}; run `fsched init` first", path.display());
    };
    Ok(planner)
}

/// Opens the schedule file, or an empty planner if it does not exist yet.
pub fn open_or_empty(path: &Path) -> Result<Planner> {
    Ok(open_existing(path)?.unwrap_or_else(|| watched(Planner::default())))
}

fn open_existing(path: &Path) -> Result<Option<Planner>> {
    let snapshot = fsched_file::load_if_exists(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(snapshot.map(|s| watched(Planner::from_snapshot(s))))
}

pub fn save_planner(planner: &Planner, path: &Path) -> Result<()> {
    fsched_file::save(path, &planner.snapshot())
        .with_context(|| format!("failed to save {}", path.display()))
}

/// Resolves a full event ID or a unique prefix of one.
pub fn resolve_id(schedule: &Schedule, raw: &str) -> Result<EventId> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<EventId>() {
        return Ok(id);
    }
    if raw.len() < MIN_ID_PREFIX {
        bail!("event ID prefix must be at least {MIN_ID_PREFIX} characters: {raw}");
    }
    match schedule.ids_with_prefix(raw).as_slice() {
        [] => bail!("no event matches ID {raw}"),
        [id] => Ok(*id),
        ids => bail!("event ID {raw} is ambiguous ({} events match)", ids.len()),
    }
}

pub fn parse_time_arg(raw: &str, granularity: Granularity) -> Result<TimeOfDay> {
    Ok(parse_time(raw.trim(), granularity)?)
}

/// `<short id> <Day> <start>-<end> <label> (<hours>h)`
pub fn describe(day: Day, event: &Event) -> String {
    format!(
        "{} {} {}-{} {} ({:.2}h)",
        event.id().short(),
        day.title(),
        event.start(),
        event.end(),
        event.kind().label(),
        event.duration_hours()
    )
}
