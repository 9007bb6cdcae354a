//! Detect overlapping blocks on the same day.
//!
//! Spans are closed-open: a block ending at 10:00 and one starting at 10:00
//! do NOT conflict. Category and overload flags are ignored.

use std::fmt;

use crate::day::Day;
use crate::event::Event;
use crate::schedule::Schedule;
use crate::time::TimeOfDay;
use crate::types::EventId;

/// A proposed block to check against the schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub days: Vec<Day>,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

/// An existing event that overlaps a candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub day: Day,
    pub event: Event,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{} {}",
            self.day.title(),
            self.event.start(),
            self.event.end(),
            self.event.kind().label()
        )
    }
}

/// Every conflict found for one candidate. Never empty when returned in an error.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictSet(pub Vec<Conflict>);

impl ConflictSet {
    pub fn conflicts(&self) -> &[Conflict] {
        &self.0
    }
}

impl fmt::Display for ConflictSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, conflict) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {conflict}")?;
        }
        Ok(())
    }
}

/// Two spans overlap iff `a.start < b.end && a.end > b.start`.
const fn overlaps(a_start: TimeOfDay, a_end: TimeOfDay, b: &Event) -> bool {
    a_start.minutes_since_midnight() < b.end().minutes_since_midnight()
        && a_end.minutes_since_midnight() > b.start().minutes_since_midnight()
}

/// Finds every existing event that overlaps the candidate on any of its days.
///
/// Results are in week order, then insertion order. Repeated days are checked once.
pub fn find_conflicts(schedule: &Schedule, candidate: &Candidate) -> Vec<Conflict> {
    collect(schedule, candidate, None)
}

/// Like [`find_conflicts`], but ignores one event (the one being edited).
pub fn find_conflicts_excluding(
    schedule: &Schedule,
    candidate: &Candidate,
    exclude: EventId,
) -> Vec<Conflict> {
    collect(schedule, candidate, Some(exclude))
}

fn collect(schedule: &Schedule, candidate: &Candidate, exclude: Option<EventId>) -> Vec<Conflict> {
    Day::ALL
        .into_iter()
        .filter(|day| candidate.days.contains(day))
        .flat_map(move |day| {
            schedule
                .day(day)
                .iter()
                .filter(move |event| Some(event.id()) != exclude)
                .filter(move |event| overlaps(candidate.start, candidate.end, event))
                .map(move |event| Conflict {
                    day,
                    event: event.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn block(kind: EventKind, start: &str, end: &str) -> Event {
        Event::new(kind, t(start), t(end)).unwrap()
    }

    fn candidate(days: &[Day], start: &str, end: &str) -> Candidate {
        Candidate {
            days: days.to_vec(),
            start: t(start),
            end: t(end),
        }
    }

    fn schedule_with(day: Day, events: &[Event]) -> Schedule {
        let mut schedule = Schedule::new();
        schedule.day_mut(day).extend(events.iter().cloned());
        schedule
    }

    #[test]
    fn back_to_back_blocks_do_not_conflict() {
        let schedule = schedule_with(Day::Monday, &[block(EventKind::Campus, "09:00", "10:00")]);
        assert!(find_conflicts(&schedule, &candidate(&[Day::Monday], "10:00", "11:00")).is_empty());
        assert!(find_conflicts(&schedule, &candidate(&[Day::Monday], "08:00", "09:00")).is_empty());
    }

    #[test]
    fn partial_and_containing_overlaps_conflict() {
        let schedule = schedule_with(Day::Monday, &[block(EventKind::Campus, "09:00", "10:00")]);
        for (start, end) in [
            ("09:30", "10:30"),
            ("08:30", "09:01"),
            ("08:00", "11:00"),
            ("09:15", "09:45"),
        ] {
            let found = find_conflicts(&schedule, &candidate(&[Day::Monday], start, end));
            assert_eq!(found.len(), 1, "{start}-{end} should conflict");
        }
    }

    #[test]
    fn other_days_are_ignored() {
        let schedule = schedule_with(Day::Monday, &[block(EventKind::Campus, "09:00", "10:00")]);
        assert!(
            find_conflicts(&schedule, &candidate(&[Day::Tuesday], "09:00", "10:00")).is_empty()
        );
    }

    #[test]
    fn category_and_overload_do_not_matter() {
        let overload = block(EventKind::Student, "09:00", "10:00").with_overload(true);
        let schedule = schedule_with(Day::Friday, &[overload]);
        let found = find_conflicts(&schedule, &candidate(&[Day::Friday], "09:30", "10:30"));
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn returns_all_conflicts_across_days() {
        let mut schedule = schedule_with(
            Day::Monday,
            &[
                block(EventKind::Campus, "09:00", "10:00"),
                block(EventKind::Student, "10:00", "11:00"),
            ],
        );
        schedule
            .day_mut(Day::Wednesday)
            .push(block(EventKind::Campus, "10:30", "12:00"));

        let found = find_conflicts(
            &schedule,
            &candidate(&[Day::Wednesday, Day::Monday, Day::Monday], "09:30", "10:45"),
        );
        let days: Vec<_> = found.iter().map(|c| c.day).collect();
        assert_eq!(days, [Day::Monday, Day::Monday, Day::Wednesday]);
    }

    #[test]
    fn excluding_skips_the_edited_event() {
        let event = block(EventKind::Campus, "09:00", "10:00");
        let schedule = schedule_with(Day::Monday, &[event.clone()]);
        let c = candidate(&[Day::Monday], "09:00", "10:30");
        assert_eq!(find_conflicts(&schedule, &c).len(), 1);
        assert!(find_conflicts_excluding(&schedule, &c, event.id()).is_empty());
    }

    #[test]
    fn conflict_set_lists_each_conflict() {
        let event = block(
            EventKind::Teaching {
                class_name: "MATH 2".to_string(),
                class_location: "Room 4".to_string(),
            },
            "09:00",
            "10:00",
        );
        let set = ConflictSet(vec![
            Conflict {
                day: Day::Monday,
                event: event.clone(),
            },
            Conflict {
                day: Day::Thursday,
                event,
            },
        ]);
        assert_eq!(
            set.to_string(),
            "  - Monday 09:00-10:00 MATH 2\n  - Thursday 09:00-10:00 MATH 2"
        );
    }
}
