//! One week of events keyed by day.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::day::Day;
use crate::event::Event;
use crate::types::EventId;

/// Events for Monday through Saturday, each day in insertion order.
///
/// Serialized as a map from lowercase day name to event list. Days missing
/// from a save file load as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Day, Vec<Event>>", into = "BTreeMap<Day, Vec<Event>>")]
pub struct Schedule {
    days: [Vec<Event>; 6],
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events on one day, in insertion order.
    pub fn day(&self, day: Day) -> &[Event] {
        &self.days[day.index()]
    }

    pub(crate) fn day_mut(&mut self, day: Day) -> &mut Vec<Event> {
        &mut self.days[day.index()]
    }

    /// Every event with its day, in week order.
    pub fn iter(&self) -> impl Iterator<Item = (Day, &Event)> {
        Day::ALL
            .into_iter()
            .flat_map(move |day| self.day(day).iter().map(move |event| (day, event)))
    }

    pub fn len(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }

    /// Finds the day and position of an event.
    pub fn locate(&self, id: EventId) -> Option<(Day, usize)> {
        Day::ALL.into_iter().find_map(|day| {
            self.day(day)
                .iter()
                .position(|event| event.id() == id)
                .map(|index| (day, index))
        })
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.locate(id).map(|(day, index)| &self.day(day)[index])
    }

    /// ID of the event at a display position.
    ///
    /// Positions shift after a delete; hold on to the ID instead.
    pub fn id_at(&self, day: Day, index: usize) -> Option<EventId> {
        self.day(day).get(index).map(Event::id)
    }

    /// IDs whose string form starts with `prefix`.
    pub fn ids_with_prefix(&self, prefix: &str) -> Vec<EventId> {
        let prefix = prefix.to_ascii_lowercase();
        self.iter()
            .map(|(_, event)| event.id())
            .filter(|id| id.to_string().starts_with(&prefix))
            .collect()
    }
}

impl From<BTreeMap<Day, Vec<Event>>> for Schedule {
    fn from(mut map: BTreeMap<Day, Vec<Event>>) -> Self {
        let mut schedule = Self::default();
        for day in Day::ALL {
            if let Some(events) = map.remove(&day) {
                *schedule.day_mut(day) = events;
            }
        }
        schedule
    }
}

impl From<Schedule> for BTreeMap<Day, Vec<Event>> {
    fn from(schedule: Schedule) -> Self {
        Day::ALL.into_iter().zip(schedule.days).collect()
    }
}
