//! Scheduled time blocks.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ScheduleError, ValidationError};
use crate::time::{self, TimeError, TimeOfDay};
use crate::types::EventId;

/// The kind of hours an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Teaching,
    Student,
    Campus,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::Teaching, Self::Student, Self::Campus];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Teaching => "teaching",
            Self::Student => "student",
            Self::Campus => "campus",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "teaching" => Ok(Self::Teaching),
            "student" => Ok(Self::Student),
            "campus" => Ok(Self::Campus),
            _ => Err(ValidationError::UnknownCategory {
                value: s.to_string(),
            }),
        }
    }
}

/// Category-specific event data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// A class meeting. Class name and location are required.
    Teaching {
        class_name: String,
        class_location: String,
    },
    /// Student-facing hours.
    Student,
    /// On-campus hours.
    Campus,
}

impl EventKind {
    pub const fn category(&self) -> Category {
        match self {
            Self::Teaching { .. } => Category::Teaching,
            Self::Student => Category::Student,
            Self::Campus => Category::Campus,
        }
    }

    pub fn class_name(&self) -> Option<&str> {
        match self {
            Self::Teaching { class_name, .. } => Some(class_name),
            Self::Student | Self::Campus => None,
        }
    }

    pub fn class_location(&self) -> Option<&str> {
        match self {
            Self::Teaching { class_location, .. } => Some(class_location),
            Self::Student | Self::Campus => None,
        }
    }

    /// Short label as shown on the weekly grid.
    pub fn label(&self) -> &str {
        match self {
            Self::Teaching { class_name, .. } => class_name,
            Self::Student => "Student Hours",
            Self::Campus => "Campus Hours",
        }
    }
}

/// A provisional block whose counted hours are entered by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Temporary {
    /// Hours counted toward totals instead of the block's time span.
    pub counted: Duration,
    /// When the assignment is expected to end.
    pub expected_end_date: Option<NaiveDate>,
}

impl Temporary {
    pub const fn new(counted: Duration) -> Self {
        Self {
            counted,
            expected_end_date: None,
        }
    }

    pub fn counted_hours(&self) -> f64 {
        time::hours(self.counted)
    }
}

/// One scheduled block on one day.
///
/// The time span and category are private so that the stored billed duration
/// always matches them; use [`Event::reschedule`] to change them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EventRecord", into = "EventRecord")]
pub struct Event {
    id: EventId,
    kind: EventKind,
    start: TimeOfDay,
    end: TimeOfDay,
    /// Free-text note.
    pub description: Option<String>,
    /// Counts toward overload instead of the category bucket.
    pub is_overload: bool,
    /// Hand-entered counted hours, if provisional.
    pub temporary: Option<Temporary>,
    duration: Duration,
    display_duration: Duration,
}

impl Event {
    /// Creates an event with a fresh ID.
    pub fn new(kind: EventKind, start: TimeOfDay, end: TimeOfDay) -> Result<Self, TimeError> {
        Self::with_id(EventId::generate(), kind, start, end)
    }

    pub(crate) fn with_id(
        id: EventId,
        kind: EventKind,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> Result<Self, TimeError> {
        let duration = time::adjusted_span(start, end, kind.category())?;
        let display_duration = time::span(start, end)?;
        Ok(Self {
            id,
            kind,
            start,
            end,
            description: None,
            is_overload: false,
            temporary: None,
            duration,
            display_duration,
        })
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn with_overload(mut self, is_overload: bool) -> Self {
        self.is_overload = is_overload;
        self
    }

    #[must_use]
    pub fn with_temporary(mut self, temporary: Temporary) -> Self {
        self.temporary = Some(temporary);
        self
    }

    /// Returns a copy with new kind and time span, keeping the ID and
    /// recomputing both durations.
    pub fn reschedule(
        &self,
        kind: EventKind,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> Result<Self, TimeError> {
        let mut event = Self::with_id(self.id, kind, start, end)?;
        event.description.clone_from(&self.description);
        event.is_overload = self.is_overload;
        event.temporary.clone_from(&self.temporary);
        Ok(event)
    }

    /// Returns an identical copy under a new ID.
    #[must_use]
    pub(crate) fn with_fresh_id(&self) -> Self {
        Self {
            id: EventId::generate(),
            ..self.clone()
        }
    }

    pub const fn id(&self) -> EventId {
        self.id
    }

    pub const fn kind(&self) -> &EventKind {
        &self.kind
    }

    pub const fn category(&self) -> Category {
        self.kind.category()
    }

    pub const fn start(&self) -> TimeOfDay {
        self.start
    }

    pub const fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Billed duration (teaching rounded up to the half hour).
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Raw duration, for display only.
    pub const fn display_duration(&self) -> Duration {
        self.display_duration
    }

    pub fn duration_hours(&self) -> f64 {
        time::hours(self.duration)
    }

    pub fn display_hours(&self) -> f64 {
        time::hours(self.display_duration)
    }

    pub const fn is_temporary(&self) -> bool {
        self.temporary.is_some()
    }

    /// Whether the stored durations match those recomputed from the span.
    ///
    /// Events built in this crate always match; events read from a save file
    /// carry whatever durations the file held.
    pub fn has_consistent_duration(&self) -> bool {
        time::adjusted_span(self.start, self.end, self.category()) == Ok(self.duration)
            && time::span(self.start, self.end) == Ok(self.display_duration)
    }
}

// ========== Save-file representation ==========

/// Flat JSON shape of an event in the save file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventRecord {
    #[serde(default = "EventId::generate")]
    id: EventId,
    #[serde(rename = "type")]
    category: Category,
    start_time: TimeOfDay,
    end_time: TimeOfDay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    class_location: Option<String>,
    #[serde(default)]
    is_overload: bool,
    #[serde(default)]
    is_temporary: bool,
    #[serde(
        default,
        deserialize_with = "lenient_hours",
        skip_serializing_if = "Option::is_none"
    )]
    counted_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expected_end_date: Option<NaiveDate>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_duration: Option<f64>,
}

/// Counted hours were typed into a text field and may be stored as a string.
fn lenient_hours<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::String(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid countedHours: {s:?}"))),
    }
}

fn record_hours(field: &'static str, value: f64) -> Result<Duration, ValidationError> {
    time::from_hours(value).ok_or_else(|| ValidationError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

impl TryFrom<EventRecord> for Event {
    type Error = ScheduleError;

    /// Accepts the stored values as-is. Missing durations are derived from the
    /// span, missing teaching fields become empty strings and a temporary
    /// block without counted hours counts zero.
    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        let kind = match record.category {
            Category::Teaching => EventKind::Teaching {
                class_name: record.class_name.unwrap_or_default(),
                class_location: record.class_location.unwrap_or_default(),
            },
            Category::Student => EventKind::Student,
            Category::Campus => EventKind::Campus,
        };

        let mut event = Self::with_id(record.id, kind, record.start_time, record.end_time)?;
        event.description = record.description;
        event.is_overload = record.is_overload;
        if let Some(stored) = record.duration {
            event.duration = record_hours("duration", stored)?;
        }
        if let Some(shown) = record.display_duration {
            event.display_duration = record_hours("displayDuration", shown)?;
        }
        if record.is_temporary {
            let counted = match record.counted_hours {
                Some(hours) => time::from_counted_hours(hours).ok_or_else(|| {
                    ValidationError::InvalidNumber {
                        field: "countedHours",
                        value: hours.to_string(),
                    }
                })?,
                None => Duration::zero(),
            };
            event.temporary = Some(Temporary {
                counted,
                expected_end_date: record.expected_end_date,
            });
        }
        Ok(event)
    }
}

impl From<Event> for EventRecord {
    fn from(event: Event) -> Self {
        let category = event.category();
        let (class_name, class_location) = match event.kind {
            EventKind::Teaching {
                class_name,
                class_location,
            } => (Some(class_name), Some(class_location)),
            EventKind::Student | EventKind::Campus => (None, None),
        };
        let (counted_hours, expected_end_date) = match &event.temporary {
            Some(t) => (Some(t.counted_hours()), t.expected_end_date),
            None => (None, None),
        };
        Self {
            id: event.id,
            category,
            start_time: event.start,
            end_time: event.end,
            description: event.description,
            class_name,
            class_location,
            is_overload: event.is_overload,
            is_temporary: event.temporary.is_some(),
            counted_hours,
            expected_end_date,
            duration: Some(time::hours(event.duration)),
            display_duration: Some(time::hours(event.display_duration)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn lecture() -> Event {
        Event::new(
            EventKind::Teaching {
                class_name: "CS 101".to_string(),
                class_location: "Hall B".to_string(),
            },
            t("09:00"),
            t("10:20"),
        )
        .unwrap()
    }

    #[test]
    fn new_event_computes_billed_and_display_durations() {
        let event = lecture();
        assert_eq!(event.duration(), Duration::minutes(90));
        assert_eq!(event.display_duration(), Duration::minutes(80));
        assert!(event.has_consistent_duration());
    }

    #[test]
    fn new_event_rejects_reversed_span() {
        let result = Event::new(EventKind::Campus, t("10:00"), t("09:00"));
        assert!(matches!(result, Err(TimeError::InvalidRange { .. })));
    }

    #[test]
    fn reschedule_keeps_id_and_flags() {
        let event = lecture().with_overload(true).with_description("intro");
        let moved = event
            .reschedule(EventKind::Student, t("13:00"), t("14:10"))
            .unwrap();
        assert_eq!(moved.id(), event.id());
        assert!(moved.is_overload);
        assert_eq!(moved.description.as_deref(), Some("intro"));
        assert_eq!(moved.duration(), Duration::minutes(70));
        assert_eq!(moved.category(), Category::Student);
    }

    #[test]
    fn kind_label_matches_grid_text() {
        assert_eq!(lecture().kind().label(), "CS 101");
        assert_eq!(EventKind::Student.label(), "Student Hours");
        assert_eq!(EventKind::Campus.label(), "Campus Hours");
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Teaching".parse::<Category>().unwrap(), Category::Teaching);
        assert!("research".parse::<Category>().is_err());
    }

    #[test]
    fn serializes_flat_save_file_fields() {
        let event = lecture().with_temporary(Temporary {
            counted: Duration::hours(3),
            expected_end_date: NaiveDate::from_ymd_opt(2026, 12, 18),
        });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "teaching");
        assert_eq!(value["startTime"], "09:00");
        assert_eq!(value["endTime"], "10:20");
        assert_eq!(value["className"], "CS 101");
        assert_eq!(value["classLocation"], "Hall B");
        assert_eq!(value["isOverload"], false);
        assert_eq!(value["isTemporary"], true);
        assert_eq!(value["countedHours"], 3.0);
        assert_eq!(value["expectedEndDate"], "2026-12-18");
        assert_eq!(value["duration"], 1.5);
    }

    #[test]
    fn non_teaching_events_omit_class_fields() {
        let event = Event::new(EventKind::Campus, t("08:00"), t("09:00")).unwrap();
        let value = serde_json::to_value(&event).unwrap();
        assert!(value.get("className").is_none());
        assert!(value.get("classLocation").is_none());
        assert!(value.get("countedHours").is_none());
    }

    #[test]
    fn serde_roundtrip_preserves_event() {
        let event = lecture().with_description("office");
        let json = serde_json::to_string(&event).unwrap();
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn loads_legacy_event_without_id_or_display_duration() {
        let json = r#"{
            "type": "student",
            "startTime": "13:00",
            "endTime": "14:30",
            "description": "",
            "isOverload": false,
            "duration": 1.5
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.category(), Category::Student);
        assert_eq!(event.display_duration(), Duration::minutes(90));
        assert!(event.has_consistent_duration());
    }

    #[test]
    fn stored_duration_is_accepted_as_is() {
        let json = r#"{
            "type": "teaching",
            "startTime": "09:00",
            "endTime": "10:20",
            "className": "CS 101",
            "classLocation": "Hall B",
            "duration": 1.3333333333333333
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.duration(), Duration::minutes(80));
        assert!(!event.has_consistent_duration());
    }

    #[test]
    fn missing_duration_is_derived_from_span() {
        let json = r#"{
            "type": "teaching",
            "startTime": "09:00",
            "endTime": "10:20",
            "className": "CS 101",
            "classLocation": "Hall B"
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.duration(), Duration::minutes(90));
        assert_eq!(event.display_duration(), Duration::minutes(80));
        assert!(event.has_consistent_duration());
    }

    #[test]
    fn counted_hours_beyond_a_week_are_rejected() {
        let json = r#"{
            "type": "campus",
            "startTime": "09:00",
            "endTime": "10:00",
            "isTemporary": true,
            "countedHours": 1e12,
            "duration": 1.0
        }"#;
        let err = serde_json::from_str::<Event>(json).unwrap_err();
        assert!(err.to_string().contains("countedHours"), "{err}");
    }

    #[test]
    fn counted_hours_may_be_a_string() {
        let json = r#"{
            "type": "campus",
            "startTime": "09:00",
            "endTime": "10:00",
            "isTemporary": true,
            "countedHours": "2.5",
            "duration": 1.0
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(
            event.temporary.map(|t| t.counted),
            Some(Duration::minutes(150))
        );
    }

    #[test]
    fn reversed_span_in_file_is_rejected() {
        let json = r#"{
            "type": "campus",
            "startTime": "10:00",
            "endTime": "09:00",
            "duration": 1.0
        }"#;
        assert!(serde_json::from_str::<Event>(json).is_err());
    }
}
