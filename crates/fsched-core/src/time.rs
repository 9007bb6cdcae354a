//! Wall-clock time arithmetic.
//!
//! Times are local `HH:MM` strings with no date or timezone. Durations are
//! exact `chrono::Duration` values; hours as `f64` only appear at the edges
//! (display and the save file).

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::Duration;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::Category;

/// Zero-padded 24-hour `HH:MM`.
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").unwrap());

const MS_PER_HOUR: i64 = 3_600_000;

/// Teaching load is billed in half-hour increments.
const TEACHING_INCREMENT_MS: i64 = MS_PER_HOUR / 2;

/// Most hours a temporary block may count: one full week.
pub const MAX_COUNTED_HOURS: f64 = 168.0;

/// Errors from parsing times and computing spans.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// The input is not a zero-padded `HH:MM` time at the configured granularity.
    #[error("invalid time format: {value:?} (expected HH:MM{hint})", hint = .granularity.hint())]
    InvalidTimeFormat {
        value: String,
        granularity: Granularity,
    },

    /// The end of a span is not after its start.
    #[error("end time {end} must be after start time {start}")]
    InvalidRange { start: TimeOfDay, end: TimeOfDay },
}

/// Which minutes a time may fall on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Any minute `00`-`59`.
    #[default]
    Minute,
    /// Only `00` and `30`.
    HalfHour,
}

impl Granularity {
    const fn allows(self, minute: u16) -> bool {
        match self {
            Self::Minute => true,
            Self::HalfHour => minute == 0 || minute == 30,
        }
    }

    const fn hint(self) -> &'static str {
        match self {
            Self::Minute => "",
            Self::HalfHour => " on a :00 or :30 boundary",
        }
    }
}

/// A time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    /// Creates a time from hour and minute, or `None` if either is out of range.
    pub const fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self {
                minutes: hour * 60 + minute,
            })
        } else {
            None
        }
    }

    pub const fn hour(self) -> u16 {
        self.minutes / 60
    }

    pub const fn minute(self) -> u16 {
        self.minutes % 60
    }

    /// Minutes elapsed since midnight.
    pub const fn minutes_since_midnight(self) -> u16 {
        self.minutes
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time(s, Granularity::Minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

/// Parses a zero-padded 24-hour `HH:MM` string.
pub fn parse_time(s: &str, granularity: Granularity) -> Result<TimeOfDay, TimeError> {
    let invalid = || TimeError::InvalidTimeFormat {
        value: s.to_string(),
        granularity,
    };

    let caps = TIME_RE.captures(s).ok_or_else(invalid)?;
    let hour: u16 = caps[1].parse().map_err(|_| invalid())?;
    let minute: u16 = caps[2].parse().map_err(|_| invalid())?;

    if !granularity.allows(minute) {
        return Err(invalid());
    }

    TimeOfDay::from_hm(hour, minute).ok_or_else(invalid)
}

/// Raw span between two times. Fails unless `end > start`.
pub fn span(start: TimeOfDay, end: TimeOfDay) -> Result<Duration, TimeError> {
    if end <= start {
        return Err(TimeError::InvalidRange { start, end });
    }
    Ok(Duration::minutes(i64::from(
        end.minutes_since_midnight() - start.minutes_since_midnight(),
    )))
}

/// Billed span for a category.
///
/// Teaching rounds up to the next half hour; other categories bill the raw span.
pub fn adjusted_span(
    start: TimeOfDay,
    end: TimeOfDay,
    category: Category,
) -> Result<Duration, TimeError> {
    let raw = span(start, end)?;
    Ok(match category {
        Category::Teaching => round_up(raw, TEACHING_INCREMENT_MS),
        Category::Student | Category::Campus => raw,
    })
}

/// Raw duration in fractional hours.
pub fn duration(start: TimeOfDay, end: TimeOfDay) -> Result<f64, TimeError> {
    span(start, end).map(hours)
}

/// Billed duration in fractional hours.
pub fn adjusted_duration(
    start: TimeOfDay,
    end: TimeOfDay,
    category: Category,
) -> Result<f64, TimeError> {
    adjusted_span(start, end, category).map(hours)
}

/// Unrounded duration for display. Never used for totals.
pub fn display_duration(start: TimeOfDay, end: TimeOfDay) -> Result<f64, TimeError> {
    duration(start, end)
}

fn round_up(d: Duration, increment_ms: i64) -> Duration {
    let ms = d.num_milliseconds();
    let units = (ms + increment_ms - 1) / increment_ms;
    Duration::milliseconds(units * increment_ms)
}

/// Converts a duration to fractional hours.
#[allow(clippy::cast_precision_loss)]
pub fn hours(d: Duration) -> f64 {
    d.num_milliseconds() as f64 / MS_PER_HOUR as f64
}

/// Converts fractional hours to a duration, rounded to the nearest millisecond.
///
/// Returns `None` for non-finite or out-of-range input.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn from_hours(value: f64) -> Option<Duration> {
    if !value.is_finite() {
        return None;
    }
    let ms = (value * MS_PER_HOUR as f64).round();
    if ms.abs() >= i64::MAX as f64 {
        return None;
    }
    Duration::try_milliseconds(ms as i64)
}

/// Converts counted hours, rejecting negative values and anything above
/// [`MAX_COUNTED_HOURS`].
pub fn from_counted_hours(value: f64) -> Option<Duration> {
    if !(0.0..=MAX_COUNTED_HOURS).contains(&value) {
        return None;
    }
    from_hours(value)
}

/// Serde adapter storing a `Duration` as fractional hours.
pub mod serde_hours {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(super::hours(*d))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        super::from_hours(value)
            .ok_or_else(|| serde::de::Error::custom(format!("hours out of range: {value}")))
    }
}
