//! Hours totals per category.
//!
//! # Routing
//!
//! Each event contributes to exactly one bucket:
//! 1. Temporary blocks count their hand-entered hours. Teaching goes to the
//!    temporary-teaching bucket; student and campus go to their own bucket.
//! 2. Otherwise overload blocks count their billed duration as overload.
//! 3. Otherwise the billed duration goes to the category bucket.
//!
//! [`Totals::recompute`] and [`Totals::apply_delta`] both route through
//! [`Contribution::of`], so a full rebuild and a sequence of incremental
//! adjustments agree.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::event::{Category, Event};
use crate::schedule::Schedule;
use crate::time::{self, serde_hours};

/// One accumulator in [`Totals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Teaching,
    TemporaryTeaching,
    Student,
    Campus,
    Overload,
}

impl Bucket {
    pub const ALL: [Self; 5] = [
        Self::Teaching,
        Self::TemporaryTeaching,
        Self::Student,
        Self::Campus,
        Self::Overload,
    ];

    /// Picks the bucket for a block with these attributes.
    pub const fn route(category: Category, is_overload: bool, is_temporary: bool) -> Self {
        match (is_temporary, is_overload, category) {
            (true, _, Category::Teaching) => Self::TemporaryTeaching,
            (false, true, _) => Self::Overload,
            (false, false, Category::Teaching) => Self::Teaching,
            (_, _, Category::Student) => Self::Student,
            (_, _, Category::Campus) => Self::Campus,
        }
    }

    /// Label used in summaries and exports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Teaching => "Teaching Hours",
            Self::TemporaryTeaching => "Temporary Teaching Hours",
            Self::Student => "Student Hours",
            Self::Campus => "Campus Hours",
            Self::Overload => "Overload Hours",
        }
    }
}

/// The bucket and amount one event adds to the totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub bucket: Bucket,
    pub amount: Duration,
}

impl Contribution {
    pub fn of(event: &Event) -> Self {
        let bucket = Bucket::route(event.category(), event.is_overload, event.is_temporary());
        let amount = event
            .temporary
            .as_ref()
            .map_or_else(|| event.duration(), |t| t.counted);
        Self { bucket, amount }
    }
}

/// Hours per bucket. Every bucket is always ≥ 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    #[serde(rename = "teachingHours", with = "serde_hours")]
    pub teaching: Duration,
    #[serde(rename = "studentHours", with = "serde_hours")]
    pub student: Duration,
    #[serde(rename = "campusHours", with = "serde_hours")]
    pub campus: Duration,
    #[serde(rename = "overloadHours", with = "serde_hours")]
    pub overload: Duration,
    #[serde(rename = "temporaryTeachingHours", default = "Duration::zero", with = "serde_hours")]
    pub temporary_teaching: Duration,
}

impl Default for Totals {
    fn default() -> Self {
        Self {
            teaching: Duration::zero(),
            student: Duration::zero(),
            campus: Duration::zero(),
            overload: Duration::zero(),
            temporary_teaching: Duration::zero(),
        }
    }
}

impl Totals {
    /// Rebuilds totals from every event in the schedule.
    pub fn recompute(schedule: &Schedule) -> Self {
        schedule
            .iter()
            .fold(Self::default(), |totals, (_, event)| totals.add(Contribution::of(event)))
    }

    /// Adjusts one bucket by a signed delta, flooring the result at zero and
    /// saturating at [`Duration::MAX`].
    #[must_use]
    pub fn apply_delta(self, bucket: Bucket, delta: Duration) -> Self {
        let mut totals = self;
        let slot = totals.bucket_mut(bucket);
        *slot = slot
            .checked_add(&delta)
            .unwrap_or(if delta < Duration::zero() {
                Duration::zero()
            } else {
                Duration::MAX
            })
            .max(Duration::zero());
        totals
    }

    /// Adds an event's contribution.
    #[must_use]
    pub fn add(self, contribution: Contribution) -> Self {
        self.apply_delta(contribution.bucket, contribution.amount)
    }

    /// Removes an event's contribution.
    #[must_use]
    pub fn remove(self, contribution: Contribution) -> Self {
        self.apply_delta(contribution.bucket, -contribution.amount)
    }

    pub const fn bucket(&self, bucket: Bucket) -> Duration {
        match bucket {
            Bucket::Teaching => self.teaching,
            Bucket::TemporaryTeaching => self.temporary_teaching,
            Bucket::Student => self.student,
            Bucket::Campus => self.campus,
            Bucket::Overload => self.overload,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Duration {
        match bucket {
            Bucket::Teaching => &mut self.teaching,
            Bucket::TemporaryTeaching => &mut self.temporary_teaching,
            Bucket::Student => &mut self.student,
            Bucket::Campus => &mut self.campus,
            Bucket::Overload => &mut self.overload,
        }
    }

    pub fn hours(&self, bucket: Bucket) -> f64 {
        time::hours(self.bucket(bucket))
    }

    /// Sum of every bucket, temporary teaching included.
    pub fn total(&self) -> Duration {
        Bucket::ALL.iter().fold(Duration::zero(), |sum, &b| {
            sum.checked_add(&self.bucket(b)).unwrap_or(Duration::MAX)
        })
    }

    /// Total without overload.
    pub fn total_minus_overload(&self) -> Duration {
        self.total()
            .checked_sub(&self.overload)
            .unwrap_or_else(Duration::zero)
            .max(Duration::zero())
    }

    pub fn total_hours(&self) -> f64 {
        time::hours(self.total())
    }

    pub fn total_minus_overload_hours(&self) -> f64 {
        time::hours(self.total_minus_overload())
    }
}
