//! The whole application state as stored in a save file.

use serde::{Deserialize, Serialize};

use crate::schedule::Schedule;
use crate::totals::Totals;
use crate::types::FacultyInfo;

/// Faculty info, schedule, totals and notes, in save-file shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub faculty_info: FacultyInfo,
    pub schedule: Schedule,
    #[serde(default)]
    pub totals: Totals,
    #[serde(default)]
    pub notes: String,
}
