//! Export seam and the spreadsheet workbook model.
//!
//! Exporters receive a read-only [`ExportSnapshot`] and report success or
//! failure; they never change planner state.

use std::fmt::Write;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::schedule::Schedule;
use crate::totals::{Bucket, Totals};
use crate::types::FacultyInfo;

/// Errors reported by export sinks.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode export")]
    Encode(#[from] serde_json::Error),
}

/// Read-only state handed to exporters.
#[derive(Debug, Clone, Copy)]
pub struct ExportSnapshot<'a> {
    pub faculty: &'a FacultyInfo,
    pub schedule: &'a Schedule,
    pub totals: &'a Totals,
    pub notes: &'a str,
}

/// What a successful export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub path: PathBuf,
}

/// A destination for exported schedules.
pub trait ExportSink {
    fn export(&self, snapshot: &ExportSnapshot<'_>) -> Result<ExportReceipt, ExportError>;
}

/// One worksheet: a name and rows of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

/// The "Detailed Events" and "Summary" worksheets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

const EVENT_HEADER: [&str; 10] = [
    "Day",
    "Type",
    "Start Time",
    "End Time",
    "Description",
    "Class Name",
    "Location",
    "Hours",
    "Overload",
    "Temporary",
];

const fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

fn row<const N: usize>(cells: [&str; N]) -> Vec<String> {
    cells.iter().map(ToString::to_string).collect()
}

impl Workbook {
    pub fn build(snapshot: &ExportSnapshot<'_>) -> Self {
        let mut events = vec![row(["Detailed Schedule"]), row(EVENT_HEADER)];
        for (day, event) in snapshot.schedule.iter() {
            events.push(vec![
                day.title().to_string(),
                event.category().to_string(),
                event.start().to_string(),
                event.end().to_string(),
                event.description.clone().unwrap_or_default(),
                event.kind().class_name().unwrap_or_default().to_string(),
                event.kind().class_location().unwrap_or_default().to_string(),
                format!("{:.2}", event.duration_hours()),
                yes_no(event.is_overload).to_string(),
                yes_no(event.is_temporary()).to_string(),
            ]);
        }

        let totals = snapshot.totals;
        let mut summary = vec![row(["Hours Summary"]), row(["Category", "Hours"])];
        for bucket in Bucket::ALL {
            summary.push(vec![
                bucket.label().to_string(),
                format!("{:.2}", totals.hours(bucket)),
            ]);
        }
        summary.push(vec![
            "Total Hours".to_string(),
            format!("{:.2}", totals.total_hours()),
        ]);
        summary.push(vec![
            "Total Minus Overload".to_string(),
            format!("{:.2}", totals.total_minus_overload_hours()),
        ]);

        Self {
            sheets: vec![
                Sheet {
                    name: "Detailed Events".to_string(),
                    rows: events,
                },
                Sheet {
                    name: "Summary".to_string(),
                    rows: summary,
                },
            ],
        }
    }

    /// Tab-separated text, one block per sheet headed by `# <name>`.
    ///
    /// Tabs and line breaks inside cells become spaces.
    pub fn to_tsv(&self) -> String {
        let mut out = String::new();
        for (i, sheet) in self.sheets.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            writeln!(out, "# {}", sheet.name).unwrap();
            for cells in &sheet.rows {
                let line: Vec<String> = cells
                    .iter()
                    .map(|c| c.replace(['\t', '\n', '\r'], " "))
                    .collect();
                writeln!(out, "{}", line.join("\t")).unwrap();
            }
        }
        out
    }
}

/// `<name>_schedule_<semester>.<ext>` with whitespace runs replaced by `_`.
pub fn workbook_file_name(faculty: &FacultyInfo, extension: &str) -> String {
    format!(
        "{}_schedule_{}.{extension}",
        faculty.name_slug(),
        faculty.semester_slug()
    )
}
