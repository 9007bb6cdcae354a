//! Totals command printing the hours summary.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use clap::Args;
use fsched_core::{Bucket, FacultyInfo, Totals};
use serde::Serialize;

use crate::Config;
use crate::commands::util;

#[derive(Debug, Args)]
pub struct TotalsArgs {
    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TotalsReport<'a> {
    #[serde(flatten)]
    totals: &'a Totals,
    total_hours: f64,
    total_minus_overload: f64,
}

pub fn run<W: Write>(writer: &mut W, args: &TotalsArgs, config: &Config) -> Result<()> {
    let planner = util::open_planner(&config.schedule_path)?;
    let totals = planner.totals();

    if args.json {
        let report = TotalsReport {
            totals,
            total_hours: totals.total_hours(),
            total_minus_overload: totals.total_minus_overload_hours(),
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(writer, "{}", format_totals(planner.faculty(), totals))?;
    }
    Ok(())
}

fn format_totals(faculty: &FacultyInfo, totals: &Totals) -> String {
    let mut output = String::new();
    writeln!(
        output,
        "Hours Summary - {} ({})",
        faculty.name, faculty.semester
    )
    .unwrap();
    for bucket in Bucket::ALL {
        writeln!(output, "  {:<26}{:>6.2}", bucket.label(), totals.hours(bucket)).unwrap();
    }
    writeln!(output, "  {}", "-".repeat(32)).unwrap();
    writeln!(output, "  {:<26}{:>6.2}", "Total Hours", totals.total_hours()).unwrap();
    writeln!(
        output,
        "  {:<26}{:>6.2}",
        "Total Minus Overload",
        totals.total_minus_overload_hours()
    )
    .unwrap();
    output
}
