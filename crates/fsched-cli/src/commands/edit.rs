//! Edit command for changing an existing block.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use fsched_core::{Category, EventPatch};

use crate::Config;
use crate::commands::util;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Event ID or a unique prefix of at least four characters.
    pub id: String,
    /// New hours type.
    #[arg(long = "type", value_name = "TYPE")]
    pub category: Option<Category>,
    /// New start time (HH:MM).
    #[arg(long)]
    pub start: Option<String>,
    /// New end time (HH:MM).
    #[arg(long)]
    pub end: Option<String>,
    #[arg(long = "class")]
    pub class_name: Option<String>,
    #[arg(long = "location")]
    pub class_location: Option<String>,
    /// New description; pass an empty string to clear it.
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, conflicts_with = "no_overload")]
    pub overload: bool,
    #[arg(long)]
    pub no_overload: bool,
    #[arg(long, conflicts_with = "no_temporary")]
    pub temporary: bool,
    #[arg(long)]
    pub no_temporary: bool,
    #[arg(long, conflicts_with = "no_temporary")]
    pub counted_hours: Option<String>,
    #[arg(long = "expected-end", value_name = "YYYY-MM-DD", conflicts_with = "no_temporary")]
    pub expected_end: Option<NaiveDate>,
}

const fn flag(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

pub fn run<W: Write>(writer: &mut W, args: &EditArgs, config: &Config) -> Result<()> {
    let mut planner = util::open_planner(&config.schedule_path)?;
    let id = util::resolve_id(planner.schedule(), &args.id)?;

    let patch = EventPatch {
        category: args.category,
        start: args
            .start
            .as_deref()
            .map(|s| util::parse_time_arg(s, config.granularity))
            .transpose()?,
        end: args
            .end
            .as_deref()
            .map(|s| util::parse_time_arg(s, config.granularity))
            .transpose()?,
        description: args.description.clone(),
        class_name: args.class_name.clone(),
        class_location: args.class_location.clone(),
        is_overload: flag(args.overload, args.no_overload),
        is_temporary: flag(args.temporary, args.no_temporary),
        counted_hours: args.counted_hours.clone(),
        expected_end_date: args.expected_end,
    };
    let outcome = planner.edit(id, &patch)?;
    util::save_planner(&planner, &config.schedule_path)?;

    if let Some((day, _)) = planner.schedule().locate(id) {
        writeln!(writer, "Updated {}", util::describe(day, &outcome.event))?;
    }
    if !outcome.overlaps.is_empty() {
        writeln!(writer, "Warning: now overlaps")?;
        for conflict in &outcome.overlaps {
            writeln!(writer, "  - {conflict}")?;
        }
    }
    writeln!(writer, "Total: {:.2}h", planner.totals().total_hours())?;
    Ok(())
}
