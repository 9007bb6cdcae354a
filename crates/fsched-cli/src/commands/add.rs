//! Add command for new schedule blocks.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use fsched_core::{Category, Day, EventDraft};

use crate::Config;
use crate::commands::util;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Hours type: teaching, student or campus.
    #[arg(long = "type", value_name = "TYPE")]
    pub category: Category,
    /// Day of the week; repeat or comma-separate for several days.
    #[arg(long = "day", value_name = "DAY", required = true, value_delimiter = ',')]
    pub days: Vec<Day>,
    /// Start time (HH:MM).
    #[arg(long)]
    pub start: String,
    /// End time (HH:MM).
    #[arg(long)]
    pub end: String,
    /// Class name (teaching only).
    #[arg(long = "class")]
    pub class_name: Option<String>,
    /// Class location (teaching only).
    #[arg(long = "location")]
    pub class_location: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Count the block as overload hours.
    #[arg(long)]
    pub overload: bool,
    /// Count a fixed number of hours instead of the block's length.
    #[arg(long, requires = "counted_hours")]
    pub temporary: bool,
    /// Hours a temporary block counts for.
    #[arg(long, requires = "temporary")]
    pub counted_hours: Option<String>,
    /// Date a temporary block is expected to end.
    #[arg(long = "expected-end", value_name = "YYYY-MM-DD", requires = "temporary")]
    pub expected_end: Option<NaiveDate>,
}

pub fn run<W: Write>(writer: &mut W, args: &AddArgs, config: &Config) -> Result<()> {
    let mut planner = util::open_planner(&config.schedule_path)?;

    let draft = EventDraft {
        category: Some(args.category),
        days: args.days.clone(),
        start: Some(util::parse_time_arg(&args.start, config.granularity)?),
        end: Some(util::parse_time_arg(&args.end, config.granularity)?),
        description: args.description.clone(),
        class_name: args.class_name.clone(),
        class_location: args.class_location.clone(),
        is_overload: args.overload,
        is_temporary: args.temporary,
        counted_hours: args.counted_hours.clone(),
        expected_end_date: args.expected_end,
    };
    let created = planner.add(&draft)?;
    util::save_planner(&planner, &config.schedule_path)?;

    // One event per distinct day, in week order.
    let days = Day::ALL.into_iter().filter(|d| args.days.contains(d));
    for (day, event) in days.zip(&created) {
        writeln!(writer, "Added {}", util::describe(day, event))?;
    }
    writeln!(writer, "Total: {:.2}h", planner.totals().total_hours())?;
    Ok(())
}
