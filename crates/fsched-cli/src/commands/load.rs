//! Load command replacing the schedule with another file's contents.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::Config;
use crate::commands::util;

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// Schedule file to load.
    pub path: PathBuf,
}

pub fn run<W: Write>(writer: &mut W, args: &LoadArgs, config: &Config) -> Result<()> {
    // Parse first so a bad file leaves the current schedule alone.
    let snapshot = fsched_file::load(&args.path)
        .with_context(|| format!("failed to load {}", args.path.display()))?;

    let mut planner = util::open_or_empty(&config.schedule_path)?;
    planner.replace(snapshot);
    util::save_planner(&planner, &config.schedule_path)?;

    let faculty = planner.faculty();
    writeln!(
        writer,
        "Loaded {} events for {} ({})",
        planner.schedule().len(),
        faculty.name,
        faculty.semester
    )?;
    writeln!(writer, "Total: {:.2}h", planner.totals().total_hours())?;
    Ok(())
}
