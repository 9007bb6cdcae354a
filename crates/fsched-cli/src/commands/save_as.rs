//! Save-as command writing the schedule to another file.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::Config;
use crate::commands::util;

#[derive(Debug, Args)]
pub struct SaveAsArgs {
    /// Destination. Defaults to `<name>_schedule.cccsched` next to the current file.
    pub path: Option<PathBuf>,
}

pub fn run<W: Write>(writer: &mut W, args: &SaveAsArgs, config: &Config) -> Result<()> {
    let planner = util::open_planner(&config.schedule_path)?;
    let path = args.path.clone().unwrap_or_else(|| {
        config
            .schedule_path
            .with_file_name(fsched_file::default_file_name(planner.faculty()))
    });

    util::save_planner(&planner, &path)?;
    writeln!(writer, "Saved {} events to {}", planner.schedule().len(), path.display())?;
    Ok(())
}
