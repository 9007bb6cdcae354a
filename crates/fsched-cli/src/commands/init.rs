//! Init command for creating a new schedule file.

use std::io::Write;

use anyhow::{Result, bail};
use clap::Args;
use fsched_core::{FacultyInfo, Planner};

use crate::Config;
use crate::commands::util;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Faculty member's name.
    #[arg(long)]
    pub name: String,
    /// Semester, e.g. "Fall 2026".
    #[arg(long)]
    pub semester: String,
    /// Overwrite an existing schedule file.
    #[arg(long)]
    pub force: bool,
}

pub fn run<W: Write>(writer: &mut W, args: &InitArgs, config: &Config) -> Result<()> {
    let path = &config.schedule_path;
    if path.exists() && !args.force {
        bail!(
            "schedule file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    let faculty = FacultyInfo::new(args.name.trim(), args.semester.trim());
    let planner = Planner::new(faculty);
    util::save_planner(&planner, path)?;
    tracing::debug!(path = %path.display(), "created schedule file");

    writeln!(
        writer,
        "Created schedule for {} ({})",
        planner.faculty().name,
        planner.faculty().semester
    )?;
    Ok(())
}
