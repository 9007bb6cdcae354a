//! Info command for showing or updating faculty details.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use fsched_core::FacultyInfo;

use crate::Config;
use crate::commands::util;

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// New faculty name.
    #[arg(long)]
    pub name: Option<String>,
    /// New semester.
    #[arg(long)]
    pub semester: Option<String>,
}

pub fn run<W: Write>(writer: &mut W, args: &InfoArgs, config: &Config) -> Result<()> {
    let mut planner = util::open_planner(&config.schedule_path)?;

    if args.name.is_some() || args.semester.is_some() {
        let current = planner.faculty();
        let faculty = FacultyInfo::new(
            args.name.as_deref().map_or(current.name.as_str(), str::trim),
            args.semester
                .as_deref()
                .map_or(current.semester.as_str(), str::trim),
        );
        planner.set_faculty_info(faculty);
        util::save_planner(&planner, &config.schedule_path)?;
    }

    let faculty = planner.faculty();
    writeln!(writer, "Name:     {}", faculty.name)?;
    writeln!(writer, "Semester: {}", faculty.semester)?;
    Ok(())
}
