//! Notes command for the free-text notes attached to a schedule.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use crate::Config;
use crate::commands::util;

#[derive(Debug, Args)]
pub struct NotesArgs {
    /// Replacement notes. Omit to print the current notes.
    pub text: Option<String>,
}

pub fn run<W: Write>(writer: &mut W, args: &NotesArgs, config: &Config) -> Result<()> {
    let mut planner = util::open_planner(&config.schedule_path)?;

    match &args.text {
        Some(text) => {
            planner.set_notes(text.as_str());
            util::save_planner(&planner, &config.schedule_path)?;
            writeln!(writer, "Notes updated.")?;
        }
        None if planner.notes().is_empty() => writeln!(writer, "No notes.")?,
        None => writeln!(writer, "{}", planner.notes())?,
    }
    Ok(())
}
