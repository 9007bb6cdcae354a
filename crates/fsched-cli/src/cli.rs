//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{
    add::AddArgs, delete::DeleteArgs, edit::EditArgs, export::ExportArgs, info::InfoArgs,
    init::InitArgs, list::ListArgs, load::LoadArgs, notes::NotesArgs, save_as::SaveAsArgs,
    totals::TotalsArgs,
};

/// Faculty weekly schedule planner.
///
/// Keeps a week of teaching, student and campus hours in a `.cccsched` file
/// and reports how the hours add up.
#[derive(Debug, Parser)]
#[command(name = "fsched", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Schedule file to use instead of the configured one.
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new, empty schedule file.
    Init(InitArgs),

    /// Show or update faculty name and semester.
    Info(InfoArgs),

    /// Show or replace the schedule notes.
    Notes(NotesArgs),

    /// Add a block on one or more days.
    Add(AddArgs),

    /// Change an existing block.
    Edit(EditArgs),

    /// Remove a block.
    Delete(DeleteArgs),

    /// List blocks by day.
    List(ListArgs),

    /// Show the hours summary.
    Totals(TotalsArgs),

    /// Export the schedule as a two-sheet workbook.
    Export(ExportArgs),

    /// Write the schedule to another file.
    SaveAs(SaveAsArgs),

    /// Replace the schedule with the contents of another file.
    Load(LoadArgs),
}
