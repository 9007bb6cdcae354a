//! Faculty schedule planner CLI library.
//!
//! Each subcommand loads the schedule file, applies one change through a
//! [`fsched_core::Planner`] and writes the file back.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
