//! CLI subcommand implementations.

pub mod add;
pub mod delete;
pub mod edit;
pub mod export;
pub mod info;
pub mod init;
pub mod list;
pub mod load;
pub mod notes;
pub mod save_as;
pub mod totals;
pub mod util;
