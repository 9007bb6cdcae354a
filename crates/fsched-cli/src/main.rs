use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fsched_cli::commands::{
    add, delete, edit, export, info, init, list, load, notes, save_as, totals,
};
use fsched_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref())
        .context("failed to load configuration")?
        .with_schedule_path(cli.file.clone());
    tracing::debug!(?config, "loaded configuration");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match command {
        Commands::Init(args) => init::run(&mut out, args, &config)?,
        Commands::Info(args) => info::run(&mut out, args, &config)?,
        Commands::Notes(args) => notes::run(&mut out, args, &config)?,
        Commands::Add(args) => add::run(&mut out, args, &config)?,
        Commands::Edit(args) => edit::run(&mut out, args, &config)?,
        Commands::Delete(args) => delete::run(&mut out, args, &config)?,
        Commands::List(args) => list::run(&mut out, args, &config)?,
        Commands::Totals(args) => totals::run(&mut out, args, &config)?,
        Commands::Export(args) => export::run(&mut out, args, &config)?,
        Commands::SaveAs(args) => save_as::run(&mut out, args, &config)?,
        Commands::Load(args) => load::run(&mut out, args, &config)?,
    }
    out.flush()?;

    Ok(())
}
