//! `employeehub` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration from flags and `EMPLOYEEHUB_*` environment.
//! - Open the hub against a SQLite file (or memory) and run one command.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use config::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.init_logging()?;
    let mut hub = cli.open_hub()?;
    commands::run(&mut hub, cli.acting_user, cli.command)
}
