//! itemsync CLI
//!
//! Merges cataloged block content from a source directory into target
//! documents, with a preview/confirm/apply flow.

mod cli;
mod commands;
mod error;
mod interactive;
mod logging;
mod output;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    match cli.command {
        Some(cmd) => execute_command(cmd, &cli.paths),
        None => {
            println!("{} Item block merge tool", "itemsync".green().bold());
            println!();
            println!("Run {} for available commands.", "itemsync --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, paths: &cli::PathArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::Merge => commands::run_merge(&cwd, paths),
        Commands::Diff { json } => commands::run_diff(&cwd, paths, json),
        Commands::Missing => commands::run_missing(&cwd, paths),
    }
}
