//! Missing command implementation

use std::path::Path;

use colored::Colorize;

use itemsync_core::RunOptions;

use super::load_pipeline;
use crate::cli::PathArgs;
use crate::error::Result;

/// Print catalog identifiers no target references, one per line.
///
/// Nothing is written to the output directory.
pub fn run_missing(path: &Path, paths: &PathArgs) -> Result<()> {
    let pipeline = load_pipeline(path, paths)?;
    let report = pipeline.run(RunOptions::read_only())?;

    if report.missing.is_empty() {
        eprintln!("{} Every catalog identifier is used.", "OK".green().bold());
        return Ok(());
    }
    for identifier in &report.missing {
        println!("{identifier}");
    }
    Ok(())
}
