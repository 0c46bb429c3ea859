//! Diff command implementation
//!
//! A preview pass: diff files are written, documents are never committed.

use std::path::Path;

use colored::Colorize;

use itemsync_core::RunOptions;

use super::load_pipeline;
use crate::cli::PathArgs;
use crate::error::Result;
use crate::output;

/// Run the diff command
pub fn run_diff(path: &Path, paths: &PathArgs, json: bool) -> Result<()> {
    let pipeline = load_pipeline(path, paths)?;
    let report = pipeline.run(RunOptions::preview())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !report.has_changes() && report.success() {
        println!("{} No changes needed. Targets match the catalog.", "OK".green().bold());
        return Ok(());
    }

    output::print_preview(&report, pipeline.manifest().output.preview_excerpt);
    println!();
    println!("Run {} to apply these changes.", "itemsync merge".cyan());
    Ok(())
}
