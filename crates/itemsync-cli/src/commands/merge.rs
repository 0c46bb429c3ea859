//! Merge command implementation
//!
//! Preview, confirm, apply.

use std::path::Path;

use colored::Colorize;

use itemsync_core::{Confirmation, Controller, ControllerState, Pipeline};

use super::load_pipeline;
use crate::cli::PathArgs;
use crate::error::Result;
use crate::interactive::ConsolePrompt;
use crate::output;

/// Run the merge command with the console prompt
pub fn run_merge(path: &Path, paths: &PathArgs) -> Result<()> {
    let pipeline = load_pipeline(path, paths)?;
    let mut prompt = ConsolePrompt::new(pipeline.manifest().output.preview_excerpt);
    merge_with(&pipeline, &mut prompt)
}

/// Run the merge command with any confirmation source
pub fn merge_with(pipeline: &Pipeline, confirmation: &mut dyn Confirmation) -> Result<()> {
    println!(
        "{} {} -> {}",
        "Merging".blue().bold(),
        pipeline.source_dir().as_str().yellow(),
        pipeline.target_dir().as_str().yellow()
    );
    println!();

    let outcome = Controller::new(pipeline).run(confirmation)?;
    match (outcome.state, outcome.applied) {
        (ControllerState::Apply, Some(applied)) => output::print_applied(&applied),
        _ => {
            println!(
                "{} Nothing applied. Preview diffs are in {}",
                "ABORTED".yellow().bold(),
                pipeline.output_dir().as_str().cyan()
            );
        }
    }
    Ok(())
}
