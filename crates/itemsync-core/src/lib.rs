//! Run orchestration for itemsync
//!
//! Loads configuration, builds the source catalog from a directory, merges it
//! into every target document, and writes diffs, merged output, and the
//! missing-identifier report. The [`Controller`] gates the committing pass
//! behind an operator confirmation.

pub mod config;
pub mod controller;
pub mod error;
pub mod pipeline;
pub mod report;

pub use config::{ConfigResolver, Manifest, Overrides};
pub use controller::{
    Confirmation, Controller, ControllerOutcome, ControllerState, is_affirmative,
};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, RunOptions};
pub use report::{DocumentReport, DocumentStatus, RunReport};
