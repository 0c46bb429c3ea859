//! Configuration loading and overrides
//!
//! A run is configured by a [`Manifest`], read from `itemsync.toml` in the
//! working directory (or an explicit path) and then adjusted by command-line
//! [`Overrides`]. Every field has a default, so no file is required.

mod manifest;
mod resolver;

pub use manifest::{BlocksSection, Manifest, OutputSection, Overrides, PathsSection};
pub use resolver::{CONFIG_FILE_NAME, ConfigResolver};
