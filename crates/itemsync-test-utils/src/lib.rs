//! Shared test utilities for the itemsync workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`workspace`]: [`TestWorkspace`] with source, target and output directories

pub mod workspace;

pub use workspace::TestWorkspace;
