//! Filesystem access for itemsync
//!
//! Path handling, text I/O with atomic writes, non-recursive directory
//! scans, and format-agnostic config loading.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
