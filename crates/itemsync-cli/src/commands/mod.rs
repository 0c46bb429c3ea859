//! Command implementations for itemsync-cli

pub mod diff;
pub mod merge;
pub mod missing;

pub use diff::run_diff;
pub use merge::run_merge;
pub use missing::run_missing;

use std::path::Path;

use itemsync_core::{ConfigResolver, Pipeline};
use itemsync_fs::NormalizedPath;

use crate::cli::PathArgs;
use crate::error::Result;

/// Resolve configuration for `root` and build the pipeline.
pub fn load_pipeline(root: &Path, paths: &PathArgs) -> Result<Pipeline> {
    let root = NormalizedPath::new(root);
    let manifest =
        ConfigResolver::new(root.clone()).resolve(paths.config.as_deref(), &paths.overrides())?;
    tracing::debug!(
        source = %manifest.paths.source,
        target = %manifest.paths.target,
        output = %manifest.paths.output,
        "Configuration resolved"
    );
    Ok(Pipeline::new(root, manifest)?)
}
