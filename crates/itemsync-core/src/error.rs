//! Error types for itemsync-core

use std::path::PathBuf;

/// Result type for itemsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in itemsync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Explicitly requested configuration file does not exist
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration failed validation
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Source catalog directory is missing
    #[error("Source directory not found: {path}")]
    SourceDirMissing { path: PathBuf },

    /// Target document directory is missing
    #[error("Target directory not found: {path}")]
    TargetDirMissing { path: PathBuf },

    /// Content engine error from itemsync-content
    #[error(transparent)]
    Content(#[from] itemsync_content::Error),

    /// Filesystem error from itemsync-fs
    #[error(transparent)]
    Fs(#[from] itemsync_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
