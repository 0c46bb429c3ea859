//! Error types for itemsync-content

/// Result type for itemsync-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in itemsync-content operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid {kind} name: {name:?}")]
    InvalidName { kind: &'static str, name: String },

    #[error("Failed to build pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

impl Error {
    pub fn invalid_name(kind: &'static str, name: impl Into<String>) -> Self {
        Self::InvalidName {
            kind,
            name: name.into(),
        }
    }
}

/// Check that `name` is usable as a markup tag or attribute name.
///
/// Accepts ASCII letters, digits, `_`, `-`, `.` and `:`; the first
/// character must not be a digit, `-` or `.`.
pub fn validate_name(kind: &'static str, name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_first = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == ':');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'));

    if valid_first && valid_rest {
        Ok(())
    } else {
        Err(Error::invalid_name(kind, name))
    }
}
