//! Span replacements on document text.

use std::ops::Range;

/// Replacement of one byte range in a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Identifier of the block being edited
    pub identifier: String,
    /// Byte range replaced in the source
    pub span: Range<usize>,
    /// Replacement text
    pub new_content: String,
}

impl Edit {
    pub fn replace(
        identifier: impl Into<String>,
        span: Range<usize>,
        new_content: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            span,
            new_content: new_content.into(),
        }
    }
}

/// Apply non-overlapping edits, given in ascending span order.
///
/// Text outside the edited spans is copied unchanged. Edits that start
/// before the end of a previous edit are ignored.
pub fn apply_all(source: &str, edits: &[Edit]) -> String {
    let mut result = String::with_capacity(source.len());
    let mut cursor = 0;

    for edit in edits {
        if edit.span.start < cursor || edit.span.end > source.len() {
            tracing::warn!(identifier = %edit.identifier, span = ?edit.span, "Skipping overlapping edit");
            continue;
        }
        result.push_str(&source[cursor..edit.span.start]);
        result.push_str(&edit.new_content);
        cursor = edit.span.end;
    }
    result.push_str(&source[cursor..]);

    result
}
