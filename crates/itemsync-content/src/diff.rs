//! Unified diffs and the missing-identifier report

use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};

/// Lines of context around each hunk
const CONTEXT_RADIUS: usize = 3;

/// A unified diff of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRecord {
    pub filename: String,
    pub unified: String,
    pub insertions: usize,
    pub deletions: usize,
}

impl DiffRecord {
    /// Diff `original` against `modified`, labeled `a/<filename>` and `b/<filename>`.
    ///
    /// Identical texts produce an empty diff.
    pub fn compute(original: &str, modified: &str, filename: &str) -> Self {
        let text_diff = TextDiff::from_lines(original, modified);

        let (mut insertions, mut deletions) = (0, 0);
        for change in text_diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => insertions += 1,
                ChangeTag::Delete => deletions += 1,
                ChangeTag::Equal => {}
            }
        }

        let unified = text_diff
            .unified_diff()
            .context_radius(CONTEXT_RADIUS)
            .header(&format!("a/{filename}"), &format!("b/{filename}"))
            .to_string();

        Self {
            filename: filename.to_string(),
            unified,
            insertions,
            deletions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.unified.is_empty()
    }

    /// At most `max_chars` characters from the start of the diff.
    pub fn excerpt(&self, max_chars: usize) -> &str {
        match self.unified.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.unified[..idx],
            None => &self.unified,
        }
    }
}

/// Render identifiers one per line, each newline-terminated.
pub fn render_missing_report<S: AsRef<str>>(identifiers: &[S]) -> String {
    identifiers
        .iter()
        .map(|id| format!("{}\n", id.as_ref()))
        .collect()
}
