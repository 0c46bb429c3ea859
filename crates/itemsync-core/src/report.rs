//! Run reports

use itemsync_content::{DiffRecord, Duplicate};
use serde::Serialize;

/// Outcome for one target document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// At least one block differs from the catalog
    Changed,
    /// Nothing to merge
    Unchanged,
    /// The document could not be read
    Failed,
}

/// Per-document result of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    pub filename: String,
    pub status: DocumentStatus,
    /// Cataloged identifiers found in the document
    pub matched: Vec<String>,
    /// Identifiers whose content was replaced
    pub replaced: Vec<String>,
    /// Present only for changed documents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<DiffRecord>,
    /// Where the diff was written, if it was
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_path: Option<String>,
    /// Where the document was committed, if it was
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
}

impl DocumentReport {
    pub fn failed(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            status: DocumentStatus::Failed,
            matched: Vec::new(),
            replaced: Vec::new(),
            diff: None,
            diff_path: None,
            output_path: None,
        }
    }
}

/// Everything one pass over the source and target directories produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Whether documents were committed to the output directory
    pub committed: bool,
    /// Number of identifiers in the source catalog
    pub catalog_size: usize,
    /// Source documents read into the catalog
    pub sources: Vec<String>,
    pub documents: Vec<DocumentReport>,
    /// Catalog identifiers matched by no target document, sorted
    pub missing: Vec<String>,
    /// Where the missing report was written, if it was
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_path: Option<String>,
    /// Identifiers overwritten by a later source definition
    pub duplicates: Vec<Duplicate>,
    /// Per-file failures; none of them stopped the run
    pub errors: Vec<String>,
}

impl RunReport {
    pub fn changed(&self) -> impl Iterator<Item = &DocumentReport> {
        self.documents
            .iter()
            .filter(|d| d.status == DocumentStatus::Changed)
    }

    pub fn has_changes(&self) -> bool {
        self.changed().next().is_some()
    }

    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn error(&mut self, message: String) {
        tracing::warn!("{message}");
        self.errors.push(message);
    }
}
