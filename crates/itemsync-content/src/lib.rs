//! Block extraction, normalization, merging, and diffing for itemsync
//!
//! Operates purely on text: identifier-keyed blocks are found by pattern
//! scanning rather than parsing, so everything outside a replaced block's
//! inner region survives byte for byte.

pub mod block;
pub mod catalog;
pub mod diff;
pub mod edit;
pub mod error;
pub mod identifier;
pub mod merge;
pub mod normalize;

pub use block::{BlockExtractor, ContentBlock};
pub use catalog::{Catalog, CatalogBuilder, CatalogEntry, ComponentFilter, Duplicate};
pub use diff::{DiffRecord, render_missing_report};
pub use edit::Edit;
pub use error::{Error, Result};
pub use identifier::IdentifierResolver;
pub use merge::{MergeEngine, MergeOutcome, UsedIdentifiers};
pub use normalize::{canonical, normalize_formatting};
