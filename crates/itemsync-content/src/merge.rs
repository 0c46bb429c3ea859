//! Merge engine: write catalog content into target documents
//!
//! For each block of a target document whose identifier is cataloged and
//! whose canonical content differs, only the inner region is replaced. The
//! opening tag, attributes and closing tag are left exactly as authored.

use std::collections::BTreeSet;

use crate::block::BlockExtractor;
use crate::catalog::Catalog;
use crate::edit::{Edit, apply_all};
use crate::error::Result;
use crate::identifier::IdentifierResolver;
use crate::normalize::{canonical, normalize_formatting, reindent};

/// Indentation unit added inside a replaced block
pub const INDENT_UNIT: &str = "\t";

/// Catalog identifiers matched by at least one target block during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedIdentifiers {
    inner: BTreeSet<String>,
}

impl UsedIdentifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, identifier: &str) {
        if !self.inner.contains(identifier) {
            self.inner.insert(identifier.to_string());
        }
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.inner.contains(identifier)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Catalog identifiers never recorded, sorted.
    pub fn missing_from(&self, catalog: &Catalog) -> Vec<String> {
        catalog
            .identifiers()
            .filter(|id| !self.contains(id))
            .map(str::to_string)
            .collect()
    }
}

/// Result of merging one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Input after formatting normalization
    pub original: String,
    /// Output after formatting normalization
    pub modified: String,
    /// Whether `original` and `modified` differ canonically
    pub changed: bool,
    /// Identifiers whose content was replaced, in document order
    pub replaced: Vec<String>,
    /// Cataloged identifiers found in the document, in document order
    pub matched: Vec<String>,
}

/// Applies a [`Catalog`] to target documents.
#[derive(Debug, Clone)]
pub struct MergeEngine {
    extractor: BlockExtractor,
    resolver: IdentifierResolver,
    tab_width: usize,
}

impl MergeEngine {
    pub fn new(tag: &str, identifier_attribute: &str, tab_width: usize) -> Result<Self> {
        Ok(Self {
            extractor: BlockExtractor::new(tag)?,
            resolver: IdentifierResolver::new(identifier_attribute)?,
            tab_width,
        })
    }

    /// Merge `catalog` into `raw`, recording matched identifiers in `used`.
    pub fn merge(&self, raw: &str, catalog: &Catalog, used: &mut UsedIdentifiers) -> MergeOutcome {
        let original = normalize_formatting(raw, self.tab_width);
        let mut edits = Vec::new();
        let mut matched = Vec::new();

        for block in self.extractor.extract(&original) {
            let Some(identifier) = self.resolver.resolve(block.attributes) else {
                continue;
            };
            let Some(entry) = catalog.get(identifier) else {
                tracing::debug!(identifier, "Not in catalog, left untouched");
                continue;
            };

            used.record(identifier);
            matched.push(identifier.to_string());

            if canonical(block.inner) == canonical(&entry.content) {
                tracing::debug!(identifier, "Content already in sync");
                continue;
            }

            let body = reindent(&entry.content, &format!("{}{INDENT_UNIT}", block.indent));
            let new_inner = if body.is_empty() {
                format!("\n{}", block.indent)
            } else {
                format!("\n{body}\n{}", block.indent)
            };
            tracing::debug!(identifier, "Replacing block content");
            edits.push(Edit::replace(identifier, block.inner_span.clone(), new_inner));
        }

        let replaced = edits.iter().map(|e| e.identifier.clone()).collect();
        let modified = normalize_formatting(&apply_all(&original, &edits), self.tab_width);
        let changed = canonical(&original) != canonical(&modified);

        MergeOutcome {
            original,
            modified,
            changed,
            replaced,
            matched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use pretty_assertions::assert_eq;

    fn catalog(entries: &[(&str, &str)]) -> Catalog {
        entries
            .iter()
            .map(|(id, content)| CatalogEntry {
                identifier: id.to_string(),
                content: content.to_string(),
                origin: "src.xml".into(),
            })
            .collect()
    }

    fn engine() -> MergeEngine {
        MergeEngine::new("Item", "identifier", 4).unwrap()
    }

    #[test]
    fn test_replaces_differing_content() {
        let catalog = catalog(&[("rope_1", "<price>10</price>")]);
        let mut used = UsedIdentifiers::new();
        let outcome = engine().merge(
            "<Item identifier=\"rope_1\">\n    <price>5</price>\n</Item>",
            &catalog,
            &mut used,
        );

        assert_eq!(outcome.modified, "<Item identifier=\"rope_1\">\n\t<price>10</price>\n</Item>");
        assert!(outcome.changed);
        assert_eq!(outcome.replaced, vec!["rope_1"]);
        assert!(used.contains("rope_1"));
    }

    #[test]
    fn test_indentation_only_difference_is_unchanged() {
        let catalog = catalog(&[("plank", "<price>2</price>")]);
        let mut used = UsedIdentifiers::new();
        let raw = "<Items>\n        <Item identifier=\"plank\">\n  <price>2</price>\n        </Item>\n</Items>\n";
        let outcome = engine().merge(raw, &catalog, &mut used);

        assert!(!outcome.changed);
        assert!(outcome.replaced.is_empty());
        assert_eq!(outcome.matched, vec!["plank"]);
        assert_eq!(outcome.original, outcome.modified);
        assert!(used.contains("plank"));
    }

    #[test]
    fn test_nested_indent_and_attributes_preserved() {
        let catalog = catalog(&[("a", "<price>1</price>\n<Body>\n\t<x/>\n</Body>")]);
        let mut used = UsedIdentifiers::new();
        let raw = "<Items>\n\t<!-- keep me -->\n\t<Item  tags=\"small\"   identifier=\"a\" >\n\t\t<price>3</price>\n\t</Item >\n</Items>";
        let outcome = engine().merge(raw, &catalog, &mut used);

        assert_eq!(
            outcome.modified,
            "<Items>\n\t<!-- keep me -->\n\t<Item  tags=\"small\"   identifier=\"a\" >\n\t\t<price>1</price>\n\t\t<Body>\n\t\t\t<x/>\n\t\t</Body>\n\t</Item >\n</Items>"
        );
    }

    #[test]
    fn test_only_differing_block_is_touched() {
        let catalog = catalog(&[("a", "<v>1</v>"), ("b", "<v>20</v>"), ("c", "<v>3</v>")]);
        let mut used = UsedIdentifiers::new();
        let raw = "<Item identifier=\"a\">\n\t<v>1</v>\n</Item>\n<Item identifier=\"b\">\n\t<v>2</v>\n</Item>\n<Item identifier=\"c\"><v>3</v></Item>\n";
        let outcome = engine().merge(raw, &catalog, &mut used);

        assert_eq!(
            outcome.modified,
            "<Item identifier=\"a\">\n\t<v>1</v>\n</Item>\n<Item identifier=\"b\">\n\t<v>20</v>\n</Item>\n<Item identifier=\"c\"><v>3</v></Item>\n"
        );
        assert_eq!(outcome.replaced, vec!["b"]);
        assert_eq!(outcome.matched, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_uncataloged_and_anonymous_blocks_untouched() {
        let catalog = catalog(&[("known", "<v/>")]);
        let mut used = UsedIdentifiers::new();
        let raw = "<Item identifier=\"unknown\">\n\t<old/>\n</Item>\n<Item>\n\t<old/>\n</Item>\n";
        let outcome = engine().merge(raw, &catalog, &mut used);

        assert_eq!(outcome.modified, raw);
        assert!(!outcome.changed);
        assert!(used.is_empty());
    }

    #[test]
    fn test_second_merge_is_noop() {
        let catalog = catalog(&[("a", "<price>1</price>\n<Sprite/>")]);
        let mut used = UsedIdentifiers::new();
        let first = engine().merge("\t<Item identifier=\"a\">\r\n\t\t<price>9</price>\r\n\t</Item>\r\n", &catalog, &mut used);
        let second = engine().merge(&first.modified, &catalog, &mut used);

        assert!(first.changed);
        assert!(!second.changed);
        assert_eq!(second.modified, first.modified);
    }

    #[test]
    fn test_empty_catalog_content() {
        let catalog = catalog(&[("a", "")]);
        let mut used = UsedIdentifiers::new();
        let outcome = engine().merge("\t<Item identifier=\"a\">\n\t\t<x/>\n\t</Item>", &catalog, &mut used);
        assert_eq!(outcome.modified, "\t<Item identifier=\"a\">\n\t</Item>");
        assert!(outcome.changed);
    }

    #[test]
    fn test_missing_from_catalog() {
        let catalog = catalog(&[("a", ""), ("ghost_item", ""), ("b", "")]);
        let mut used = UsedIdentifiers::new();
        used.record("a");
        used.record("b");
        used.record("a");
        assert_eq!(used.len(), 2);
        assert_eq!(used.missing_from(&catalog), vec!["ghost_item"]);
    }
}
