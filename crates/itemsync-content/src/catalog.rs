//! Source catalog: identifier to cleaned block content
//!
//! The catalog is built once per run from every source document and is
//! read-only afterwards. Identifier collisions resolve to the document added
//! last.

use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::block::BlockExtractor;
use crate::error::{Result, validate_name};
use crate::identifier::IdentifierResolver;
use crate::normalize::{dedent, normalize_formatting};

/// Cleaned content for one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub identifier: String,
    pub content: String,
    /// Name of the source document the content came from
    pub origin: String,
}

/// An identifier defined more than once across the source documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Duplicate {
    pub identifier: String,
    /// Document whose entry was overwritten
    pub replaced_origin: String,
    /// Document whose entry was kept
    pub origin: String,
}

/// Identifier-keyed source content.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<String, CatalogEntry>,
    duplicates: Vec<Duplicate>,
}

impl Catalog {
    pub fn get(&self, identifier: &str) -> Option<&CatalogEntry> {
        self.entries.get(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identifiers in sorted order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Overwrites that happened while building, in the order they occurred
    pub fn duplicates(&self) -> &[Duplicate] {
        &self.duplicates
    }

    fn insert(&mut self, entry: CatalogEntry) {
        if let Some(previous) = self.entries.get(&entry.identifier) {
            tracing::warn!(
                identifier = %entry.identifier,
                replaced = %previous.origin,
                kept = %entry.origin,
                "Duplicate identifier in source catalog, later definition wins"
            );
            self.duplicates.push(Duplicate {
                identifier: entry.identifier.clone(),
                replaced_origin: previous.origin.clone(),
                origin: entry.origin.clone(),
            });
        }
        self.entries.insert(entry.identifier.clone(), entry);
    }
}

impl FromIterator<CatalogEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        let mut catalog = Catalog::default();
        for entry in iter {
            catalog.insert(entry);
        }
        catalog
    }
}

/// Removes excluded sub-elements (e.g. `<Fabricate>`) from block content.
#[derive(Debug, Clone)]
pub struct ComponentFilter {
    pattern: Option<Regex>,
}

impl ComponentFilter {
    /// Build a filter for the given component tag names. An empty list
    /// removes nothing.
    pub fn new<S: AsRef<str>>(tags: &[S]) -> Result<Self> {
        if tags.is_empty() {
            return Ok(Self { pattern: None });
        }

        let mut alternatives = Vec::with_capacity(tags.len());
        for tag in tags {
            let tag = tag.as_ref();
            validate_name("component", tag)?;
            let tag = regex::escape(tag);
            // Self-closing form first, otherwise up to the nearest closing tag.
            alternatives.push(format!(r"<{tag}\b(?:[^>]*/>|.*?</{tag}\s*>)"));
        }
        let pattern = format!(
            r"(?ms)(?P<lead>^[ \t]*)?(?:{})(?P<trail>[ \t]*(?:\r?\n|\z))?",
            alternatives.join("|")
        );

        Ok(Self {
            pattern: Some(Regex::new(&pattern)?),
        })
    }

    /// Strip every excluded component. A component that occupied whole
    /// lines is removed together with those lines.
    pub fn strip(&self, content: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return content.to_string();
        };

        pattern
            .replace_all(content, |caps: &Captures| {
                match (caps.name("lead"), caps.name("trail")) {
                    (Some(_), Some(_)) => String::new(),
                    (lead, trail) => format!(
                        "{}{}",
                        lead.map_or("", |m| m.as_str()),
                        trail.map_or("", |m| m.as_str())
                    ),
                }
            })
            .into_owned()
    }
}

/// Builds a [`Catalog`] from source documents.
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    extractor: BlockExtractor,
    resolver: IdentifierResolver,
    filter: ComponentFilter,
    tab_width: usize,
    catalog: Catalog,
}

impl CatalogBuilder {
    /// `tab_width` is applied to source documents before extraction, so
    /// cataloged content is indented with tabs only.
    pub fn new<S: AsRef<str>>(
        tag: &str,
        identifier_attribute: &str,
        exclude: &[S],
        tab_width: usize,
    ) -> Result<Self> {
        Ok(Self {
            extractor: BlockExtractor::new(tag)?,
            resolver: IdentifierResolver::new(identifier_attribute)?,
            filter: ComponentFilter::new(exclude)?,
            tab_width,
            catalog: Catalog::default(),
        })
    }

    /// Clean a block's inner content: excluded components removed, common
    /// indentation removed, surrounding whitespace trimmed.
    pub fn clean(&self, inner: &str) -> String {
        dedent(&self.filter.strip(inner)).trim().to_string()
    }

    /// Add every identified block of `text`. Returns the number of entries
    /// stored from this document.
    pub fn add_document(&mut self, origin: &str, text: &str) -> usize {
        let text = normalize_formatting(text, self.tab_width);
        let mut added = 0;
        for block in self.extractor.extract(&text) {
            let Some(identifier) = self.resolver.resolve(block.attributes) else {
                tracing::debug!(
                    origin,
                    attribute = self.resolver.attribute(),
                    "Source block without identifier skipped"
                );
                continue;
            };
            let content = self.clean(block.inner);
            self.catalog.insert(CatalogEntry {
                identifier: identifier.to_string(),
                content,
                origin: origin.to_string(),
            });
            added += 1;
        }
        tracing::debug!(origin, tag = self.extractor.tag(), added, "Source document cataloged");
        added
    }

    pub fn build(self) -> Catalog {
        self.catalog
    }
}
