//! The extract -> merge -> diff pipeline over source and target directories
//!
//! One call to [`Pipeline::run`] is a complete pass: the catalog is rebuilt
//! from the source directory, every target document is merged in listing
//! order, and the results are reported. Preview and apply passes run the same
//! computation; [`RunOptions`] only decides what gets written.

use itemsync_content::{
    Catalog, CatalogBuilder, DiffRecord, MergeEngine, UsedIdentifiers, render_missing_report,
};
use itemsync_fs::{NormalizedPath, io};

use crate::config::Manifest;
use crate::report::{DocumentReport, DocumentStatus, RunReport};
use crate::{Error, Result};

/// What a pass writes to the output directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Write `<name><diff_suffix>` for every changed document and remove
    /// it for unchanged ones
    pub write_diffs: bool,
    /// Write merged documents and the missing-identifier report
    pub commit: bool,
}

impl RunOptions {
    /// Diffs only
    pub fn preview() -> Self {
        Self {
            write_diffs: true,
            commit: false,
        }
    }

    /// Diffs, documents and the missing report
    pub fn apply() -> Self {
        Self {
            write_diffs: true,
            commit: true,
        }
    }

    /// Compute everything, write nothing
    pub fn read_only() -> Self {
        Self {
            write_diffs: false,
            commit: false,
        }
    }
}

/// A configured pipeline rooted at a working directory
#[derive(Debug, Clone)]
pub struct Pipeline {
    root: NormalizedPath,
    manifest: Manifest,
}

impl Pipeline {
    pub fn new(root: NormalizedPath, manifest: Manifest) -> Result<Self> {
        manifest.validate()?;
        Ok(Self { root, manifest })
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn source_dir(&self) -> NormalizedPath {
        self.root.join(&self.manifest.paths.source)
    }

    pub fn target_dir(&self) -> NormalizedPath {
        self.root.join(&self.manifest.paths.target)
    }

    pub fn output_dir(&self) -> NormalizedPath {
        self.root.join(&self.manifest.paths.output)
    }

    /// Build the catalog from every source document, recording unreadable
    /// files and duplicates in `report`.
    pub fn build_catalog(&self, report: &mut RunReport) -> Result<Catalog> {
        let source_dir = self.source_dir();
        if !source_dir.is_dir() {
            return Err(Error::SourceDirMissing {
                path: source_dir.to_native(),
            });
        }

        let blocks = &self.manifest.blocks;
        let mut builder = CatalogBuilder::new(
            &blocks.tag,
            &blocks.identifier_attribute,
            &blocks.exclude,
            self.manifest.output.tab_width,
        )?;

        for path in io::list_files(&source_dir, &self.manifest.output.extension)? {
            let name = file_name(&path);
            match io::read_text(&path) {
                Ok(text) => {
                    builder.add_document(&name, &text);
                    report.sources.push(name);
                }
                Err(e) => report.error(format!("Failed to read source {name}: {e}")),
            }
        }

        let catalog = builder.build();
        report.catalog_size = catalog.len();
        report.duplicates = catalog.duplicates().to_vec();
        tracing::info!(
            identifiers = catalog.len(),
            sources = report.sources.len(),
            "Source catalog built"
        );
        Ok(catalog)
    }

    /// Run one full pass.
    pub fn run(&self, options: RunOptions) -> Result<RunReport> {
        let target_dir = self.target_dir();
        if !target_dir.is_dir() {
            return Err(Error::TargetDirMissing {
                path: target_dir.to_native(),
            });
        }

        let mut report = RunReport {
            committed: options.commit,
            ..Default::default()
        };
        let catalog = self.build_catalog(&mut report)?;

        let blocks = &self.manifest.blocks;
        let engine = MergeEngine::new(
            &blocks.tag,
            &blocks.identifier_attribute,
            self.manifest.output.tab_width,
        )?;
        let mut used = UsedIdentifiers::new();

        for path in io::list_files(&target_dir, &self.manifest.output.extension)? {
            let document =
                self.process_document(&path, &engine, &catalog, &mut used, options, &mut report);
            report.documents.push(document);
        }

        if used.is_empty() && !catalog.is_empty() {
            tracing::warn!("No cataloged identifier appears in any target document");
        }
        report.missing = used.missing_from(&catalog);
        if options.commit {
            let missing_path = self.output_dir().join(&self.manifest.output.missing_report);
            match io::write_text(&missing_path, &render_missing_report(&report.missing)) {
                Ok(()) => report.missing_path = Some(missing_path.to_string()),
                Err(e) => report.error(format!("Failed to write missing report: {e}")),
            }
        }

        tracing::info!(
            documents = report.documents.len(),
            used = used.len(),
            changed = report.changed().count(),
            missing = report.missing.len(),
            committed = options.commit,
            "Pass complete"
        );
        Ok(report)
    }

    fn process_document(
        &self,
        path: &NormalizedPath,
        engine: &MergeEngine,
        catalog: &Catalog,
        used: &mut UsedIdentifiers,
        options: RunOptions,
        report: &mut RunReport,
    ) -> DocumentReport {
        let name = file_name(path);
        let raw = match io::read_text(path) {
            Ok(raw) => raw,
            Err(e) => {
                report.error(format!("Failed to read target {name}: {e}"));
                return DocumentReport::failed(name);
            }
        };

        let outcome = engine.merge(&raw, catalog, used);
        let output_dir = self.output_dir();
        let mut document = DocumentReport {
            filename: name.clone(),
            status: if outcome.changed {
                DocumentStatus::Changed
            } else {
                DocumentStatus::Unchanged
            },
            matched: outcome.matched,
            replaced: outcome.replaced,
            diff: None,
            diff_path: None,
            output_path: None,
        };

        let diff_path = output_dir.join(format!("{name}{}", self.manifest.output.diff_suffix));
        if outcome.changed {
            let diff = DiffRecord::compute(&outcome.original, &outcome.modified, &name);
            if options.write_diffs {
                match io::write_text(&diff_path, &diff.unified) {
                    Ok(()) => document.diff_path = Some(diff_path.to_string()),
                    Err(e) => report.error(format!("Failed to write diff for {name}: {e}")),
                }
            }
            tracing::info!(document = %name, replaced = document.replaced.len(), "Changes found");
            document.diff = Some(diff);
        } else {
            tracing::info!(document = %name, "No changes needed");
            if options.write_diffs {
                match io::remove_file_if_exists(&diff_path) {
                    Ok(true) => tracing::debug!(path = %diff_path, "Removed stale diff"),
                    Ok(false) => {}
                    Err(e) => report.error(format!("Failed to remove stale diff for {name}: {e}")),
                }
            }
        }

        if options.commit {
            let output_path = output_dir.join(&name);
            match io::write_text(&output_path, &outcome.modified) {
                Ok(()) => document.output_path = Some(output_path.to_string()),
                Err(e) => report.error(format!("Failed to commit {name}: {e}")),
            }
        }

        document
    }
}

fn file_name(path: &NormalizedPath) -> String {
    path.file_name().unwrap_or(path.as_str()).to_string()
}
