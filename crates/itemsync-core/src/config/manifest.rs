//! Manifest parsing for itemsync.toml files

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{Error, Result};

/// Directory layout, relative to the working directory unless absolute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsSection {
    /// Source catalog documents
    pub source: String,
    /// Target documents to update
    pub target: String,
    /// Mirrored output, diffs and the missing report
    pub output: String,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            source: "src".to_string(),
            target: "tar".to_string(),
            output: "tmp".to_string(),
        }
    }
}

/// Which blocks are merged and what is stripped from source blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlocksSection {
    pub tag: String,
    pub identifier_attribute: String,
    /// Component tags removed from source content before it is cataloged
    pub exclude: Vec<String>,
}

impl Default for BlocksSection {
    fn default() -> Self {
        Self {
            tag: "Item".to_string(),
            identifier_attribute: "identifier".to_string(),
            exclude: vec!["Fabricate".to_string(), "Deconstruct".to_string()],
        }
    }
}

/// File naming and formatting of written output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Extension of scanned documents, without the dot
    pub extension: String,
    /// Appended to a document's file name to name its diff
    pub diff_suffix: String,
    /// File name of the missing-identifier report
    pub missing_report: String,
    /// Spaces per indentation level when converting to tabs
    pub tab_width: usize,
    /// Characters of each diff shown during preview
    pub preview_excerpt: usize,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            extension: "xml".to_string(),
            diff_suffix: ".diff.txt".to_string(),
            missing_report: "MISSING.txt".to_string(),
            tab_width: 4,
            preview_excerpt: 800,
        }
    }
}

/// Parsed itemsync configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub paths: PathsSection,
    pub blocks: BlocksSection,
    pub output: OutputSection,
}

/// Command-line replacements for manifest paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub source: Option<PathBuf>,
    pub target: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl Manifest {
    /// Apply command-line overrides in place.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        let fields = [
            (&overrides.source, &mut self.paths.source),
            (&overrides.target, &mut self.paths.target),
            (&overrides.output, &mut self.paths.output),
        ];
        for (value, field) in fields {
            if let Some(path) = value {
                *field = path.to_string_lossy().into_owned();
            }
        }
    }

    /// Check values the run depends on.
    pub fn validate(&self) -> Result<()> {
        itemsync_content::error::validate_name("tag", &self.blocks.tag)?;
        itemsync_content::error::validate_name("attribute", &self.blocks.identifier_attribute)?;
        for component in &self.blocks.exclude {
            itemsync_content::error::validate_name("component", component)?;
        }

        if self.output.extension.trim_start_matches('.').is_empty() {
            return Err(Error::invalid_config("output.extension must not be empty"));
        }
        if self.output.tab_width == 0 {
            return Err(Error::invalid_config("output.tab_width must be at least 1"));
        }
        if self.output.diff_suffix.is_empty() {
            return Err(Error::invalid_config(
                "output.diff_suffix must not be empty, diffs would overwrite outputs",
            ));
        }
        if self.output.missing_report.is_empty() {
            return Err(Error::invalid_config("output.missing_report must not be empty"));
        }
        for (name, value) in [
            ("paths.source", &self.paths.source),
            ("paths.target", &self.paths.target),
            ("paths.output", &self.paths.output),
        ] {
            if value.is_empty() {
                return Err(Error::invalid_config(format!("{name} must not be empty")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(content: &str) -> std::result::Result<Manifest, toml::de::Error> {
        toml::from_str(content)
    }

    #[test]
    fn test_empty_manifest_uses_defaults() {
        let manifest = parse("").unwrap();
        assert_eq!(manifest, Manifest::default());
        assert_eq!(manifest.blocks.exclude, vec!["Fabricate", "Deconstruct"]);
        assert_eq!(manifest.output.diff_suffix, ".diff.txt");
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_parse_full_manifest() {
        let manifest = parse(
            r#"
[paths]
source = "Text/src"
target = "Text/tar"
output = "Text/tmp"

[blocks]
tag = "Character"
identifier_attribute = "speciesname"
exclude = []

[output]
extension = "XML"
tab_width = 2
preview_excerpt = 100
"#,
        )
        .unwrap();

        assert_eq!(manifest.paths.output, "Text/tmp");
        assert_eq!(manifest.blocks.tag, "Character");
        assert!(manifest.blocks.exclude.is_empty());
        assert_eq!(manifest.output.tab_width, 2);
        assert_eq!(manifest.output.missing_report, "MISSING.txt");
    }

    #[test]
    fn test_parse_rejects_unknown_types() {
        assert!(parse("[output]\ntab_width = \"four\"").is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut manifest = Manifest::default();
        manifest.apply_overrides(&Overrides {
            source: Some(PathBuf::from("catalog")),
            target: None,
            output: Some(PathBuf::from("/tmp/out")),
        });
        assert_eq!(manifest.paths.source, "catalog");
        assert_eq!(manifest.paths.target, "tar");
        assert_eq!(manifest.paths.output, "/tmp/out");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut manifest = Manifest::default();
        manifest.blocks.tag = "Not A Tag".into();
        assert!(manifest.validate().is_err());

        let mut manifest = Manifest::default();
        manifest.output.tab_width = 0;
        assert!(matches!(manifest.validate(), Err(Error::InvalidConfig { .. })));

        let mut manifest = Manifest::default();
        manifest.output.diff_suffix.clear();
        assert!(manifest.validate().is_err());

        let mut manifest = Manifest::default();
        manifest.blocks.exclude.push("bad name".into());
        assert!(manifest.validate().is_err());
    }
}
