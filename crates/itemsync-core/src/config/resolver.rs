//! Locating and loading the manifest

use itemsync_fs::{ConfigStore, NormalizedPath};
use std::path::Path;

use super::manifest::{Manifest, Overrides};
use crate::{Error, Result};

/// Manifest looked up in the working directory when no path is given
pub const CONFIG_FILE_NAME: &str = "itemsync.toml";

/// Resolves the effective configuration for a working directory.
///
/// Precedence, lowest first: built-in defaults, the manifest file,
/// command-line overrides.
pub struct ConfigResolver {
    root: NormalizedPath,
}

impl ConfigResolver {
    pub fn new(root: NormalizedPath) -> Self {
        Self { root }
    }

    /// Default manifest location
    pub fn default_path(&self) -> NormalizedPath {
        self.root.join(CONFIG_FILE_NAME)
    }

    /// Load the manifest and apply overrides.
    ///
    /// An explicit `config` path must exist. Without one, `itemsync.toml`
    /// is used when present and defaults otherwise. The result is validated.
    pub fn resolve(&self, config: Option<&Path>, overrides: &Overrides) -> Result<Manifest> {
        let mut manifest = match config {
            Some(path) => {
                let path = self.root.join(path);
                if !path.is_file() {
                    return Err(Error::ConfigNotFound {
                        path: path.to_native(),
                    });
                }
                self.load(&path)?
            }
            None => {
                let path = self.default_path();
                if path.is_file() {
                    self.load(&path)?
                } else {
                    tracing::debug!(path = %path, "No manifest found, using defaults");
                    Manifest::default()
                }
            }
        };

        manifest.apply_overrides(overrides);
        manifest.validate()?;
        Ok(manifest)
    }

    fn load(&self, path: &NormalizedPath) -> Result<Manifest> {
        tracing::debug!(path = %path, "Loading manifest");
        Ok(ConfigStore::new().load(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn resolver(dir: &TempDir) -> ConfigResolver {
        ConfigResolver::new(NormalizedPath::new(dir.path()))
    }

    #[test]
    fn test_resolve_without_manifest_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let manifest = resolver(&dir).resolve(None, &Overrides::default()).unwrap();
        assert_eq!(manifest, Manifest::default());
    }

    #[test]
    fn test_resolve_reads_default_manifest_and_overrides() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[paths]\nsource = \"catalog\"\ntarget = \"mods\"\n",
        )
        .unwrap();

        let overrides = Overrides {
            target: Some(PathBuf::from("other")),
            ..Default::default()
        };
        let manifest = resolver(&dir).resolve(None, &overrides).unwrap();
        assert_eq!(manifest.paths.source, "catalog");
        assert_eq!(manifest.paths.target, "other");
    }

    #[test]
    fn test_resolve_explicit_json_manifest() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("sync.json"), r#"{"blocks": {"tag": "Character"}}"#).unwrap();

        let manifest = resolver(&dir)
            .resolve(Some(Path::new("sync.json")), &Overrides::default())
            .unwrap();
        assert_eq!(manifest.blocks.tag, "Character");
        assert_eq!(manifest.blocks.identifier_attribute, "identifier");
    }

    #[test]
    fn test_resolve_missing_explicit_manifest() {
        let dir = TempDir::new().unwrap();
        let result = resolver(&dir).resolve(Some(Path::new("absent.toml")), &Overrides::default());
        assert!(matches!(result, Err(Error::ConfigNotFound { .. })));
    }

    #[test]
    fn test_resolve_invalid_manifest_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "[output]\ntab_width = 0\n").unwrap();
        let result = resolver(&dir).resolve(None, &Overrides::default());
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }
}
