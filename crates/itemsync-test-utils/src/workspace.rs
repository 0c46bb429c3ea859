//! [`TestWorkspace`] builder for itemsync run scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary working directory laid out with the default `src`, `tar`
/// and `tmp` directories.
///
/// # Example
///
/// ```rust
/// use itemsync_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.write_source("items.xml", r#"<Item identifier="rope_1"><price>10</price></Item>"#);
/// ws.write_target("items.xml", r#"<Item identifier="rope_1"><price>5</price></Item>"#);
/// assert!(ws.root().join("src/items.xml").is_file());
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create the temporary directory with empty `src` and `tar` directories.
    /// `tmp` is left for the run to create.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        for dir in ["src", "tar"] {
            fs::create_dir_all(temp_dir.path().join(dir)).unwrap();
        }
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file relative to the root, creating parents.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn write_source(&self, name: &str, content: &str) -> PathBuf {
        self.write(&format!("src/{name}"), content)
    }

    pub fn write_target(&self, name: &str, content: &str) -> PathBuf {
        self.write(&format!("tar/{name}"), content)
    }

    /// Write `itemsync.toml` at the root.
    pub fn write_config(&self, content: &str) -> PathBuf {
        self.write("itemsync.toml", content)
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        self.root().join("tmp").join(name)
    }

    /// Read a file from the output directory.
    ///
    /// # Panics
    /// Panics if the file does not exist.
    pub fn read_output(&self, name: &str) -> String {
        let path = self.output_path(name);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read output file: {}", path.display()))
    }

    /// Assert that `name` exists in the output directory.
    pub fn assert_output_exists(&self, name: &str) {
        let path = self.output_path(name);
        assert!(path.exists(), "Expected output to exist: {}", path.display());
    }

    /// Assert that `name` does **not** exist in the output directory.
    pub fn assert_output_not_exists(&self, name: &str) {
        let path = self.output_path(name);
        assert!(
            !path.exists(),
            "Expected output NOT to exist: {}",
            path.display()
        );
    }
}
