use itemsync_fs::{ConfigStore, Error, NormalizedPath};
use serde::Deserialize;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Deserialize, PartialEq)]
struct TestConfig {
    name: String,
    count: i32,
}

fn load(file: &str, content: &str) -> itemsync_fs::Result<TestConfig> {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join(file);
    fs::write(&file_path, content).unwrap();
    ConfigStore::new().load(&NormalizedPath::new(&file_path))
}

#[test]
fn test_load_toml() {
    let config = load("config.toml", "name = \"test\"\ncount = 42").unwrap();
    assert_eq!(config, TestConfig { name: "test".into(), count: 42 });
}

#[test]
fn test_load_json() {
    let config = load("config.json", r#"{"name": "test", "count": 42}"#).unwrap();
    assert_eq!(config.count, 42);
}

#[test]
fn test_load_yaml() {
    let config = load("config.yml", "name: test\ncount: 42").unwrap();
    assert_eq!(config.name, "test");
}

#[test]
fn test_load_invalid_toml() {
    let err = load("config.toml", "name = ").unwrap_err();
    assert!(matches!(err, Error::ConfigParse { ref format, .. } if format == "TOML"));
}

#[test]
fn test_load_unsupported_extension() {
    let err = load("config.ini", "name=test").unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { ref extension } if extension == "ini"));
}
