use docnav::config::{ConfigLoader, StoreConfig};
use docnav::ApiError;
use std::fs;
use tempfile::TempDir;

#[test]
fn explicit_file_overrides_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("docnav.toml");
    fs::write(
        &path,
        r#"
[store]
base_url = "https://vfs.example.com"
root_id = "bec46267-cc3c-45bf-9bd2-52928c6f44ef"

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(config.store.base_url, "https://vfs.example.com");
    assert_eq!(
        config.store.root_id.as_deref(),
        Some("bec46267-cc3c-45bf-9bd2-52928c6f44ef")
    );
    assert_eq!(config.store.user_token, "public");
    assert_eq!(config.store.timeout_secs, StoreConfig::default().timeout_secs);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.output, "stderr");
}

#[test]
fn invalid_store_url_is_a_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("docnav.toml");
    fs::write(&path, "[store]\nbase_url = \"ftp://files\"\n").unwrap();

    let err = ConfigLoader::load_from_file(&path).unwrap_err();
    assert!(matches!(err, ApiError::ConfigError(_)));
}

#[test]
fn missing_explicit_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = ConfigLoader::load_from_file(&temp_dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ApiError::ConfigError(_)));
}
