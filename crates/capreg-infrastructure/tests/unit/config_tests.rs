//! Configuration save/load tests

use capreg_infrastructure::config::{ConfigLoader, LoggingConfig, RegistryConfig};
use tempfile::TempDir;

#[test]
fn test_config_save_load() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("capreg_test.toml");

    let original = RegistryConfig {
        config_file: "settings.json".to_string(),
        storage_file: "kv.db".to_string(),
        db_url: Some("json://fixtures/models.json".to_string()),
        logging: LoggingConfig {
            level: "debug".to_string(),
            json_format: true,
            file_output: None,
        },
        ..Default::default()
    };

    let loader = ConfigLoader::new().without_dotenv();
    loader.save_to_file(&original, &config_path).unwrap();

    let loaded = ConfigLoader::new()
        .without_dotenv()
        .with_config_path(&config_path)
        .load()
        .unwrap();

    assert_eq!(loaded.config_file, "settings.json");
    assert_eq!(loaded.storage_file, "kv.db");
    assert_eq!(loaded.db_url.as_deref(), Some("json://fixtures/models.json"));
    assert!(loaded.logging.json_format);
}

#[test]
fn test_missing_explicit_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();

    let loader = ConfigLoader::new()
        .without_dotenv()
        .with_config_path(temp_dir.path().join("absent.toml"));
    let config = loader.load().unwrap();

    assert_eq!(config.api_timeout_secs, RegistryConfig::default().api_timeout_secs);
    assert_eq!(
        loader.config_path(),
        Some(temp_dir.path().join("absent.toml").as_path())
    );
}

#[test]
fn test_malformed_toml_is_a_configuration_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("broken.toml");
    std::fs::write(&config_path, "storage_file = [").unwrap();

    let err = ConfigLoader::new()
        .without_dotenv()
        .with_config_path(&config_path)
        .load()
        .unwrap_err();

    assert!(matches!(
        err,
        capreg_domain::error::Error::Configuration { .. }
    ));
}
