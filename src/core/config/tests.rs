use super::data::{CredentialStorage, DEFAULT_APP_TITLE};
use super::{Config, ConfigError};
use crate::core::backend::{BackendKind, DEFAULT_HOSTED_BASE_URL};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
    assert_eq!(config.backend_kind(), BackendKind::Hosted);
    assert_eq!(config.hosted_base_url(), DEFAULT_HOSTED_BASE_URL);
    assert_eq!(config.preferred_provider(), "openai");
    assert_eq!(config.model_refresh_interval(), Duration::from_secs(300));
    assert_eq!(config.credential_storage(), CredentialStorage::File);
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let config = Config {
        backend: Some(BackendKind::Local),
        default_model: Some("llama3:8b".to_string()),
        model_refresh_secs: Some(60),
        credential_storage: Some(CredentialStorage::Keyring),
        data_dir: Some(temp_dir.path().join("data")),
        ..Default::default()
    };
    config
        .save_to_path(&config_path)
        .expect("Failed to save config");
    let loaded = Config::load_from_path(&config_path).expect("Failed to load config");
    assert_eq!(loaded, config);

    let written = std::fs::read_to_string(&config_path).unwrap();
    assert!(written.contains("backend = \"local\""));
    assert!(written.contains("credential_storage = \"keyring\""));
    assert!(!written.contains("base_url"));

    let unset = Config::mutate_at(&config_path, |config| {
        config.default_model = None;
        Ok(config.backend_kind())
    })
    .expect("mutate failed");
    assert_eq!(unset, BackendKind::Local);
    let reloaded = Config::load_from_path(&config_path).unwrap();
    assert_eq!(reloaded.default_model, None);
    assert_eq!(reloaded.model_refresh_secs, Some(60));
}

#[test]
fn invalid_toml_reports_parse_error_with_path() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "backend = [unterminated").unwrap();

    let err = Config::load_from_path(&config_path).unwrap_err();
    let config_err = err
        .downcast_ref::<ConfigError>()
        .expect("parse failures are ConfigError");
    assert!(matches!(config_err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("Failed to parse config at"));
}

#[test]
fn unknown_backend_value_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, "backend = \"bedrock\"\n").unwrap();

    assert!(Config::load_from_path(&config_path).is_err());
}

#[test]
fn backend_settings_fall_back_to_defaults() {
    let config = Config {
        base_url: Some("https://gateway.example.com/api/v1/ ".to_string()),
        ..Default::default()
    };
    let settings = config.backend_settings();
    assert_eq!(settings.kind, BackendKind::Hosted);
    assert_eq!(settings.hosted_base_url, "https://gateway.example.com/api/v1");
    assert_eq!(settings.app_title, DEFAULT_APP_TITLE);

    let blank = Config {
        base_url: Some("   ".to_string()),
        ..Default::default()
    };
    assert_eq!(blank.hosted_base_url(), DEFAULT_HOSTED_BASE_URL);
}

#[test]
fn zero_refresh_interval_uses_default() {
    let config = Config {
        model_refresh_secs: Some(0),
        ..Default::default()
    };
    assert_eq!(config.model_refresh_interval(), Duration::from_secs(300));
}

#[test]
fn controller_settings_carry_model_and_provider() {
    let config = Config {
        default_model: Some("anthropic/claude-3-haiku".to_string()),
        preferred_provider: Some("anthropic".to_string()),
        ..Default::default()
    };
    let settings = config.controller_settings();
    assert_eq!(
        settings.default_model.as_deref(),
        Some("anthropic/claude-3-haiku")
    );
    assert_eq!(settings.preferred_provider, "anthropic");
}

#[test]
fn describe_lists_every_setting() {
    let config = Config {
        default_model: Some("openai/gpt-4o".to_string()),
        data_dir: Some(PathBuf::from("/var/lib/chathub")),
        ..Default::default()
    };
    let lines = config.describe();

    assert!(lines.contains(&"  backend: (unset, default: hosted)".to_string()));
    assert!(lines.contains(&"  default-model: openai/gpt-4o".to_string()));
    assert!(lines.contains(&"  refresh-secs: (unset, default: 300)".to_string()));
    assert!(lines
        .iter()
        .any(|line| line.starts_with("  data-dir: ") && line.ends_with("var/lib/chathub")));
    assert_eq!(lines.len(), 7);
}
