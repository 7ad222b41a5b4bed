/*!
 * Tests for application configuration functionality
 */

use stylecast::app_config::{Config, LogLevel, ServerConfig};
use stylecast::errors::AppError;

use crate::common::{create_temp_dir, create_test_file};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.provider.model, "gpt-4o-mini");
    assert_eq!(config.provider.endpoint, "https://api.openai.com/v1");
    assert_eq!(config.provider.api_key_env, "OPENAI_API_KEY");
    assert_eq!(config.provider.timeout_secs, 60);
    assert_eq!(config.server.port, 5000);
    assert!(config.server.strip_quotes);
    assert_eq!(config.watch.file_path.to_str(), Some("write_here.txt"));
    assert_eq!(config.watch.check_interval_ms, 500);
    assert_eq!(config.watch.default_language, "english");
    assert_eq!(config.watch.default_style, "formal");
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.provider.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
    config.provider.endpoint = "ftp://example.com".to_string();
    assert!(config.validate().is_err());
    config.provider.endpoint = "http://localhost:1234/v1".to_string();
    assert!(config.validate().is_ok());

    config.provider.model = "  ".to_string();
    assert!(config.validate().is_err());
    config.provider.model = "gpt-4o-mini".to_string();

    config.watch.check_interval_ms = 0;
    assert!(config.validate().is_err());
    config.watch.check_interval_ms = 250;

    config.server = ServerConfig {
        host: "not a host".to_string(),
        ..ServerConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let config = Config::load_or_create(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config.provider.model, "gpt-4o-mini");
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(!written.contains("\"api_key\""));
}

#[test]
fn test_loadOrCreate_withPartialFile_shouldFillDefaults() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(
        dir.path(),
        "conf.json",
        r#"{"provider": {"model": "gpt-4o"}, "watch": {"check_interval_ms": 1000}, "log_level": "debug"}"#,
    )
    .unwrap();

    let config = Config::load_or_create(&path).unwrap();

    assert_eq!(config.provider.model, "gpt-4o");
    assert_eq!(config.provider.endpoint, "https://api.openai.com/v1");
    assert_eq!(config.watch.check_interval_ms, 1000);
    assert_eq!(config.watch.default_style, "formal");
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(dir.path(), "conf.json", "{ not json").unwrap();
    assert!(Config::load_or_create(&path).is_err());
}

#[test]
fn test_resolveApiKey_withMissingVariable_shouldBeConfigMissing() {
    let mut config = Config::default();
    config.provider.api_key_env = "STYLECAST_TEST_KEY_UNSET".to_string();

    let err = config.resolve_api_key().unwrap_err();
    assert!(matches!(err, AppError::ConfigMissing(_)));
    assert!(err.to_string().contains("STYLECAST_TEST_KEY_UNSET"));
}

#[test]
fn test_resolveApiKey_withVariableSet_shouldStoreKey() {
    // SAFETY: the variable name is unique to this test
    unsafe { std::env::set_var("STYLECAST_TEST_KEY_SET", " sk-test ") };

    let mut config = Config::default();
    config.provider.api_key_env = "STYLECAST_TEST_KEY_SET".to_string();

    config.resolve_api_key().unwrap();
    assert_eq!(config.provider.api_key, "sk-test");
}
