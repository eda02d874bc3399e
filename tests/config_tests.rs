use jsonquill::config::Config;
use jsonquill::document::{DuplicateKeys, JsonValue};
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.duplicate_keys, DuplicateKeys::Overwrite);
}

#[test]
fn test_serialize_to_toml() {
    let config = Config {
        duplicate_keys: DuplicateKeys::Reject,
    };
    let toml_string = toml::to_string(&config).unwrap();
    assert!(toml_string.contains("duplicate_keys = \"reject\""));
}

#[test]
fn test_deserialize_from_toml() {
    let config: Config = toml::from_str("duplicate_keys = \"reject\"\n").unwrap();
    assert_eq!(config.duplicate_keys, DuplicateKeys::Reject);
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_unknown_policy_is_rejected() {
    let result: Result<Config, _> = toml::from_str("duplicate_keys = \"merge\"\n");
    assert!(result.is_err());
}

#[test]
fn test_save_and_load_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.toml");

    let config = Config {
        duplicate_keys: DuplicateKeys::Reject,
    };
    config.save_to(&path).unwrap();
    assert!(path.exists());

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_from_missing_file_fails_with_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");

    let error = Config::load_from(&path).unwrap_err();
    assert!(format!("{:#}", error).contains("absent.toml"));
}

#[test]
fn test_load_from_invalid_toml_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "duplicate_keys = [").unwrap();

    let error = Config::load_from(&path).unwrap_err();
    assert!(error.to_string().starts_with("Invalid config file"));
}

#[test]
fn test_parse_document_follows_policy() {
    let text = r#"{"a": 1, "b": {"c": 2, "c": 3}}"#;

    let lenient = Config::default().parse_document(text).unwrap();
    assert_eq!(lenient, JsonValue::from(json!({"a": 1, "b": {"c": 3}})));

    let strict = Config {
        duplicate_keys: DuplicateKeys::Reject,
    };
    let error = strict.parse_document(text).unwrap_err();
    assert!(error.to_string().contains("Duplicate key 'c' in object"));
}
