use attachstore_core::StorageMode;

use super::*;

#[test]
fn empty_config_uses_defaults() {
    let config: AttachstoreConfig = toml::from_str("").unwrap();
    assert_eq!(config.storage.mode, StorageMode::File);
    assert_eq!(config.storage.filestore, PathBuf::from("filestore"));
    assert_eq!(
        config.storage.on_remote_write_failure,
        RemoteWriteFailure::Fail
    );
    assert!(config.params.is_empty());
}

#[test]
fn full_config() {
    let toml = r#"
[storage]
mode = "db"
filestore = "/var/lib/attachstore"
on_remote_write_failure = "fallback_to_local"

[params]
aws_bucket_name = "attachments"
aws_prefix_file_name = "prod_"
"#;
    let config = AttachstoreConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.storage.mode, StorageMode::Db);
    assert_eq!(config.storage.filestore, PathBuf::from("/var/lib/attachstore"));
    assert_eq!(
        config.storage.on_remote_write_failure,
        RemoteWriteFailure::FallbackToLocal
    );
    assert_eq!(
        config.params.get("aws_bucket_name").map(String::as_str),
        Some("attachments")
    );
    assert_eq!(
        config.params.get("aws_prefix_file_name").map(String::as_str),
        Some("prod_")
    );
}

#[test]
fn unknown_policy_is_rejected() {
    let err = AttachstoreConfig::from_toml_str(
        r#"
[storage]
on_remote_write_failure = "retry_forever"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("attachstore.toml");
    std::fs::write(&path, "[params]\naws_region = \"eu-west-1\"\n").unwrap();
    let config = AttachstoreConfig::load(&path).unwrap();
    assert_eq!(
        config.params.get("aws_region").map(String::as_str),
        Some("eu-west-1")
    );
}

#[test]
fn load_missing_file_reports_path() {
    let err = AttachstoreConfig::load("/nonexistent/attachstore.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/attachstore.toml"));
}
