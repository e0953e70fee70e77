use slguard_core::errors::ExErrorKind;
use slguard_store::config::{load_config, CONFIG_FILE_NAME};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_missing_config_file_uses_defaults() {
    let temp = TempDir::new().unwrap();
    let config = load_config(temp.path(), None).unwrap();

    assert!(config.storage_layout.full_path);
    assert_eq!(config.layouts_dir(), temp.path().join("storage-layouts"));
    assert_eq!(
        config.build_info_dir(),
        temp.path().join("artifacts").join("build-info")
    );
}

#[test]
fn test_config_file_at_root_is_read() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join(CONFIG_FILE_NAME),
        r#"
[storage_layout]
contracts = ["Vault", "contracts/Token.sol:Token"]
full_path = false
layouts_dir = "layouts"
"#,
    )
    .unwrap();

    let config = load_config(temp.path(), None).unwrap();

    assert_eq!(config.storage_layout.contracts.len(), 2);
    assert!(!config.storage_layout.full_path);
    assert_eq!(config.layouts_dir(), temp.path().join("layouts"));
}

#[test]
fn test_absolute_layouts_dir_is_kept() {
    let temp = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join(CONFIG_FILE_NAME),
        format!(
            "[storage_layout]\nlayouts_dir = {:?}\n",
            elsewhere.path().display().to_string()
        ),
    )
    .unwrap();

    let config = load_config(temp.path(), None).unwrap();
    assert_eq!(config.layouts_dir(), PathBuf::from(elsewhere.path()));
}

#[test]
fn test_explicit_config_path_must_exist() {
    let temp = TempDir::new().unwrap();
    let err = load_config(temp.path(), Some(&temp.path().join("other.toml"))).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Io);
}

#[test]
fn test_malformed_config_is_invalid() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("custom.toml");
    std::fs::write(&path, "[storage_layout]\nfull_path = \"yes\"\n").unwrap();

    let err = load_config(temp.path(), Some(&path)).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
}
