mod common;

use common::{token_layout, write_json};
use serde_json::json;
use slguard_core::errors::ExErrorKind;
use slguard_core::model::StorageLayout;
use slguard_store::baseline::{baseline_file_name, baseline_path, read_baseline, write_baseline};
use slguard_store::ContractRef;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn token() -> ContractRef {
    ContractRef::new("contracts/Token.sol", "Token")
}

#[test]
fn test_file_name_follows_full_path_setting() {
    assert_eq!(
        baseline_file_name(&token(), true),
        "contracts/Token.sol:Token.json"
    );
    assert_eq!(baseline_file_name(&token(), false), "Token.json");
    assert_eq!(
        baseline_path(Path::new("/p/storage-layouts"), &token(), false),
        PathBuf::from("/p/storage-layouts/Token.json")
    );
}

#[test]
fn test_missing_baseline_reads_as_none() {
    let temp = TempDir::new().unwrap();
    let path = baseline_path(temp.path(), &token(), true);
    assert!(read_baseline(&path).unwrap().is_none());
}

#[test]
fn test_written_baseline_is_pretty_and_reads_back() {
    let temp = TempDir::new().unwrap();
    let path = baseline_path(&temp.path().join("storage-layouts"), &token(), true);
    let layout = StorageLayout::from_value(token_layout()).unwrap();

    write_baseline(&path, &layout).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n  \"storage\": [\n"));
    assert!(text.ends_with("}\n"));
    assert_eq!(read_baseline(&path).unwrap(), Some(layout));
}

#[test]
fn test_baseline_written_by_other_tools_reads_permissively() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Token.json");
    write_json(
        &path,
        &json!({
            "storage": [{"label": "owner", "offset": 0, "slot": "0", "type": "t_address"}],
            "types": {"t_address": {"encoding": "inplace", "label": "address", "numberOfBytes": "20"}}
        }),
    );

    let layout = read_baseline(&path).unwrap().unwrap();
    assert_eq!(layout.storage[0].ast_id, 0);
    assert_eq!(layout.storage[0].contract, "");
}

#[test]
fn test_corrupt_baseline_reports_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("Token.json");
    std::fs::write(&path, "[]").unwrap();

    let err = read_baseline(&path).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidLayout);
    assert_eq!(err.path(), Some(path.display().to_string().as_str()));
}
