//! Error handling for slguard-store
//!
//! Wraps slguard-core ExError with store-specific helpers

use slguard_core::errors::{ExError, ExErrorKind, LayoutError};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Create a configuration error
pub fn invalid_config(path: &Path, reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidConfig)
        .with_op("load_config")
        .with_path(path.display().to_string())
        .with_message(reason.to_string())
}

/// Create an error for a requested contract that matches nothing
pub fn contract_not_found(requested: &str) -> ExError {
    ExError::new(ExErrorKind::ContractNotFound)
        .with_op("select_contracts")
        .with_contract(requested.to_string())
        .with_message(format!(
            "Contract {} not found. Please make sure it is compiled or use fully qualified name.",
            requested
        ))
}

/// Create an error for a simple name shared by several contracts
pub fn ambiguous_contract(requested: &str, candidates: Vec<String>) -> ExError {
    ExError::new(ExErrorKind::AmbiguousContract)
        .with_op("select_contracts")
        .with_contract(requested.to_string())
        .with_message(format!(
            "Contract {} is ambiguous. Please use fully qualified name.",
            requested
        ))
        .with_candidates(candidates)
}

/// Create an error for compiler output without `storageLayout`
pub fn storage_layout_missing(fully_qualified_name: &str, build_info: &Path) -> ExError {
    ExError::new(ExErrorKind::StorageLayoutMissing)
        .with_op("read_build_info")
        .with_contract(fully_qualified_name.to_string())
        .with_path(build_info.display().to_string())
        .with_message(
            "Please include storageLayout in compiler output: add \"storageLayout\" to \
             settings.outputSelection, for example {\"*\": {\"*\": [\"storageLayout\"]}}",
        )
}

/// Create an error for a contract absent from every build-info document
pub fn build_info_not_found(fully_qualified_name: &str, dir: &Path) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op("read_build_info")
        .with_contract(fully_qualified_name.to_string())
        .with_path(dir.display().to_string())
        .with_message("Cannot find storage layout")
}

/// Create an error for a malformed build-info document
pub fn invalid_build_info(path: &Path, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("read_build_info")
        .with_path(path.display().to_string())
        .with_message(format!("Invalid build-info document: {}", err))
}

/// Convert a layout parse failure, attaching where the layout came from
pub fn layout_error_at(err: LayoutError, path: &Path, contract: Option<&str>) -> ExError {
    let ex_err = ExError::from(err).with_path(path.display().to_string());
    match contract {
        Some(contract) => ex_err.with_contract(contract.to_string()),
        None => ex_err,
    }
}
