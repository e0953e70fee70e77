//! Baseline snapshots
//!
//! One pretty-printed JSON layout per contract under the layouts directory,
//! named by fully-qualified name or by simple contract name.

mod atomic;

pub use atomic::atomic_write;

use slguard_core::model::StorageLayout;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{io_error, layout_error_at, Result};
use crate::selector::ContractRef;

/// File name of a contract's baseline
pub fn baseline_file_name(contract: &ContractRef, full_path: bool) -> String {
    if full_path {
        format!("{}.json", contract.fully_qualified_name)
    } else {
        format!("{}.json", contract.contract_name)
    }
}

/// Location of a contract's baseline inside `layouts_dir`
pub fn baseline_path(layouts_dir: &Path, contract: &ContractRef, full_path: bool) -> PathBuf {
    layouts_dir.join(baseline_file_name(contract, full_path))
}

/// Read a baseline, returning `None` when it has not been captured yet.
///
/// # Errors
///
/// - `Io`: the file exists but cannot be read
/// - `InvalidLayout`, `UnknownEncoding`, `DanglingTypeRef`: the stored
///   document is not a usable layout
pub fn read_baseline(path: &Path) -> Result<Option<StorageLayout>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "baseline not captured");
            return Ok(None);
        }
        Err(e) => return Err(io_error("read_baseline", path, e)),
    };

    let layout =
        StorageLayout::from_json_bytes(&bytes).map_err(|e| layout_error_at(e, path, None))?;
    tracing::debug!(
        path = %path.display(),
        entries = layout.storage.len(),
        types = layout.types.len(),
        "baseline read"
    );
    Ok(Some(layout))
}

/// Persist a layout as the new baseline.
///
/// # Errors
///
/// - `Serialization`: the layout could not be encoded
/// - `Io`: the atomic write failed
pub fn write_baseline(path: &Path, layout: &StorageLayout) -> Result<()> {
    let document = layout
        .to_json_pretty()
        .map_err(|e| layout_error_at(e, path, None))?;
    atomic_write(path, document.as_bytes())?;
    tracing::debug!(path = %path.display(), bytes = document.len(), "baseline written");
    Ok(())
}
