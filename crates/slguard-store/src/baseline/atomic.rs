//! Atomic write primitives
//!
//! Uses temp→rename so a baseline is either the old document or the new one

use crate::errors::{io_error, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file
///
/// Creates missing parent directories, writes a sibling temp file, then
/// renames it over the target.
///
/// # Errors
///
/// - `Io`: directory creation, write, or rename failed
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_layouts_dir", parent, e))?;
    }

    let temp_path = temp_path_for(target_path);

    fs::write(&temp_path, content).map_err(|e| io_error("write_baseline_temp", &temp_path, e))?;

    if let Err(e) = fs::rename(&temp_path, target_path) {
        fs::remove_file(&temp_path).ok();
        return Err(io_error("rename_baseline_temp", target_path, e));
    }

    Ok(())
}

/// `Vault.json` → `Vault.json.tmp`; contract names may contain dots.
fn temp_path_for(target_path: &Path) -> PathBuf {
    let mut name = target_path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    target_path.with_file_name(name)
}
