//! Compiler build-info reader
//!
//! Build-info documents are the compiler's standard JSON output wrapped by
//! the build tool. Only `output.contracts[source][name].storageLayout` is
//! read; everything else in the document is skipped while deserializing.

use serde::Deserialize;
use serde_json::Value;
use slguard_core::model::StorageLayout;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{
    build_info_not_found, invalid_build_info, io_error, layout_error_at, storage_layout_missing,
    Result,
};
use crate::selector::ContractRef;

#[derive(Debug, Deserialize)]
struct BuildInfo {
    #[serde(default)]
    output: BuildInfoOutput,
}

#[derive(Debug, Default, Deserialize)]
struct BuildInfoOutput {
    #[serde(default)]
    contracts: BTreeMap<String, BTreeMap<String, ContractOutput>>,
}

#[derive(Debug, Deserialize)]
struct ContractOutput {
    #[serde(rename = "storageLayout", default)]
    storage_layout: Option<Value>,
}

/// Build-info documents loaded from one directory, in file name order
#[derive(Debug)]
pub struct BuildInfoSet {
    dir: PathBuf,
    documents: Vec<(PathBuf, BuildInfo)>,
}

impl BuildInfoSet {
    /// Load every `*.json` document in `dir`.
    ///
    /// A missing directory yields an empty set: nothing has been compiled.
    ///
    /// # Errors
    ///
    /// - `Io`: the directory or a document cannot be read
    /// - `InvalidInput`: a document is not build-info JSON
    pub fn load(dir: &Path) -> Result<Self> {
        let mut paths = match fs::read_dir(dir) {
            Ok(read_dir) => read_dir
                .map(|entry| entry.map(|e| e.path()))
                .collect::<std::io::Result<Vec<PathBuf>>>()
                .map_err(|e| io_error("list_build_info", dir, e))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(dir = %dir.display(), "build-info directory missing");
                Vec::new()
            }
            Err(e) => return Err(io_error("list_build_info", dir, e)),
        };
        paths.retain(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"));
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let bytes = fs::read(&path).map_err(|e| io_error("read_build_info", &path, e))?;
            let document: BuildInfo =
                serde_json::from_slice(&bytes).map_err(|e| invalid_build_info(&path, e))?;
            documents.push((path, document));
        }

        tracing::debug!(
            dir = %dir.display(),
            documents = documents.len(),
            "build-info loaded"
        );

        Ok(Self {
            dir: dir.to_path_buf(),
            documents,
        })
    }

    /// Every compiled contract, sorted and without duplicates
    pub fn contracts(&self) -> Vec<ContractRef> {
        let mut contracts: Vec<ContractRef> = self
            .documents
            .iter()
            .flat_map(|(_, doc)| {
                doc.output.contracts.iter().flat_map(|(source, by_name)| {
                    by_name
                        .keys()
                        .map(move |name| ContractRef::new(source.clone(), name.clone()))
                })
            })
            .collect();
        contracts.sort();
        contracts.dedup();
        contracts
    }

    /// Fresh storage layout of a contract.
    ///
    /// The first document (in file name order) that compiled the contract
    /// is authoritative.
    ///
    /// # Errors
    ///
    /// - `StorageLayoutMissing`: the compiler was not asked for `storageLayout`
    /// - `NotFound`: no document contains the contract
    /// - `InvalidLayout`, `UnknownEncoding`, `DanglingTypeRef`: the layout is
    ///   not usable
    pub fn storage_layout(&self, contract: &ContractRef) -> Result<StorageLayout> {
        for (path, doc) in &self.documents {
            let Some(output) = doc
                .output
                .contracts
                .get(&contract.source_name)
                .and_then(|by_name| by_name.get(&contract.contract_name))
            else {
                continue;
            };

            let raw = match &output.storage_layout {
                Some(raw) if !raw.is_null() => raw.clone(),
                _ => return Err(storage_layout_missing(&contract.fully_qualified_name, path)),
            };

            tracing::debug!(
                contract = %contract,
                build_info = %path.display(),
                "storage layout found"
            );
            return StorageLayout::from_value(raw)
                .map_err(|e| layout_error_at(e, path, Some(&contract.fully_qualified_name)));
        }

        Err(build_info_not_found(&contract.fully_qualified_name, &self.dir))
    }
}
