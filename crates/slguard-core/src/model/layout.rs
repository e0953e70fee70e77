//! Storage layout snapshot
//!
//! A [`StorageLayout`] is the unit of comparison: the ordered top-level
//! storage entries of one contract plus every type they reach. Each snapshot
//! is self-contained, so all type references resolve within its own mapping.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::errors::{LayoutError, Result};
use crate::model::entry::StorageEntry;
use crate::model::types::{Encoding, StorageType};

/// Type name to descriptor. Sorted so persisted baselines are stable.
pub type TypeMap = BTreeMap<String, StorageType>;

/// Storage layout of one compiled contract
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLayout {
    pub storage: Vec<StorageEntry>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub types: TypeMap,
}

/// The compiler writes `"types": null` for contracts without storage.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<TypeMap, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TypeMap>::deserialize(deserializer)?.unwrap_or_default())
}

impl StorageLayout {
    pub fn new(storage: Vec<StorageEntry>, types: TypeMap) -> Self {
        Self { storage, types }
    }

    /// Parse a layout document from raw bytes.
    ///
    /// # Errors
    ///
    /// - `InvalidLayout`: not UTF-8 JSON, or not shaped like a layout
    /// - `UnknownEncoding`: a type uses an encoding this build does not know
    /// - `DanglingTypeRef`: a type reference does not resolve
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| LayoutError::InvalidLayout {
            reason: format!("layout is not valid UTF-8: {}", e),
        })?;
        let raw: Value = serde_json::from_str(text).map_err(|e| LayoutError::InvalidLayout {
            reason: format!("layout is not valid JSON: {}", e),
        })?;
        Self::from_value(raw)
    }

    /// Build a layout from an already parsed JSON value.
    ///
    /// Unknown encodings are detected on the raw value first, so they surface
    /// as `UnknownEncoding` rather than as a generic shape error.
    ///
    /// # Errors
    ///
    /// Same as [`StorageLayout::from_json_bytes`], minus the UTF-8/JSON cases.
    pub fn from_value(raw: Value) -> Result<Self> {
        let obj = raw.as_object().ok_or_else(|| LayoutError::InvalidLayout {
            reason: "layout JSON root must be an object".to_string(),
        })?;
        if !obj.contains_key("storage") {
            return Err(LayoutError::InvalidLayout {
                reason: "required field `storage` is absent".to_string(),
            });
        }

        if let Some(types) = obj.get("types").and_then(Value::as_object) {
            for (type_name, descriptor) in types {
                let encoding = descriptor
                    .get("encoding")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                if encoding.parse::<Encoding>().is_err() {
                    return Err(LayoutError::UnknownEncoding {
                        encoding: encoding.to_string(),
                        type_name: type_name.clone(),
                    });
                }
            }
        }

        let layout: StorageLayout =
            serde_json::from_value(raw).map_err(|e| LayoutError::InvalidLayout {
                reason: format!("failed to deserialize layout: {}", e),
            })?;
        layout.check_type_refs()?;
        Ok(layout)
    }

    /// Serialize with two-space indentation and a trailing newline.
    ///
    /// # Errors
    ///
    /// - `Serialization`: serde_json failed (not expected for valid layouts)
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    /// Find the first top-level entry with the given label.
    ///
    /// # Errors
    ///
    /// - `EntryNotFound`: no entry carries that label
    pub fn entry_by_label(&self, label: &str) -> Result<&StorageEntry> {
        self.storage
            .iter()
            .find(|e| e.label == label)
            .ok_or_else(|| LayoutError::EntryNotFound {
                key_kind: "Label".to_string(),
                key: label.to_string(),
            })
    }

    /// Find the top-level entry with the given astId.
    ///
    /// # Errors
    ///
    /// - `EntryNotFound`: no entry carries that astId
    pub fn entry_by_ast_id(&self, ast_id: u64) -> Result<&StorageEntry> {
        self.storage
            .iter()
            .find(|e| e.ast_id == ast_id)
            .ok_or_else(|| LayoutError::EntryNotFound {
                key_kind: "AstId".to_string(),
                key: ast_id.to_string(),
            })
    }

    /// Verify that every type reference in the layout resolves.
    ///
    /// Covers top-level entries, struct members, array bases, and mapping
    /// keys and values.
    ///
    /// # Errors
    ///
    /// - `DanglingTypeRef`: the first unresolved reference found
    pub fn check_type_refs(&self) -> Result<()> {
        for entry in &self.storage {
            self.require_type(&entry.type_name, &entry.label)?;
        }
        for (type_name, descriptor) in &self.types {
            for referenced in descriptor.referenced_types() {
                self.require_type(referenced, type_name)?;
            }
        }
        Ok(())
    }

    fn require_type(&self, type_name: &str, referenced_by: &str) -> Result<()> {
        if self.types.contains_key(type_name) {
            Ok(())
        } else {
            Err(LayoutError::DanglingTypeRef {
                type_name: type_name.to_string(),
                referenced_by: referenced_by.to_string(),
                side: "layout".to_string(),
            })
        }
    }
}
