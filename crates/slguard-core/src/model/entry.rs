//! Storage entry model
//!
//! A storage entry is one declared storage variable as the compiler reports
//! it: where it lives (slot and byte offset) and which type it has.

use serde::{Deserialize, Serialize};

/// One declared storage variable
///
/// Field order follows the compiler output so persisted baselines diff
/// cleanly against freshly emitted layouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageEntry {
    /// Compiler-assigned declaration id, stable across recompilation.
    ///
    /// Only used to tell apart entries sharing a label.
    #[serde(default)]
    pub ast_id: u64,

    /// Fully-qualified name of the declaring contract
    #[serde(default)]
    pub contract: String,

    /// Declared variable name (not unique under inheritance)
    pub label: String,

    /// Byte offset within the slot
    pub offset: u32,

    /// Slot index as an arbitrary-precision decimal string
    pub slot: String,

    /// Name of the entry's type in the layout's type mapping
    #[serde(rename = "type")]
    pub type_name: String,
}

impl StorageEntry {
    /// Create an entry with no astId or declaring contract
    pub fn new(
        label: impl Into<String>,
        slot: impl Into<String>,
        offset: u32,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            ast_id: 0,
            contract: String::new(),
            label: label.into(),
            offset,
            slot: slot.into(),
            type_name: type_name.into(),
        }
    }

    pub fn with_ast_id(mut self, ast_id: u64) -> Self {
        self.ast_id = ast_id;
        self
    }

    pub fn with_contract(mut self, contract: impl Into<String>) -> Self {
        self.contract = contract.into();
        self
    }

    /// True if both entries occupy the same slot.
    ///
    /// Slots are compared numerically, so `"007"` and `"7"` are the same slot.
    pub fn same_slot(&self, other: &StorageEntry) -> bool {
        canonical_slot(&self.slot) == canonical_slot(&other.slot)
    }

    /// True if both entries start at the same byte offset.
    pub fn same_offset(&self, other: &StorageEntry) -> bool {
        self.offset == other.offset
    }
}

fn canonical_slot(slot: &str) -> &str {
    let trimmed = slot.trim().trim_start_matches('0');
    if trimmed.is_empty() {
        "0"
    } else {
        trimmed
    }
}
