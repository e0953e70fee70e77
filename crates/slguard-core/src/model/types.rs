//! Storage type model
//!
//! The compiler describes every storage type by its `encoding`, the on-chain
//! representation strategy. Each encoding carries different structure, so the
//! model is a tagged enum with one payload struct per encoding: a `bytes`
//! type can never pick up a `base` or `members` field by accident.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::entry::StorageEntry;

/// On-chain representation strategy of a storage type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Inplace,
    Bytes,
    DynamicArray,
    Mapping,
}

impl Encoding {
    pub const ALL: [Encoding; 4] = [
        Encoding::Inplace,
        Encoding::Bytes,
        Encoding::DynamicArray,
        Encoding::Mapping,
    ];

    /// The compiler's spelling of this encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Inplace => "inplace",
            Encoding::Bytes => "bytes",
            Encoding::DynamicArray => "dynamic_array",
            Encoding::Mapping => "mapping",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoding::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// A storage type descriptor, discriminated by `encoding`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "encoding", rename_all = "snake_case")]
pub enum StorageType {
    /// Value types and structs, stored directly in their slots
    Inplace(InplaceType),
    /// `bytes` and `string`
    Bytes(BytesType),
    /// `T[]`
    DynamicArray(DynamicArrayType),
    /// `mapping(K => V)`
    Mapping(MappingType),
}

/// Scalar or struct type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InplaceType {
    pub label: String,
    /// Present iff the type is a struct
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<StorageEntry>>,
    pub number_of_bytes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BytesType {
    pub label: String,
    pub number_of_bytes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicArrayType {
    /// Element type name
    pub base: String,
    pub label: String,
    pub number_of_bytes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingType {
    pub key: String,
    pub label: String,
    pub number_of_bytes: String,
    pub value: String,
}

impl StorageType {
    pub fn encoding(&self) -> Encoding {
        match self {
            StorageType::Inplace(_) => Encoding::Inplace,
            StorageType::Bytes(_) => Encoding::Bytes,
            StorageType::DynamicArray(_) => Encoding::DynamicArray,
            StorageType::Mapping(_) => Encoding::Mapping,
        }
    }

    /// Human-readable type name, e.g. `mapping(address => uint256)`
    pub fn label(&self) -> &str {
        match self {
            StorageType::Inplace(t) => &t.label,
            StorageType::Bytes(t) => &t.label,
            StorageType::DynamicArray(t) => &t.label,
            StorageType::Mapping(t) => &t.label,
        }
    }

    /// Packed size in bytes, as the compiler reports it
    pub fn number_of_bytes(&self) -> &str {
        match self {
            StorageType::Inplace(t) => &t.number_of_bytes,
            StorageType::Bytes(t) => &t.number_of_bytes,
            StorageType::DynamicArray(t) => &t.number_of_bytes,
            StorageType::Mapping(t) => &t.number_of_bytes,
        }
    }

    /// Struct members, if this is an inplace struct
    pub fn members(&self) -> Option<&[StorageEntry]> {
        match self {
            StorageType::Inplace(t) => t.members.as_deref(),
            _ => None,
        }
    }

    /// Every type name this descriptor refers to directly, in declaration order
    pub fn referenced_types(&self) -> Vec<&str> {
        match self {
            StorageType::Inplace(_) => self
                .members()
                .unwrap_or_default()
                .iter()
                .map(|m| m.type_name.as_str())
                .collect(),
            StorageType::Bytes(_) => Vec::new(),
            StorageType::DynamicArray(t) => vec![t.base.as_str()],
            StorageType::Mapping(t) => vec![t.key.as_str(), t.value.as_str()],
        }
    }
}
