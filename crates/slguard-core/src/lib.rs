//! SLGuard Core - storage layout model and comparison engine
//!
//! This crate provides the foundational pieces for guarding the persistent
//! storage layout of upgradeable contracts across compilations:
//! - The type-graph model of a compiler storage-layout snapshot
//!   (entries plus a type mapping discriminated by encoding)
//! - The recursive comparison engine producing depth-annotated diagnostics
//!   and an aggregate pass/fail flag
//! - Text rendering of diagnostics
//! - The error and logging facilities shared by every SLGuard crate

pub mod compare;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use compare::{compare_entries, compare_layouts, compare_types, Comparison, Diagnostic, Severity};
pub use errors::{ExError, ExErrorKind, LayoutError, Result};
pub use model::{Encoding, StorageEntry, StorageLayout, StorageType, TypeMap};

// Used by the exported logging macros.
#[doc(hidden)]
pub use slguard_core_types::schema;
#[doc(hidden)]
pub use tracing;
