//! Storage layout comparison engine.
//!
//! Compares an expected (baseline) layout with an actual (freshly compiled)
//! layout of the same contract and produces an ordered, depth-annotated list
//! of diagnostics plus an aggregate failed flag.
//!
//! ## Entry points
//!
//! ```
//! use slguard_core::compare::compare_layouts;
//! use slguard_core::model::StorageLayout;
//!
//! let baseline = StorageLayout::default();
//! let current = StorageLayout::default();
//! let comparison = compare_layouts(&baseline, &current).unwrap();
//! assert!(!comparison.failed);
//! ```
//!
//! ## Guarantees
//!
//! - **Position safety**: any slot or offset change of a matched entry is an error.
//! - **Name-first matching**: entries match by label, with astId only as a
//!   tie-break for duplicated labels; never by position in the list.
//! - **Upward aggregation**: an error at any nesting depth fails the whole
//!   comparison.
//! - **No mutation**: inputs are borrowed immutably; matched state lives in
//!   a per-call side table.

pub mod engine;
pub mod model;

pub use engine::{compare_entries, compare_layouts, compare_types, BASE_DEPTH};
pub use model::{Comparison, Diagnostic, Severity};
