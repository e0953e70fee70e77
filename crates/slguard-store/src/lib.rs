//! SLGuard Store - filesystem side of the storage layout guard
//!
//! Provides:
//! - Project configuration (`slguard.toml`) loading and path normalization
//! - Baseline snapshot persistence with atomic writes
//! - Compiler build-info reader for fresh storage layouts
//! - Contract selection from an allow-list of simple or qualified names

pub mod artifacts;
pub mod baseline;
pub mod config;
pub mod errors;
pub mod selector;

// Re-export key types
pub use config::{load_config, ProjectConfig, StorageLayoutConfig};
pub use errors::Result;
pub use selector::ContractRef;
