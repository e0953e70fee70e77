//! SLGuard Engine - Orchestration layer
//!
//! Provides the `storage-layout` command that coordinates build artifacts,
//! baselines, and the comparison engine across every selected contract.

pub mod commands;
