//! Core types shared across SLGuard facilities
//!
//! This crate provides the canonical field keys and event names used by
//! both the error facility and the logging facility, so every crate logs
//! the same structured shape.

pub mod schema;
