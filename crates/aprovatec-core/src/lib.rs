//! aprovatec-core — Semester evaluation engine, data model and reports.
//!
//! This crate defines the grade/attendance data model, the pure evaluation
//! engine that derives averages and statuses from it, and the supporting
//! pieces (validation, TOML parsing, reports) the other crates build on.

pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod sanitize;
pub mod statistics;
pub mod traits;
pub mod validate;
