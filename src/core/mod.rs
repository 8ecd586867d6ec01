//! Core module - Contains the record model and the counting pipeline
//!
//! This module provides:
//! - Record model (WordRecord, Unit, Report)
//! - Text normalization and tokenization
//! - Per-unit word counting
//! - CSV report writing
//! - Scan configuration, error types, path helpers and logging setup

pub mod config;
pub mod counter;
pub mod error;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod paths;
pub mod report;
