//! Scan configuration

use std::path::PathBuf;

use crate::core::normalize::NormalizeConfig;

/// Report file name, created in the current working directory.
pub const DEFAULT_REPORT_FILE: &str = "word_scan_result.tmp.csv";

/// Strategy for plain text files that are not valid UTF-8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// Treat invalid UTF-8 as a malformed document
    #[default]
    Strict,
    /// Replace invalid sequences with U+FFFD and keep going
    Lossy,
}

/// Everything a single run needs to know
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory to scan
    pub root: PathBuf,

    /// Descend into subdirectories
    pub recursive: bool,

    /// Symbol substitution settings
    pub normalize: NormalizeConfig,

    /// Count empty-string tokens produced by consecutive spaces
    pub keep_empty_tokens: bool,

    /// How to decode `.txt` files
    pub text_encoding: TextEncoding,

    /// Report destination
    pub output: PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            recursive: false,
            normalize: NormalizeConfig::default(),
            keep_empty_tokens: true,
            text_encoding: TextEncoding::Strict,
            output: PathBuf::from(DEFAULT_REPORT_FILE),
        }
    }
}

impl ScanConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }
}
