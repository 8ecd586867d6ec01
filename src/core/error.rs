//! Error taxonomy
//!
//! Per-file errors (`ScanError`) are recovered by the scan loop; only
//! `ReportError` ends a run.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure raised by an extraction collaborator for a single file.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed document: {0}")]
    Malformed(String),

    #[error("unsupported document feature: {0}")]
    Unsupported(String),
}

impl ExtractError {
    /// Classify an io error raised while opening or reading `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            ExtractError::NotFound(path.to_path_buf())
        } else {
            ExtractError::Io(err)
        }
    }

    pub fn malformed(detail: impl std::fmt::Display) -> Self {
        ExtractError::Malformed(detail.to_string())
    }
}

/// Why a file contributed nothing to the report.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("unsupported file type {extension:?} for {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("unable to process file {}: {source}", path.display())]
    Extraction {
        path: PathBuf,
        #[source]
        source: ExtractError,
    },
}

/// The report destination could not be created or written.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot create report in {}: {source}", dir.display())]
    Create {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write report row: {0}")]
    Write(#[from] csv::Error),

    #[error("cannot flush report: {0}")]
    Flush(#[source] io::Error),

    #[error("cannot persist report to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
