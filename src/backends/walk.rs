//! Directory walker
//!
//! Uses walkdir for traversal. Candidate files are listed in file-name order
//! and handed one at a time to the dispatcher; a failing file is logged and
//! skipped.

use anyhow::{bail, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::backends::dispatch::extract_and_count;
use crate::core::config::ScanConfig;
use crate::core::error::ScanError;
use crate::core::model::Report;
use crate::core::paths::dedup_key;

/// Counters for the end-of-run summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub discovered: usize,
    pub processed: usize,
    pub unsupported: usize,
    pub failed: usize,
    pub records: usize,
}

/// List regular files under `root`, each once.
///
/// Non-recursive mode only looks at direct children. Symlinks are never
/// descended into, but a symlink that resolves to a regular file counts as
/// that file.
pub fn collect_file_paths(root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        bail!("{} is not a readable directory", root.display());
    }

    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                if err.depth() == 0 {
                    bail!("cannot read {}: {}", root.display(), err);
                }
                warn!("Skipping unreadable entry: {}", err);
                continue;
            }
        };

        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        if seen.insert(dedup_key(entry.path())) {
            paths.push(entry.into_path());
        } else {
            debug!("Skipping duplicate {}", entry.path().display());
        }
    }

    Ok(paths)
}

/// Dispatch every path in order, appending records to `report`.
pub fn scan_paths(paths: &[PathBuf], config: &ScanConfig, report: &mut Report) -> ScanSummary {
    let mut summary = ScanSummary {
        discovered: paths.len(),
        ..Default::default()
    };

    for path in paths {
        match extract_and_count(path, config) {
            Ok(records) => {
                summary.processed += 1;
                summary.records += records.len();
                report.extend(records);
            }
            Err(err @ ScanError::UnsupportedFormat { .. }) => {
                summary.unsupported += 1;
                warn!("{}", err);
            }
            Err(err @ ScanError::Extraction { .. }) => {
                summary.failed += 1;
                warn!("{}", err);
            }
        }
    }

    summary
}
