//! Report sink
//!
//! Flattens the record collection into a CSV file. Rows are written to a
//! temporary file next to the destination, which replaces the destination
//! only once every row has been flushed.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

use crate::core::error::ReportError;
use crate::core::model::{Report, WordRecord};

/// Write header and rows to any writer.
///
/// The header comes from the record field names; an empty report still
/// gets one.
pub fn write_records<W: Write>(records: &[WordRecord], writer: W) -> Result<W, ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if records.is_empty() {
        csv_writer.write_record(WordRecord::HEADER)?;
    }
    for record in records {
        csv_writer.serialize(record)?;
    }

    csv_writer
        .into_inner()
        .map_err(|e| ReportError::Flush(e.into_error()))
}

/// Write the report to `destination`, replacing any previous file.
///
/// Returns the number of data rows written.
pub fn write_report(report: &Report, destination: &Path) -> Result<usize, ReportError> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let staging = staging_file(&dir).map_err(|source| ReportError::Create {
        dir: dir.clone(),
        source,
    })?;

    let staging = write_records(&report.records, staging)?;
    staging
        .as_file()
        .sync_all()
        .map_err(ReportError::Flush)?;
    staging
        .persist(destination)
        .map_err(|e| ReportError::Persist {
            path: destination.to_path_buf(),
            source: e.error,
        })?;

    Ok(report.len())
}

/// Temp file that ends up with the mode a plain `File::create` would give.
fn staging_file(dir: &Path) -> io::Result<NamedTempFile> {
    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // 0o666 is narrowed by the process umask at creation
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    builder.prefix(".wordscan").tempfile_in(dir)
}
