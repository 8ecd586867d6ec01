//! Extraction collaborators
//!
//! Each reader turns one document into an ordered list of `Unit`s:
//! - text: whole file, unit 0
//! - docx: body paragraphs, 1-based
//! - pptx: slide shapes, 1-based across the whole deck
//! - pdf: pages, 1-based
//!
//! Every reader opens its file handle inside the call, so the handle is
//! released on every exit path, failures included.

pub mod docx;
pub mod pdf;
pub mod pptx;
pub mod text;

use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::core::error::ExtractError;

/// Open an Office Open XML package (docx/pptx are zip archives).
pub(crate) fn open_package(path: &Path) -> Result<ZipArchive<File>, ExtractError> {
    let file = File::open(path).map_err(|e| ExtractError::from_io(path, e))?;
    ZipArchive::new(file).map_err(|e| match e {
        ZipError::Io(io) => ExtractError::Io(io),
        other => ExtractError::malformed(format!("not an OOXML package: {}", other)),
    })
}

/// Read one XML part of a package as UTF-8 text.
pub(crate) fn read_part(archive: &mut ZipArchive<File>, name: &str) -> Result<String, ExtractError> {
    let mut part = archive.by_name(name).map_err(|e| match e {
        ZipError::FileNotFound => ExtractError::malformed(format!("missing part {}", name)),
        ZipError::Io(io) => ExtractError::Io(io),
        other => ExtractError::malformed(other),
    })?;

    let mut buf = Vec::new();
    part.read_to_end(&mut buf)?;
    String::from_utf8(buf).map_err(|_| ExtractError::malformed(format!("part {} is not UTF-8", name)))
}

/// Map any XML parser error onto the malformed-content category.
pub(crate) fn xml_error(err: impl std::fmt::Display) -> ExtractError {
    ExtractError::malformed(format!("xml: {}", err))
}
