//! File strategy dispatcher
//!
//! Maps a file to its `DocumentFormat`, runs the matching extractor and
//! counts every unit it yields. All per-file failures come back as
//! `ScanError`; nothing here aborts a run.

use std::path::Path;
use tracing::debug;

use crate::backends::extract::{docx, pdf, pptx, text};
use crate::core::config::ScanConfig;
use crate::core::counter::count_unit;
use crate::core::error::ScanError;
use crate::core::model::{Unit, WordRecord};
use crate::core::normalize::normalize_and_tokenize;
use crate::core::paths::{dotted_extension, normalize_path};

/// Supported document formats, keyed by exact (case-sensitive) extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.txt`, whole file as unit 0
    Text,
    /// `.docx`, one unit per body paragraph
    Docx,
    /// `.pdf`, one unit per page
    Pdf,
    /// `.pptx`, one unit per slide shape
    Pptx,
    /// Anything else; carries the dotted extension (may be empty)
    Unsupported(String),
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        let extension = dotted_extension(path);
        match extension.as_str() {
            ".txt" => DocumentFormat::Text,
            ".docx" => DocumentFormat::Docx,
            ".pdf" => DocumentFormat::Pdf,
            ".pptx" => DocumentFormat::Pptx,
            _ => DocumentFormat::Unsupported(extension),
        }
    }

    /// What a unit index counts for this format
    pub fn unit_label(&self) -> &'static str {
        match self {
            DocumentFormat::Text => "file",
            DocumentFormat::Docx => "paragraph",
            DocumentFormat::Pdf => "page",
            DocumentFormat::Pptx => "shape",
            DocumentFormat::Unsupported(_) => "none",
        }
    }

    /// Run the extraction strategy bound to this format.
    pub fn extract(&self, path: &Path, config: &ScanConfig) -> Result<Vec<Unit>, ScanError> {
        let extracted = match self {
            DocumentFormat::Text => text::read_whole_file(path, config.text_encoding),
            DocumentFormat::Docx => docx::read_paragraphs(path),
            DocumentFormat::Pdf => pdf::read_pages(path),
            DocumentFormat::Pptx => pptx::read_slide_shapes(path),
            DocumentFormat::Unsupported(extension) => {
                return Err(ScanError::UnsupportedFormat {
                    path: path.to_path_buf(),
                    extension: extension.clone(),
                })
            }
        };

        extracted.map_err(|source| ScanError::Extraction {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Extract one file and count each of its units, in unit order.
pub fn extract_and_count(path: &Path, config: &ScanConfig) -> Result<Vec<WordRecord>, ScanError> {
    let format = DocumentFormat::from_path(path);
    let units = format.extract(path, config)?;

    debug!(
        "{}: {} {} unit(s)",
        path.display(),
        units.len(),
        format.unit_label()
    );

    Ok(count_units(&units, &normalize_path(path), config))
}

/// Tokenize and count a sequence of units belonging to `file_path`.
pub fn count_units(units: &[Unit], file_path: &str, config: &ScanConfig) -> Vec<WordRecord> {
    let mut records = Vec::new();

    for unit in units {
        let mut tokens = normalize_and_tokenize(&unit.text, &config.normalize);
        if !config.keep_empty_tokens {
            tokens.retain(|t| !t.is_empty());
        }
        records.extend(count_unit(&tokens, unit.index, file_path));
    }

    records
}
