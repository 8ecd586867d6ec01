//! Record model
//!
//! Every extraction strategy maps its output to `Unit`s, and every unit is
//! counted into `WordRecord`s before anything reaches the report.

use serde::Serialize;

/// Unit index used by single-unit formats (plain text).
pub const WHOLE_FILE_UNIT: u32 = 0;

/// One logical subdivision of a document, as yielded by an extractor.
///
/// `index` is 0 for whole-file formats and 1-based for page, paragraph and
/// shape based formats. What the index counts depends on the format; see
/// `DocumentFormat::unit_label`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub index: u32,
    pub text: String,
}

impl Unit {
    pub fn new(index: u32, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// Count of one distinct normalized word within one unit of one file.
///
/// Field order is the report column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordRecord {
    pub file_path: String,
    pub unit_index: u32,
    pub word: String,
    pub occurrence_count: u64,
}

impl WordRecord {
    /// Report header, in field declaration order
    pub const HEADER: [&'static str; 4] = ["file_path", "unit_index", "word", "occurrence_count"];
}

/// Append-only record collection threaded through a scan.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub records: Vec<WordRecord>,
}

impl Report {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = WordRecord>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl IntoIterator for Report {
    type Item = WordRecord;
    type IntoIter = std::vec::IntoIter<WordRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl FromIterator<WordRecord> for Report {
    fn from_iter<T: IntoIterator<Item = WordRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
