//! PDF reader - one unit per page

use lopdf::Document;
use std::fs::File;
use std::path::Path;

use crate::core::error::ExtractError;
use crate::core::model::Unit;

/// Read page texts in page-tree order, numbered from 1.
pub fn read_pages(path: &Path) -> Result<Vec<Unit>, ExtractError> {
    let file = File::open(path).map_err(|e| ExtractError::from_io(path, e))?;
    let mut document = Document::load_from(file).map_err(ExtractError::malformed)?;

    // Owner-password-only files open with the empty user password
    if document.is_encrypted() {
        document
            .decrypt("")
            .map_err(|e| ExtractError::Unsupported(format!("encrypted PDF: {}", e)))?;
    }

    let mut units = Vec::new();
    for (position, page_number) in document.get_pages().into_keys().enumerate() {
        let text = document
            .extract_text(&[page_number])
            .map_err(|e| ExtractError::malformed(format!("page {}: {}", page_number, e)))?;
        units.push(Unit::new(position as u32 + 1, strip_page_end(text)));
    }

    Ok(units)
}

/// Text extraction closes every page with a newline that is not page content.
fn strip_page_end(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
    }
    text
}
