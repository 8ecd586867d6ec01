//! Plain text reader - the whole file is one unit

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::core::config::TextEncoding;
use crate::core::error::ExtractError;
use crate::core::model::{Unit, WHOLE_FILE_UNIT};

/// Read a text file as a single unit with index 0.
///
/// Line endings are unified to `\n` before the text is handed on.
pub fn read_whole_file(path: &Path, encoding: TextEncoding) -> Result<Vec<Unit>, ExtractError> {
    let mut file = File::open(path).map_err(|e| ExtractError::from_io(path, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| ExtractError::from_io(path, e))?;

    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(err) => match encoding {
            TextEncoding::Strict => {
                return Err(ExtractError::malformed(format!(
                    "invalid UTF-8 at byte {}",
                    err.utf8_error().valid_up_to()
                )))
            }
            TextEncoding::Lossy => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        },
    };

    Ok(vec![Unit::new(WHOLE_FILE_UNIT, unify_line_endings(&content))])
}

fn unify_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}
