//! Unit counter - turns one unit's tokens into word records

use std::collections::HashMap;

use crate::core::model::WordRecord;

/// Count distinct tokens of a single unit.
///
/// Records come out in first-occurrence order of each token; counts never
/// span more than this token sequence.
pub fn count_unit<S: AsRef<str>>(tokens: &[S], unit_index: u32, file_path: &str) -> Vec<WordRecord> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counted: Vec<(&str, u64)> = Vec::new();

    for token in tokens {
        let token = token.as_ref();
        match slots.get(token) {
            Some(&slot) => counted[slot].1 += 1,
            None => {
                slots.insert(token, counted.len());
                counted.push((token, 1));
            }
        }
    }

    counted
        .into_iter()
        .map(|(word, occurrence_count)| WordRecord {
            file_path: file_path.to_string(),
            unit_index,
            word: word.to_string(),
            occurrence_count,
        })
        .collect()
}
