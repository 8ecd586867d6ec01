//! Tokenizer / normalizer
//!
//! Every character that is not an ASCII letter, ASCII digit or space is
//! substituted in place, so character count and positions never change:
//! - a run of such characters directly followed by a space becomes spaces
//!   (punctuation before whitespace separates words)
//! - any other run becomes the replacement character, keeping the word
//!   joined (`don't` -> `don_t`, trailing `Hello.` -> `Hello_`)
//!
//! Newlines are folded to spaces first, then the text is split on the single
//! space character. Consecutive spaces therefore yield empty tokens.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Default substitution character for non-alphanumeric symbols.
pub const DEFAULT_REPLACEMENT: char = '_';

/// A run of symbols, optionally followed by the space that turns it into a separator.
static SYMBOL_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9 ]+( )?").expect("Invalid SYMBOL_RUN_RE regex"));

/// Normalization settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeConfig {
    /// Character substituted for symbols that do not precede a space.
    pub replacement: char,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            replacement: DEFAULT_REPLACEMENT,
        }
    }
}

impl NormalizeConfig {
    pub fn new(replacement: char) -> Self {
        Self { replacement }
    }
}

/// Normalize raw unit text without splitting it.
pub fn normalize(raw_text: &str, config: &NormalizeConfig) -> String {
    let folded = raw_text.replace('\n', " ");

    SYMBOL_RUN_RE
        .replace_all(&folded, |caps: &Captures| {
            let run = &caps[0];
            if caps.get(1).is_some() {
                // Run plus its trailing space: all of it becomes separator.
                " ".repeat(run.chars().count())
            } else {
                std::iter::repeat(config.replacement)
                    .take(run.chars().count())
                    .collect()
            }
        })
        .into_owned()
}

/// Normalize raw unit text and split it into word tokens.
///
/// Empty-string tokens are part of the output; callers that do not want
/// them filter afterwards.
pub fn normalize_and_tokenize(raw_text: &str, config: &NormalizeConfig) -> Vec<String> {
    normalize(raw_text, config)
        .split(' ')
        .map(str::to_string)
        .collect()
}
