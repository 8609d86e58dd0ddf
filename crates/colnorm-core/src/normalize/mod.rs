//! Text normalization
//!
//! The pipeline only talks to the [`Normalizer`] trait. [`TextPreprocessor`]
//! is the built-in implementation for English text and applies its steps in
//! a fixed order:
//!
//! 1. fix unicode (HTML entities, mojibake, NFC)
//! 2. transliterate to ASCII
//! 3. lowercase
//! 4. URLs, emails, phone numbers, numbers → placeholder tokens
//! 5. currency symbols → ISO 4217 codes
//! 6. expand contractions
//! 7. strip accents
//! 8. strip punctuation
//! 9. normalize whitespace (always)

mod replace;
mod unicode;

use crate::config::Toggles;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub use replace::{
    remove_punct, replace_currency_symbols, replace_emails, replace_numbers,
    replace_phone_numbers, replace_urls, unpack_contractions,
};
pub use unicode::{fix_bad_unicode, remove_accents, transliterate};

/// Failure reported by a [`Normalizer`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct NormalizeError {
    message: String,
}

impl NormalizeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A text-normalization capability applied to selected fields
pub trait Normalizer {
    /// Apply every enabled toggle to `text`
    fn preprocess(&self, text: &str, toggles: &Toggles) -> Result<String, NormalizeError>;

    /// Collapse whitespace runs and trim
    fn normalize_whitespace(&self, text: &str) -> String;
}

/// Built-in normalizer for English corpora
#[derive(Debug, Clone, Copy, Default)]
pub struct TextPreprocessor;

impl Normalizer for TextPreprocessor {
    fn preprocess(&self, text: &str, toggles: &Toggles) -> Result<String, NormalizeError> {
        let mut text = text.to_string();

        if toggles.fix_unicode {
            text = fix_bad_unicode(&text);
        }
        if toggles.transliterate {
            text = transliterate(&text);
        }
        if toggles.lowercase {
            text = text.to_lowercase();
        }
        if toggles.no_urls {
            text = replace_urls(&text);
        }
        if toggles.no_emails {
            text = replace_emails(&text);
        }
        if toggles.no_phone_numbers {
            text = replace_phone_numbers(&text);
        }
        if toggles.no_numbers {
            text = replace_numbers(&text);
        }
        if toggles.no_currency_symbols {
            text = replace_currency_symbols(&text);
        }
        if toggles.no_contractions {
            text = unpack_contractions(&text);
        }
        if toggles.no_accents {
            text = remove_accents(&text);
        }
        if toggles.no_punct {
            text = remove_punct(&text);
        }

        Ok(normalize_whitespace(&text))
    }

    fn normalize_whitespace(&self, text: &str) -> String {
        normalize_whitespace(text)
    }
}

static LINEBREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:\r\n|[\n\x0b])+").unwrap());
// a whitespace run that starts with something other than a newline
static NON_BREAKING_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\S\n]\s*").unwrap());

/// Collapse runs of line breaks to one `\n`, every other whitespace run to a
/// single space, and trim both ends
pub fn normalize_whitespace(text: &str) -> String {
    let text = LINEBREAK.replace_all(text, "\n");
    NON_BREAKING_SPACE
        .replace_all(&text, " ")
        .trim()
        .to_string()
}
