//! Run configuration and the validating parsers that build it

use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

/// Boolean preprocessing switches handed to the normalizer as one unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Toggles {
    /// Repair mojibake, HTML entities and non-canonical unicode
    pub fix_unicode: bool,
    /// Lowercase all text
    pub lowercase: bool,
    /// Map non-ASCII characters to their closest ASCII equivalents
    pub transliterate: bool,
    /// Replace URLs with `URL`
    pub no_urls: bool,
    /// Replace email addresses with `EMAIL`
    pub no_emails: bool,
    /// Replace phone numbers with `PHONE`
    pub no_phone_numbers: bool,
    /// Replace number-like tokens with `NUMBER`
    pub no_numbers: bool,
    /// Replace currency symbols with their 3-letter codes
    pub no_currency_symbols: bool,
    /// Remove punctuation
    pub no_punct: bool,
    /// Expand English contractions
    pub no_contractions: bool,
    /// Strip accents
    pub no_accents: bool,
}

impl Toggles {
    /// Name/value pairs in flag order
    pub fn entries(&self) -> [(&'static str, bool); 11] {
        [
            ("fix_unicode", self.fix_unicode),
            ("lowercase", self.lowercase),
            ("transliterate", self.transliterate),
            ("no_urls", self.no_urls),
            ("no_emails", self.no_emails),
            ("no_phone_numbers", self.no_phone_numbers),
            ("no_numbers", self.no_numbers),
            ("no_currency_symbols", self.no_currency_symbols),
            ("no_punct", self.no_punct),
            ("no_contractions", self.no_contractions),
            ("no_accents", self.no_accents),
        ]
    }
}

/// Set of 0-based column indices selected for normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet {
    /// Indices in the order they were given
    indices: Vec<usize>,
    lookup: HashSet<usize>,
}

impl ColumnSet {
    /// Build a set from indices; duplicates are kept for display but
    /// collapse for lookup
    pub fn new(indices: Vec<usize>) -> Self {
        let lookup = indices.iter().copied().collect();
        Self { indices, lookup }
    }

    /// Whether the field at `index` should be normalized
    pub fn contains(&self, index: usize) -> bool {
        self.lookup.contains(&index)
    }

    /// Indices in their original order
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl Serialize for ColumnSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.indices.serialize(serializer)
    }
}

/// Immutable configuration for a single run
#[derive(Debug, Clone, Serialize)]
pub struct Configuration {
    /// Input file, decoded as ISO-8859-1
    pub input: PathBuf,
    /// Output file, written as UTF-8
    pub output: PathBuf,
    /// Field delimiter byte
    #[serde(serialize_with = "serialize_delimiter")]
    pub delimiter: u8,
    /// First row is a header and passes through untouched
    pub has_header: bool,
    /// Columns to normalize
    pub columns: ColumnSet,
    /// Preprocessing switches
    pub toggles: Toggles,
    /// Run the whitespace pass after preprocessing
    pub normalize_whitespace: bool,
}

impl Configuration {
    /// Create a configuration with no header and all switches off
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        delimiter: u8,
        columns: ColumnSet,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            delimiter,
            has_header: false,
            columns,
            toggles: Toggles::default(),
            normalize_whitespace: false,
        }
    }

    #[must_use]
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    #[must_use]
    pub fn with_toggles(mut self, toggles: Toggles) -> Self {
        self.toggles = toggles;
        self
    }

    #[must_use]
    pub fn with_normalize_whitespace(mut self, enable: bool) -> Self {
        self.normalize_whitespace = enable;
        self
    }

    /// Every resolved value as `(name, value)` for the startup echo
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = vec![
            ("input", self.input.display().to_string()),
            ("cols", format!("{:?}", self.columns.indices())),
            ("delimiter", display_delimiter(self.delimiter)),
            ("hasheader", self.has_header.to_string()),
            ("output", self.output.display().to_string()),
        ];
        entries.extend(
            self.toggles
                .entries()
                .into_iter()
                .map(|(name, value)| (name, value.to_string())),
        );
        entries.push(("normalize_whitespace", self.normalize_whitespace.to_string()));
        entries
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.entries() {
            writeln!(f, "{}={}", name, value)?;
        }
        Ok(())
    }
}

fn display_delimiter(delimiter: u8) -> String {
    char::from(delimiter).escape_default().to_string()
}

fn serialize_delimiter<S: Serializer>(delimiter: &u8, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_char(char::from(*delimiter))
}

/// Parse a truth value: `y yes t true on 1` or `n no f false off 0`,
/// case-insensitive
pub fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "t" | "true" | "on" | "1" => Ok(true),
        "n" | "no" | "f" | "false" | "off" | "0" => Ok(false),
        _ => Err(Error::InvalidFlag(value.to_string())),
    }
}

/// Parse a comma-separated list of non-negative column indices
pub fn parse_columns(list: &str) -> Result<ColumnSet> {
    let indices = list
        .split(',')
        .map(|token| {
            token.trim().parse::<usize>().map_err(|_| Error::InvalidColumn {
                token: token.to_string(),
                list: list.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(ColumnSet::new(indices))
}

/// Unescape backslash notation (`\t`, `\x09`, `\u0009`, ...) and require
/// exactly one ASCII character
pub fn unescape_delimiter(raw: &str) -> Result<u8> {
    let invalid = |reason: String| Error::InvalidDelimiter {
        value: raw.to_string(),
        reason,
    };

    let decoded = unescape(raw).map_err(invalid)?;
    let mut chars = decoded.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Err(invalid("delimiter is empty".to_string())),
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        (Some(c), None) => Err(invalid(format!(
            "'{}' is not an ASCII character",
            c.escape_default()
        ))),
        (Some(_), Some(_)) => Err(invalid(format!(
            "expected a single character, got {}",
            decoded.chars().count()
        ))),
    }
}

fn unescape(raw: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some(escape) = chars.next() else {
            return Err("trailing backslash".to_string());
        };

        match escape {
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0b'),
            '0'..='7' => {
                let mut value = escape.to_digit(8).unwrap_or_default();
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(code_point(value)?);
            }
            'x' => out.push(hex_escape(&mut chars, 2)?),
            'u' => out.push(hex_escape(&mut chars, 4)?),
            'U' => out.push(hex_escape(&mut chars, 8)?),
            // unknown escapes are kept verbatim
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    Ok(out)
}

fn hex_escape(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    digits: usize,
) -> std::result::Result<char, String> {
    let hex: String = chars.by_ref().take(digits).collect();
    if hex.len() != digits || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("truncated \\x, \\u or \\U escape '{}'", hex));
    }
    let value = u32::from_str_radix(&hex, 16).map_err(|e| e.to_string())?;
    code_point(value)
}

fn code_point(value: u32) -> std::result::Result<char, String> {
    char::from_u32(value).ok_or_else(|| format!("U+{:X} is not a valid code point", value))
}
