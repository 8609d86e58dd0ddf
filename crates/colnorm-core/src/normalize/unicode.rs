//! Unicode repair, transliteration and accent stripping

use encoding_rs::WINDOWS_1252;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static HTML_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z][a-zA-Z0-9]{1,7});").unwrap());

const MAX_MOJIBAKE_ROUNDS: usize = 3;

/// Decode HTML character references, undo UTF-8 that was decoded as
/// Windows-1252, then compose to NFC
pub fn fix_bad_unicode(text: &str) -> String {
    let mut fixed = unescape_html(text).into_owned();
    for _ in 0..MAX_MOJIBAKE_ROUNDS {
        match repair_mojibake(&fixed) {
            Some(repaired) => fixed = repaired,
            None => break,
        }
    }
    fixed.nfc().collect()
}

fn unescape_html(text: &str) -> Cow<'_, str> {
    HTML_ENTITY.replace_all(text, |caps: &Captures| {
        let name = &caps[1];
        let decoded = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
            u32::from_str_radix(hex, 16).ok().and_then(numeric_reference)
        } else if let Some(dec) = name.strip_prefix('#') {
            dec.parse::<u32>().ok().and_then(numeric_reference)
        } else {
            named_entity(name)
        };
        match decoded {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    })
}

// C0 controls other than tab, LF and CR are not valid characters in HTML
fn numeric_reference(code: u32) -> Option<char> {
    char::from_u32(code).filter(|c| *c >= ' ' || matches!(*c, '\t' | '\n' | '\r'))
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "hellip" => '…',
        "ndash" => '–',
        "mdash" => '—',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "laquo" => '«',
        "raquo" => '»',
        "euro" => '€',
        "pound" => '£',
        "yen" => '¥',
        "cent" => '¢',
        "deg" => '°',
        "eacute" => 'é',
        "egrave" => 'è',
        "aacute" => 'á',
        "agrave" => 'à',
        "ccedil" => 'ç',
        "ntilde" => 'ñ',
        "ouml" => 'ö',
        "uuml" => 'ü',
        "auml" => 'ä',
        "szlig" => 'ß',
        _ => return None,
    };
    Some(c)
}

/// One round of mojibake repair; `None` when nothing changes
fn repair_mojibake(text: &str) -> Option<String> {
    if text.is_ascii() {
        return None;
    }
    let (bytes, _, unmappable) = WINDOWS_1252.encode(text);
    if unmappable {
        return None;
    }
    match std::str::from_utf8(&bytes) {
        Ok(repaired) if repaired != text => Some(repaired.to_string()),
        _ => None,
    }
}

/// Decompose and drop combining marks
pub fn remove_accents(text: &str) -> String {
    text.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Replace every character with its closest ASCII spelling, dropping the
/// ones that have none
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfkd() {
        if c.is_ascii() {
            out.push(c);
        } else if is_combining_mark(c) {
            continue;
        } else if let Some(ascii) = ascii_fallback(c) {
            out.push_str(ascii);
        }
    }
    out
}

fn ascii_fallback(c: char) -> Option<&'static str> {
    let ascii = match c {
        'ß' => "ss",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        'ø' => "o",
        'Ø' => "O",
        'ł' => "l",
        'Ł' => "L",
        'đ' => "d",
        'Đ' => "D",
        'ð' => "d",
        'Ð' => "D",
        'þ' => "th",
        'Þ' => "Th",
        'ı' => "i",
        '‘' | '’' | '‚' | '′' => "'",
        '“' | '”' | '„' | '″' => "\"",
        '«' => "<<",
        '»' => ">>",
        '‹' => "<",
        '›' => ">",
        '–' | '—' | '‐' | '‑' | '−' => "-",
        '…' => "...",
        '•' | '·' => "*",
        '€' => "EUR",
        '£' => "PS",
        '¥' => "Y=",
        '©' => "(c)",
        '®' => "(r)",
        '°' => "deg",
        '×' => "x",
        '÷' => "/",
        '\u{a0}' => " ",
        _ => return None,
    };
    Some(ascii)
}
