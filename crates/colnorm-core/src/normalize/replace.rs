//! Pattern-based replacements: placeholders, currency codes, contractions
//! and punctuation

use once_cell::sync::Lazy;
use regex::Regex;

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:(?:https?|ftp)://|www\.)[^\s<>"]*[^\s<>".,;:!?)\]'’”]"#).unwrap()
});

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:mailto:)?[a-z0-9!#$%&'*+/=?^_\x60{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_\x60{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?",
    )
    .unwrap()
});

// group 1 is the boundary character, put back on replacement
static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(^|[^\w)])((?:\+?1[ .-]?)?(?:\(?\d{3}\)?[ .-]?)?\d{3}[ .-]?\d{4}(?:\s?(?:ext\.?|[#x-])\s?\d{2,6})?)\b",
    )
    .unwrap()
});

static NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(^|[^\w,.])([+\-–]?(?:[1-9]\d{0,2}(?:,\d{3})+(?:\.\d*)?|[1-9]\d{0,2}(?:[ .]\d{3})+(?:,\d*)?|\d*[.,]\d+|\d+))\b",
    )
    .unwrap()
});

static PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{P}+").unwrap());

const CURRENCIES: &[(&str, &str)] = &[
    ("$", "USD"),
    ("zł", "PLN"),
    ("£", "GBP"),
    ("¥", "JPY"),
    ("฿", "THB"),
    ("₡", "CRC"),
    ("₦", "NGN"),
    ("₩", "KRW"),
    ("₪", "ILS"),
    ("₫", "VND"),
    ("€", "EUR"),
    ("₱", "PHP"),
    ("₲", "PYG"),
    ("₴", "UAH"),
    ("₹", "INR"),
];

static CONTRACTIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (
            r"\b([Aa]re|[Cc]ould|[Dd]id|[Dd]oes|[Dd]o|[Hh]ad|[Hh]as|[Hh]ave|[Ii]s|[Mm]ight|[Mm]ust|[Ss]hould|[Ww]ere|[Ww]ould)n['’]t",
            "${1} not",
        ),
        (
            r"\b([Hh]e|[Ii]|[Ss]he|[Tt]hey|[Ww]e|[Ww]hat|[Ww]ho|[Yy]ou)['’]ll",
            "${1} will",
        ),
        (r"\b([Tt]hey|[Ww]e|[Ww]hat|[Ww]ho|[Yy]ou)['’]re", "${1} are"),
        (
            r"\b([Ii]|[Ss]hould|[Tt]hey|[Ww]e|[Ww]hat|[Ww]ho|[Ww]ould|[Yy]ou)['’]ve",
            "${1} have",
        ),
        (r"\b([Cc]a)n['’]t", "${1}n not"),
        (r"\b([Ii])['’]m", "${1} am"),
        (r"\b([Ll]et)['’]s", "${1} us"),
        (r"\b([Ww])on['’]t", "${1}ill not"),
        (r"\b([Ss])han['’]t", "${1}hall not"),
        (r"\b([Yy])(?:['’]all|a['’]ll)", "${1}ou all"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Replace URLs with `URL`
pub fn replace_urls(text: &str) -> String {
    URL.replace_all(text, "URL").into_owned()
}

/// Replace email addresses with `EMAIL`
pub fn replace_emails(text: &str) -> String {
    EMAIL.replace_all(text, "EMAIL").into_owned()
}

/// Replace phone numbers with `PHONE`
pub fn replace_phone_numbers(text: &str) -> String {
    PHONE.replace_all(text, "${1}PHONE").into_owned()
}

/// Replace number-like tokens with `NUMBER`
pub fn replace_numbers(text: &str) -> String {
    NUMBER.replace_all(text, "${1}NUMBER").into_owned()
}

/// Replace currency symbols with their ISO 4217 code
pub fn replace_currency_symbols(text: &str) -> String {
    CURRENCIES
        .iter()
        .fold(text.to_string(), |acc, (symbol, code)| acc.replace(symbol, code))
}

/// Expand English contractions, e.g. "don't" to "do not"
pub fn unpack_contractions(text: &str) -> String {
    CONTRACTIONS
        .iter()
        .fold(text.to_string(), |acc, (pattern, replacement)| {
            pattern.replace_all(&acc, *replacement).into_owned()
        })
}

/// Remove every Unicode punctuation character
pub fn remove_punct(text: &str) -> String {
    PUNCT.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_urls() {
        assert_eq!(replace_urls("go to https://example.com/x?y=1."), "go to URL.");
        assert_eq!(replace_urls("www.rust-lang.org rocks"), "URL rocks");
        assert_eq!(replace_urls("no links here"), "no links here");
    }

    #[test]
    fn test_replace_emails() {
        assert_eq!(replace_emails("mail a@b.com today"), "mail EMAIL today");
        assert_eq!(replace_emails("First.Last+tag@Sub.Example.org"), "EMAIL");
    }

    #[test]
    fn test_replace_phone_numbers() {
        assert_eq!(replace_phone_numbers("call 555-123-4567 now"), "call PHONE now");
        assert_eq!(replace_phone_numbers("+1 (555) 123-4567"), "PHONE");
        assert_eq!(replace_phone_numbers("room 12"), "room 12");
    }

    #[test]
    fn test_replace_numbers() {
        assert_eq!(
            replace_numbers("I have 3 apples and 1,000.50 dollars"),
            "I have NUMBER apples and NUMBER dollars"
        );
        assert_eq!(replace_numbers("pi is 3.14"), "pi is NUMBER");
        assert_eq!(replace_numbers("abc123"), "abc123");
    }

    #[test]
    fn test_replace_currency_symbols() {
        assert_eq!(replace_currency_symbols("$5 or €4 or £3"), "USD5 or EUR4 or GBP3");
        assert_eq!(replace_currency_symbols("10 zł"), "10 PLN");
    }

    #[test]
    fn test_unpack_contractions() {
        assert_eq!(unpack_contractions("Don't stop"), "Do not stop");
        assert_eq!(unpack_contractions("They're sure we'll win"), "They are sure we will win");
        assert_eq!(unpack_contractions("I'm here, let's go"), "I am here, let us go");
        assert_eq!(unpack_contractions("won't, can't, shan't"), "will not, can not, shall not");
        assert_eq!(unpack_contractions("y'all I’ve"), "you all I have");
    }

    #[test]
    fn test_remove_punct() {
        assert_eq!(remove_punct("Hello, world! (ok)"), "Hello world ok");
        assert_eq!(remove_punct("costs $5"), "costs $5");
    }
}
