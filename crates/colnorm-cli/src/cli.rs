//! Command-line argument definitions

use clap::{ArgAction, Parser, ValueEnum};
use colnorm_core::{parse_columns, parse_flag, unescape_delimiter, ColumnSet, Configuration, Toggles};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "colnorm")]
#[command(about = "Normalize text in the given columns of a delimited file", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to input file (read as ISO-8859-1)
    #[arg(short, long, value_name = "PATH")]
    pub input: PathBuf,

    /// Comma separated list of column indices to normalize
    #[arg(short, long, value_name = "LIST", value_parser = columns_arg)]
    pub cols: ColumnSet,

    /// Column delimiter; backslash escapes such as '\t' are decoded
    #[arg(short, long, value_parser = delimiter_arg)]
    pub delimiter: u8,

    /// File has header row (also accepted as -header)
    #[arg(long = "hasheader", value_name = "BOOL", value_parser = flag_arg, action = ArgAction::Set,
          num_args = 0..=1, default_value = "false", default_missing_value = "true")]
    pub has_header: bool,

    /// Path to output file (written as UTF-8, overwritten if present)
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,

    /// Fix broken unicode such as mojibake and garbled HTML entities
    #[arg(long = "fix_unicode", alias = "fix-unicode", value_name = "BOOL", value_parser = flag_arg,
          action = ArgAction::Set, num_args = 0..=1, default_value = "false", default_missing_value = "true")]
    pub fix_unicode: bool,

    /// Lowercase all text
    #[arg(long = "lowercase", value_name = "BOOL", value_parser = flag_arg, action = ArgAction::Set,
          num_args = 0..=1, default_value = "false", default_missing_value = "true")]
    pub lowercase: bool,

    /// Convert non-ASCII characters into their closest ASCII equivalents
    #[arg(long = "transliterate", value_name = "BOOL", value_parser = flag_arg, action = ArgAction::Set,
          num_args = 0..=1, default_value = "false", default_missing_value = "true")]
    pub transliterate: bool,

    /// Replace all URL strings with 'URL'
    #[arg(long = "no_urls", alias = "no-urls", value_name = "BOOL", value_parser = flag_arg,
          action = ArgAction::Set, num_args = 0..=1, default_value = "false", default_missing_value = "true")]
    pub no_urls: bool,

    /// Replace all email strings with 'EMAIL'
    #[arg(long = "no_emails", alias = "no-emails", value_name = "BOOL", value_parser = flag_arg,
          action = ArgAction::Set, num_args = 0..=1, default_value = "false", default_missing_value = "true")]
    pub no_emails: bool,

    /// Replace all phone number strings with 'PHONE'
    #[arg(long = "no_phone_numbers", alias = "no-phone-numbers", value_name = "BOOL", value_parser = flag_arg,
          action = ArgAction::Set, num_args = 0..=1, default_value = "false", default_missing_value = "true")]
    pub no_phone_numbers: bool,

    /// Replace all number-like strings with 'NUMBER'
    #[arg(long = "no_numbers", alias = "no-numbers", value_name = "BOOL", value_parser = flag_arg,
          action = ArgAction::Set, num_args = 0..=1, default_value = "false", default_missing_value = "true")]
    pub no_numbers: bool,

    /// Replace all currency symbols with their standard 3-letter abbreviations
    #[arg(long = "no_currency_symbols", alias = "no-currency-symbols", value_name = "BOOL",
          value_parser = flag_arg, action = ArgAction::Set, num_args = 0..=1, default_value = "false",
          default_missing_value = "true")]
    pub no_currency_symbols: bool,

    /// Remove all punctuation
    #[arg(long = "no_punct", alias = "no-punct", value_name = "BOOL", value_parser = flag_arg,
          action = ArgAction::Set, num_args = 0..=1, default_value = "false", default_missing_value = "true")]
    pub no_punct: bool,

    /// Replace English contractions with their unshortened forms
    #[arg(long = "no_contractions", alias = "no-contractions", value_name = "BOOL", value_parser = flag_arg,
          action = ArgAction::Set, num_args = 0..=1, default_value = "false", default_missing_value = "true")]
    pub no_contractions: bool,

    /// Replace accented characters with unaccented versions
    #[arg(long = "no_accents", alias = "no-accents", value_name = "BOOL", value_parser = flag_arg,
          action = ArgAction::Set, num_args = 0..=1, default_value = "false", default_missing_value = "true")]
    pub no_accents: bool,

    /// Collapse and trim whitespace after all other transforms
    #[arg(long = "normalize_whitespace", alias = "normalize-whitespace", value_name = "BOOL",
          value_parser = flag_arg, action = ArgAction::Set, num_args = 0..=1, default_value = "false",
          default_missing_value = "true")]
    pub normalize_whitespace: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log output format
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl Cli {
    /// Preprocessing switches selected on the command line
    pub fn toggles(&self) -> Toggles {
        Toggles {
            fix_unicode: self.fix_unicode,
            lowercase: self.lowercase,
            transliterate: self.transliterate,
            no_urls: self.no_urls,
            no_emails: self.no_emails,
            no_phone_numbers: self.no_phone_numbers,
            no_numbers: self.no_numbers,
            no_currency_symbols: self.no_currency_symbols,
            no_punct: self.no_punct,
            no_contractions: self.no_contractions,
            no_accents: self.no_accents,
        }
    }

    /// The immutable run configuration
    pub fn configuration(&self) -> Configuration {
        Configuration::new(&self.input, &self.output, self.delimiter, self.cols.clone())
            .with_header(self.has_header)
            .with_toggles(self.toggles())
            .with_normalize_whitespace(self.normalize_whitespace)
    }
}

/// Parse an argument vector (program name first)
pub fn parse_cli<I, T>(argv: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    Cli::try_parse_from(argv.into_iter().map(|arg| rewrite_header_flag(arg.into())))
}

/// Parse an argument vector straight into a [`Configuration`]
pub fn configure<I, T>(argv: I) -> Result<Configuration, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    parse_cli(argv).map(|cli| cli.configuration())
}

// clap has no single-dash long flags, so `-header` is rewritten up front
fn rewrite_header_flag(arg: OsString) -> OsString {
    match arg.to_str() {
        Some("-header") => OsString::from("--hasheader"),
        Some(s) => match s.strip_prefix("-header=") {
            Some(value) => OsString::from(format!("--hasheader={}", value)),
            None => arg,
        },
        None => arg,
    }
}

fn flag_arg(value: &str) -> Result<bool, String> {
    parse_flag(value).map_err(|e| e.to_string())
}

fn columns_arg(value: &str) -> Result<ColumnSet, String> {
    parse_columns(value).map_err(|e| e.to_string())
}

fn delimiter_arg(value: &str) -> Result<u8, String> {
    unescape_delimiter(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_header_flag() {
        assert_eq!(rewrite_header_flag("-header".into()), OsString::from("--hasheader"));
        assert_eq!(rewrite_header_flag("-header=yes".into()), OsString::from("--hasheader=yes"));
        assert_eq!(rewrite_header_flag("-headers".into()), OsString::from("-headers"));
        assert_eq!(rewrite_header_flag("--hasheader".into()), OsString::from("--hasheader"));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
