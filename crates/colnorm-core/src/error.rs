//! Error types for colnorm-core

use std::path::PathBuf;
use thiserror::Error;

use crate::normalize::NormalizeError;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in colnorm-core
#[derive(Debug, Error)]
pub enum Error {
    /// A token in the column list is not a non-negative integer
    #[error("invalid column index '{token}' in column list '{list}'")]
    InvalidColumn { token: String, list: String },

    /// The delimiter could not be unescaped to a single ASCII character
    #[error("invalid delimiter '{value}': {reason}")]
    InvalidDelimiter { value: String, reason: String },

    /// A boolean flag value is not one of the accepted tokens
    #[error("invalid truth value '{0}'")]
    InvalidFlag(String),

    /// Failed to open the input file
    #[error("failed to open input '{path}': {source}")]
    InputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the output file
    #[error("failed to create output '{path}': {source}")]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV error from the csv crate while reading or writing
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The normalizer rejected a field
    #[error("normalization failed at line {line}, column {column}: {source}")]
    Normalize {
        line: u64,
        column: usize,
        #[source]
        source: NormalizeError,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad command-line input
    Parse,
    /// Open, read or write failure
    File,
    /// Failure inside the normalizer
    Normalize,
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidColumn { .. } | Error::InvalidDelimiter { .. } | Error::InvalidFlag(_) => {
                ErrorKind::Parse
            }
            Error::InputOpen { .. } | Error::OutputCreate { .. } | Error::Csv { .. } | Error::Io(_) => {
                ErrorKind::File
            }
            Error::Normalize { .. } => ErrorKind::Normalize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::InvalidFlag("maybe".into()).kind(), ErrorKind::Parse);
        assert_eq!(
            Error::Io(std::io::Error::other("disk full")).kind(),
            ErrorKind::File
        );
        let err = Error::Normalize {
            line: 3,
            column: 1,
            source: NormalizeError::new("boom"),
        };
        assert_eq!(err.kind(), ErrorKind::Normalize);
        assert_eq!(
            err.to_string(),
            "normalization failed at line 3, column 1: boom"
        );
    }
}
