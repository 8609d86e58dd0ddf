//! colnorm-core: Core library for normalizing text columns of delimited files
//!
//! This library provides functionality to:
//! - Validate run configuration (column lists, escaped delimiters, truth values)
//! - Stream rows from ISO-8859-1 input and write them back as UTF-8
//! - Normalize selected columns through a pluggable [`Normalizer`]
//! - Preserve header rows, untargeted fields and row order

pub mod config;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod reader;
pub mod row;
pub mod writer;

pub use config::{parse_columns, parse_flag, unescape_delimiter, ColumnSet, Configuration, Toggles};
pub use error::{Error, ErrorKind, Result};
pub use normalize::{normalize_whitespace, NormalizeError, Normalizer, TextPreprocessor};
pub use pipeline::{process, run, RunSummary, PREVIEW_ROWS};
pub use reader::RowReader;
pub use row::Row;
pub use writer::RowWriter;
