//! colnorm-cli: argument parsing, logging setup and run reports for the `colnorm` binary

pub mod cli;
pub mod logging;
pub mod report;

pub use cli::{configure, parse_cli, Cli, LogFormatArg};
