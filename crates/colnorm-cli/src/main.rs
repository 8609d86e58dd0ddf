//! colnorm CLI
//!
//! Normalizes text in selected columns of a delimited file.

use colnorm_cli::logging::{init_logging, LogConfig, LogFormat};
use colnorm_cli::report::{json_report, text_report};
use colnorm_cli::{parse_cli, Cli, LogFormatArg};
use colnorm_core::{run, TextPreprocessor};
use std::io::{self, IsTerminal};

fn main() {
    let cli = match parse_cli(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    let log_config = LogConfig::from_verbosity(cli.verbose)
        .with_format(match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        })
        .with_ansi(io::stderr().is_terminal());
    if let Err(e) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = execute(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn execute(cli: &Cli) -> colnorm_core::Result<()> {
    let config = cli.configuration();

    // keep stdout clean for the JSON summary
    if cli.json {
        eprint!("\nArguments:\n{}", config);
    } else {
        print!("\nArguments:\n{}", config);
    }

    let summary = run(&config, &TextPreprocessor)?;

    if cli.json {
        let json = json_report(&config, &summary).map_err(io::Error::from)?;
        println!("{}", json);
    } else {
        print!("{}", text_report(&summary, &config.output));
    }

    Ok(())
}
