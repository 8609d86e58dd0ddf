//! Integration tests for argument parsing and end-to-end runs.

use clap::error::ErrorKind;
use colnorm_cli::{configure, parse_cli};
use colnorm_core::{run, TextPreprocessor};
use std::fs;
use tempfile::tempdir;

const BASE: [&str; 9] = ["colnorm", "-i", "in.tsv", "-o", "out.tsv", "-c", "0,1", "-d", "\\t"];

fn args(extra: &[&str]) -> Vec<String> {
    BASE.iter().chain(extra).map(|s| s.to_string()).collect()
}

#[test]
fn test_defaults() {
    let config = configure(args(&[])).unwrap();

    assert_eq!(config.delimiter, b'\t');
    assert_eq!(config.columns.indices(), &[0, 1]);
    assert!(!config.has_header);
    assert!(!config.normalize_whitespace);
    assert!(config.toggles.entries().iter().all(|(_, on)| !on));
}

#[test]
fn test_truth_value_spellings() {
    let config = configure(args(&[
        "--lowercase=TRUE",
        "--no_emails",
        "yes",
        "--no_urls=1",
        "--no_punct=off",
        "--fix_unicode",
    ]))
    .unwrap();

    assert!(config.toggles.lowercase);
    assert!(config.toggles.no_emails);
    assert!(config.toggles.no_urls);
    assert!(!config.toggles.no_punct);
    assert!(config.toggles.fix_unicode);
}

#[test]
fn test_single_dash_header_alias() {
    let config = configure(args(&["-header", "true"])).unwrap();
    assert!(config.has_header);

    let config = configure(args(&["-header=no"])).unwrap();
    assert!(!config.has_header);

    let config = configure(args(&["--hasheader=y"])).unwrap();
    assert!(config.has_header);
}

#[test]
fn test_invalid_truth_value() {
    let err = configure(args(&["--lowercase=maybe"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}

#[test]
fn test_malformed_cols() {
    let argv = ["colnorm", "-i", "in.tsv", "-o", "out.tsv", "-c", "a,b", "-d", ","];
    let err = configure(argv).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
}

#[test]
fn test_malformed_cols_before_any_io() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.tsv");
    let output_arg = output.to_str().unwrap();

    let argv = ["colnorm", "-i", "missing.tsv", "-o", output_arg, "-c", "a,b", "-d", "\\t"];
    assert!(configure(argv).is_err());
    assert!(!output.exists());
}

#[test]
fn test_missing_required() {
    let err = configure(["colnorm", "-i", "in.tsv"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_bad_delimiter() {
    let argv = ["colnorm", "-i", "a", "-o", "b", "-c", "0", "-d", "ab"];
    assert_eq!(configure(argv).unwrap_err().kind(), ErrorKind::ValueValidation);
}

#[test]
fn test_verbosity_and_json() {
    let cli = parse_cli(args(&["-vv", "--json", "--log-format", "compact"])).unwrap();
    assert_eq!(cli.verbose, 2);
    assert!(cli.json);
}

#[test]
fn test_end_to_end_from_argv() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.tsv");
    let output = dir.path().join("out.tsv");
    fs::write(&input, "Hello World\tfoo@bar.com\n").unwrap();

    let config = configure([
        "colnorm",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "-c",
        "0,1",
        "-d",
        "\\t",
        "--lowercase=true",
        "--no_emails=true",
    ])
    .unwrap();
    run(&config, &TextPreprocessor).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "hello world\tEMAIL\n");
}

#[test]
fn test_end_to_end_with_header() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.tsv");
    let output = dir.path().join("out.tsv");
    fs::write(&input, "name\tmail\nAlice\ta@b.com\n").unwrap();

    let config = configure([
        "colnorm",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "-c",
        "1",
        "-d",
        "\\t",
        "--hasheader=true",
        "--no_emails=true",
    ])
    .unwrap();
    run(&config, &TextPreprocessor).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "name\tmail\nAlice\tEMAIL\n");
}
