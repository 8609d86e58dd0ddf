//! Read → normalize → write loop
//!
//! Rows are streamed one at a time: the optional header is copied through,
//! every later row has its target columns run through the [`Normalizer`]
//! (then the whitespace pass, if enabled) and is written back in input order.
//! Empty lines come back out as empty lines, except that an empty first line
//! taken as the header is dropped.

use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::normalize::Normalizer;
use crate::reader::RowReader;
use crate::row::Row;
use crate::writer::RowWriter;
use serde::Serialize;
use std::io::{Read, Write};
use tracing::{debug, info, trace};

/// Number of processed rows echoed at debug level
pub const PREVIEW_ROWS: usize = 5;

/// Counters for a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Rows read from input, header included
    pub rows_read: usize,
    /// Rows written to output, header included
    pub rows_written: usize,
    /// Whether a non-empty header row was copied through
    pub header_written: bool,
    /// Number of fields passed to the normalizer
    pub fields_transformed: usize,
}

/// Normalize `config.input` into `config.output`
///
/// The input is opened before the output is created, so a missing input
/// never truncates an existing output file.
pub fn run<N: Normalizer + ?Sized>(config: &Configuration, normalizer: &N) -> Result<RunSummary> {
    let reader = RowReader::open(&config.input, config.delimiter)?;
    let writer = RowWriter::create(&config.output, config.delimiter)?;

    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        "processing input"
    );
    let summary = process_rows(config, normalizer, reader, writer)?;
    info!(
        rows = summary.rows_written,
        fields = summary.fields_transformed,
        "done"
    );

    Ok(summary)
}

/// Run the pipeline over arbitrary handles instead of the configured paths
pub fn process<N, R, W>(config: &Configuration, normalizer: &N, input: R, output: W) -> Result<RunSummary>
where
    N: Normalizer + ?Sized,
    R: Read,
    W: Write,
{
    let reader = RowReader::from_reader(input, config.delimiter, &config.input);
    let writer = RowWriter::from_writer(output, config.delimiter, &config.output);
    process_rows(config, normalizer, reader, writer)
}

fn process_rows<N, R, W>(
    config: &Configuration,
    normalizer: &N,
    mut reader: RowReader<R>,
    mut writer: RowWriter<W>,
) -> Result<RunSummary>
where
    N: Normalizer + ?Sized,
    R: Read,
    W: Write,
{
    let mut summary = RunSummary::default();

    if config.has_header {
        if let Some(header) = reader.next_row()? {
            summary.rows_read += 1;
            if header.is_empty() {
                debug!(line = header.line, "empty header line dropped");
            } else {
                writer.write_row(&header)?;
                summary.rows_written += 1;
                summary.header_written = true;
            }
        }
    }

    let mut previewed = 0;
    while let Some(mut row) = reader.next_row()? {
        summary.rows_read += 1;
        summary.fields_transformed += normalize_row(&mut row, config, normalizer)?;

        if previewed < PREVIEW_ROWS {
            debug!(line = row.line, fields = ?row.fields, "normalized row");
            previewed += 1;
        }

        writer.write_row(&row)?;
        summary.rows_written += 1;
    }

    writer.flush()?;
    Ok(summary)
}

/// Normalize the target fields of one row in place; returns how many fields
/// were touched
fn normalize_row<N: Normalizer + ?Sized>(
    row: &mut Row,
    config: &Configuration,
    normalizer: &N,
) -> Result<usize> {
    let line = row.line;
    let mut transformed = 0;

    for (column, field) in row.fields.iter_mut().enumerate() {
        if !config.columns.contains(column) {
            continue;
        }
        let normalized = normalizer
            .preprocess(field, &config.toggles)
            .map_err(|source| Error::Normalize {
                line,
                column,
                source,
            })?;
        trace!(line, column, before = %field, after = %normalized, "preprocessed field");
        *field = normalized;
        transformed += 1;
    }

    // second pass, strictly after every other transform
    if config.normalize_whitespace {
        for (column, field) in row.fields.iter_mut().enumerate() {
            if config.columns.contains(column) {
                *field = normalizer.normalize_whitespace(field);
            }
        }
    }

    Ok(transformed)
}
