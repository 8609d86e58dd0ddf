//! Delimited-file writer producing UTF-8

use crate::error::{Error, Result};
use crate::row::Row;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes [`Row`]s with the configured delimiter, quoting only when needed
///
/// A row with no fields is written as an empty line.
pub struct RowWriter<W: Write> {
    out: W,
    encoder: csv::WriterBuilder,
    scratch: Vec<u8>,
    target: PathBuf,
}

impl RowWriter<BufWriter<File>> {
    /// Create (or truncate) a file for writing
    pub fn create<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| Error::OutputCreate {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::from_writer(BufWriter::new(file), delimiter, path))
    }
}

impl<W: Write> RowWriter<W> {
    /// Wrap any writer; `target` only labels errors
    pub fn from_writer(writer: W, delimiter: u8, target: impl Into<PathBuf>) -> Self {
        let mut encoder = csv::WriterBuilder::new();
        encoder.flexible(true).delimiter(delimiter);

        Self {
            out: writer,
            encoder,
            scratch: Vec::new(),
            target: target.into(),
        }
    }

    /// Write one row
    pub fn write_row(&mut self, row: &Row) -> Result<()> {
        if row.is_empty() {
            // csv would emit `""` for a record without fields
            self.out.write_all(b"\n")?;
            return Ok(());
        }

        self.scratch.clear();
        let mut record = self.encoder.from_writer(&mut self.scratch);
        record.write_record(&row.fields).map_err(|e| Error::Csv {
            path: self.target.clone(),
            source: e,
        })?;
        record.flush()?;
        drop(record);

        self.out.write_all(&self.scratch)?;
        Ok(())
    }

    /// Flush buffered output
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_all(rows: &[Row], delimiter: u8) -> String {
        let mut writer = RowWriter::from_writer(Vec::new(), delimiter, "out.tsv");
        for row in rows {
            writer.write_row(row).unwrap();
        }
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    fn row(fields: &[&str]) -> Row {
        Row::new(1, fields.iter().map(|f| f.to_string()).collect())
    }

    #[test]
    fn test_write_tab_delimited() {
        let out = write_all(&[row(&["hello world", "EMAIL"])], b'\t');
        assert_eq!(out, "hello world\tEMAIL\n");
    }

    #[test]
    fn test_write_quotes_when_needed() {
        let out = write_all(&[row(&["a,b", "say \"hi\"", "plain"])], b',');
        assert_eq!(out, "\"a,b\",\"say \"\"hi\"\"\",plain\n");
    }

    #[test]
    fn test_write_ragged_rows() {
        let out = write_all(&[row(&["a", "b", "c"]), row(&["d"])], b',');
        assert_eq!(out, "a,b,c\nd\n");
    }

    #[test]
    fn test_write_empty_row_as_blank_line() {
        let out = write_all(&[row(&["a"]), row(&[]), row(&["b"])], b',');
        assert_eq!(out, "a\n\nb\n");
    }

    #[test]
    fn test_write_single_empty_field_is_quoted() {
        let out = write_all(&[row(&[""])], b',');
        assert_eq!(out, "\"\"\n");
    }

    #[test]
    fn test_write_utf8() {
        let out = write_all(&[row(&["café"])], b'\t');
        assert_eq!(out.as_bytes(), "café\n".as_bytes());
    }
}
