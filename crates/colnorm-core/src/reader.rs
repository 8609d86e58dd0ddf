//! Delimited-file reader that decodes fields as ISO-8859-1
//!
//! The `csv` parser skips empty lines without reporting them, so the reader
//! keeps the raw bytes of the record it is parsing and turns every line
//! terminator found between two records into an empty [`Row`].

use crate::error::{Error, Result};
use crate::row::Row;
use encoding_rs::mem::decode_latin1;
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Streams [`Row`]s out of a delimited source, one record at a time
pub struct RowReader<R: Read> {
    inner: csv::Reader<ByteLog<R>>,
    record: csv::ByteRecord,
    source: PathBuf,
    lines: LineCounter,
    blank_lines: VecDeque<u64>,
    pending: Option<Row>,
    finished: bool,
}

impl RowReader<BufReader<File>> {
    /// Open a file for reading
    pub fn open<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::InputOpen {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::from_reader(BufReader::new(file), delimiter, path))
    }
}

impl<R: Read> RowReader<R> {
    /// Wrap any reader; `source` only labels errors
    pub fn from_reader(reader: R, delimiter: u8, source: impl Into<PathBuf>) -> Self {
        let inner = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // Rows may differ in field count
            .delimiter(delimiter)
            .from_reader(ByteLog::new(reader));

        Self {
            inner,
            record: csv::ByteRecord::new(),
            source: source.into(),
            lines: LineCounter::default(),
            blank_lines: VecDeque::new(),
            pending: None,
            finished: false,
        }
    }

    /// Read the next row, or `None` at end of input
    ///
    /// An empty line comes back as a row with no fields.
    pub fn next_row(&mut self) -> Result<Option<Row>> {
        loop {
            if let Some(line) = self.blank_lines.pop_front() {
                return Ok(Some(Row::new(line, Vec::new())));
            }
            if let Some(row) = self.pending.take() {
                return Ok(Some(row));
            }
            if self.finished {
                return Ok(None);
            }
            self.fill()?;
        }
    }

    // Parse one record and queue it behind the blank lines that preceded it
    fn fill(&mut self) -> Result<()> {
        let more = self
            .inner
            .read_byte_record(&mut self.record)
            .map_err(|e| Error::Csv {
                path: self.source.clone(),
                source: e,
            })?;

        let end = self.inner.position().byte();
        let span = self.inner.get_ref().bytes_until(end);
        let skipped = span
            .iter()
            .take_while(|&&b| b == b'\n' || b == b'\r')
            .count();
        for &byte in &span[..skipped] {
            if let Some(line) = self.lines.step(byte) {
                self.blank_lines.push_back(line);
            }
        }
        let line = self.lines.line;
        for &byte in &span[skipped..] {
            self.lines.step(byte);
        }
        self.inner.get_mut().discard_until(end);

        if more {
            let fields = self
                .record
                .iter()
                .map(|field| decode_latin1(field).into_owned())
                .collect();
            self.pending = Some(Row::new(line, fields));
        } else {
            self.finished = true;
        }
        Ok(())
    }
}

impl<R: Read> Iterator for RowReader<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}

/// Physical line tracking; `\r\n`, `\r` and `\n` each end one line
#[derive(Debug)]
struct LineCounter {
    line: u64,
    after_cr: bool,
}

impl Default for LineCounter {
    fn default() -> Self {
        Self {
            line: 1,
            after_cr: false,
        }
    }
}

impl LineCounter {
    /// Feed one byte; returns the number of the line it ends, if any
    fn step(&mut self, byte: u8) -> Option<u64> {
        let ended = match byte {
            b'\n' if self.after_cr => None,
            b'\n' | b'\r' => Some(self.line),
            _ => None,
        };
        self.after_cr = byte == b'\r';
        if ended.is_some() {
            self.line += 1;
        }
        ended
    }
}

/// Keeps every byte handed to the parser until it is discarded
struct ByteLog<R> {
    inner: R,
    buf: Vec<u8>,
    start: u64,
}

impl<R> ByteLog<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            start: 0,
        }
    }

    /// Bytes from the last discard point up to the absolute offset `end`
    fn bytes_until(&self, end: u64) -> &[u8] {
        let len = (end.saturating_sub(self.start) as usize).min(self.buf.len());
        &self.buf[..len]
    }

    fn discard_until(&mut self, end: u64) {
        let len = (end.saturating_sub(self.start) as usize).min(self.buf.len());
        self.buf.drain(..len);
        self.start += len as u64;
    }
}

impl<R: Read> Read for ByteLog<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(out)?;
        self.buf.extend_from_slice(&out[..n]);
        Ok(n)
    }
}
