//! Row type passed between reader, normalizer and writer

/// One delimited record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based line in the input where the record starts
    pub line: u64,
    /// Field values in column order
    pub fields: Vec<String>,
}

impl Row {
    /// Create a new row
    pub fn new(line: u64, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// Whether the row has no fields, as read from an empty line
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
