use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// RawRecord – one tokenized line, kept verbatim
// ---------------------------------------------------------------------------

/// The fields of one ingested line, positional and untouched by numeric cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawRecord(Vec<String>);

impl RawRecord {
    pub fn new(fields: Vec<String>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Column – the parsed numeric values of one named column
// ---------------------------------------------------------------------------

/// A named numeric column.
///
/// Only cells that parsed are stored, so a column is sparse relative to the
/// records: `values.len()` never exceeds the dataset's total record count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

impl Column {
    fn new(name: String) -> Self {
        Self {
            name,
            values: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// RecordCounts – bookkeeping of one ingestion pass
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecordCounts {
    /// Non-blank lines seen after the header.
    pub total: usize,
    /// Lines that contributed at least one numeric value.
    pub valid: usize,
    /// Lines that contributed none.
    pub skipped: usize,
}

// ---------------------------------------------------------------------------
// Dataset – everything produced by one ingestion
// ---------------------------------------------------------------------------

/// Columnar container filled by the loader.
///
/// Raw records and per-column values are two independent collections: every
/// non-blank line becomes a [`RawRecord`], while a column only grows when one
/// of its cells parses.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    source: Option<String>,
    /// Columns in first-seen order.
    columns: Vec<Column>,
    /// Column name → position in `columns`.
    #[serde(skip)]
    index: BTreeMap<String, usize>,
    raw_records: Vec<RawRecord>,
    counts: RecordCounts,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::default()
        }
    }

    /// Add a column unless one with this name already exists.
    /// Returns `true` if the column was added.
    pub fn add_column(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.index.contains_key(&name) {
            return false;
        }
        self.index.insert(name.clone(), self.columns.len());
        self.columns.push(Column::new(name));
        true
    }

    /// Append a value to the named column. Unknown names are ignored.
    pub fn push_value(&mut self, column: &str, value: f64) {
        if let Some(&pos) = self.index.get(column) {
            self.columns[pos].values.push(value);
        }
    }

    pub fn push_raw_record(&mut self, record: RawRecord) {
        self.raw_records.push(record);
    }

    pub(crate) fn set_counts(&mut self, counts: RecordCounts) {
        self.counts = counts;
    }

    /// Return to the freshly created state, source included.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&pos| &self.columns[pos])
    }

    /// Parsed values of a column; empty for an unknown name.
    pub fn column_values(&self, name: &str) -> &[f64] {
        self.column(name)
            .map(|c| c.values.as_slice())
            .unwrap_or(&[])
    }

    /// The `index`-th parsed value of a column, if there is one.
    pub fn value_at(&self, name: &str, index: usize) -> Option<f64> {
        self.column(name)?.values.get(index).copied()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of parsed values in a column (0 if unknown).
    pub fn record_count(&self, name: &str) -> usize {
        self.column_values(name).len()
    }

    pub fn raw_records(&self) -> &[RawRecord] {
        &self.raw_records
    }

    pub fn counts(&self) -> RecordCounts {
        self.counts
    }

    pub fn has_data(&self) -> bool {
        !self.columns.is_empty() && !self.index.is_empty()
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dataset[file={}, columns={}, records={}]",
            self.source.as_deref().unwrap_or("<none>"),
            self.columns.len(),
            self.counts.total
        )
    }
}
