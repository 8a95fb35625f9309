use std::path::Path;

use log::{debug, info, warn};

use super::delimiter::Delimiter;
use super::model::{Dataset, RawRecord, RecordCounts};
use super::numeric::clean_and_parse;
use crate::error::IngestError;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    /// Treat the first line as column names.
    pub has_header: bool,
    /// Fixed delimiter; `None` detects it from the first line.
    pub delimiter: Option<Delimiter>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read a delimited text file and ingest it.
///
/// The dataset's source is the file name (without directories).
pub fn try_load_file(path: &Path, options: &IngestOptions) -> Result<Dataset, IngestError> {
    let (dataset, _) = load_file_inner(path, options)?;
    Ok(dataset)
}

/// Ingest lines already held in memory.
pub fn ingest_lines<S: AsRef<str>>(
    lines: &[S],
    options: &IngestOptions,
    source: Option<&str>,
) -> Result<Dataset, IngestError> {
    let (dataset, _) = ingest_inner(lines, options, source)?;
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Ingester – loader with a last-error channel
// ---------------------------------------------------------------------------

/// Loader that never fails outright.
///
/// A failed load yields an empty [`Dataset`] and leaves a human-readable
/// reason in [`Ingester::last_error`]. Callers check [`Ingester::has_error`]
/// or [`Dataset::has_data`] before using the result.
#[derive(Debug, Default)]
pub struct Ingester {
    options: IngestOptions,
    last_error: Option<String>,
    last_delimiter: Option<Delimiter>,
}

impl Ingester {
    pub fn new(options: IngestOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &IngestOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: IngestOptions) {
        self.options = options;
    }

    pub fn load_file(&mut self, path: &Path) -> Dataset {
        let result = load_file_inner(path, &self.options);
        self.settle(result, file_name(path))
    }

    pub fn ingest<S: AsRef<str>>(&mut self, lines: &[S], source: Option<&str>) -> Dataset {
        let result = ingest_inner(lines, &self.options, source);
        self.settle(result, source.map(str::to_string))
    }

    fn settle(
        &mut self,
        result: Result<(Dataset, Delimiter), IngestError>,
        source: Option<String>,
    ) -> Dataset {
        match result {
            Ok((dataset, delimiter)) => {
                self.last_error = None;
                self.last_delimiter = Some(delimiter);
                dataset
            }
            Err(err) => {
                warn!("ingestion of {} failed: {err}", source.as_deref().unwrap_or("<input>"));
                self.last_error = Some(err.to_string());
                self.last_delimiter = None;
                source.map(Dataset::with_source).unwrap_or_default()
            }
        }
    }

    /// Delimiter used by the last successful ingestion.
    pub fn delimiter(&self) -> Option<Delimiter> {
        self.last_delimiter
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn has_error(&self) -> bool {
        self.last_error.is_some()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }
}

// ---------------------------------------------------------------------------
// Ingestion pass
// ---------------------------------------------------------------------------

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

fn load_file_inner(
    path: &Path,
    options: &IngestOptions,
) -> Result<(Dataset, Delimiter), IngestError> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    let lines = split_lines(text);
    ingest_inner(&lines, options, file_name(path).as_deref())
}

/// Break text into lines on `\r\n`, `\n` or a lone `\r`.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find(['\r', '\n']) {
        lines.push(&rest[..pos]);
        let width = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[pos + width..];
    }
    if !rest.is_empty() {
        lines.push(rest);
    }
    lines
}

fn ingest_inner<S: AsRef<str>>(
    lines: &[S],
    options: &IngestOptions,
    source: Option<&str>,
) -> Result<(Dataset, Delimiter), IngestError> {
    let first = lines.first().ok_or(IngestError::Empty)?.as_ref();

    let delimiter = options.delimiter.unwrap_or_else(|| Delimiter::detect(first));
    debug!("using delimiter {delimiter}");

    let mut dataset = match source {
        Some(name) => Dataset::with_source(name),
        None => Dataset::new(),
    };

    // Token position → column position. A repeated header name keeps only
    // its first position; later positions with that name are not read.
    let names: Vec<String> = if options.has_header {
        delimiter
            .split_line(first)
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                let name = raw.trim();
                if name.is_empty() {
                    synthetic_name(i)
                } else {
                    name.to_string()
                }
            })
            .collect()
    } else {
        (0..delimiter.split_line(first).len())
            .map(synthetic_name)
            .collect()
    };
    debug!("columns: {names:?}");

    let slots: Vec<Option<String>> = names
        .into_iter()
        .map(|name| dataset.add_column(name.clone()).then_some(name))
        .collect();

    let body = if options.has_header { &lines[1..] } else { lines };
    let mut counts = RecordCounts::default();

    for line in body {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        counts.total += 1;

        let fields = delimiter.split_line(line);
        let mut contributed = false;

        for (slot, field) in slots.iter().zip(&fields) {
            let Some(column) = slot else { continue };
            if let Some(value) = clean_and_parse(field.trim()) {
                dataset.push_value(column, value);
                contributed = true;
            }
        }

        dataset.push_raw_record(RawRecord::new(fields));

        if contributed {
            counts.valid += 1;
        } else {
            counts.skipped += 1;
        }
    }

    dataset.set_counts(counts);
    info!(
        "ingested {}: {} columns, {} records ({} valid, {} skipped)",
        dataset.source().unwrap_or("<input>"),
        dataset.column_count(),
        counts.total,
        counts.valid,
        counts.skipped
    );

    Ok((dataset, delimiter))
}

fn synthetic_name(index: usize) -> String {
    format!("Column_{}", index + 1)
}
