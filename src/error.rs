use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why an ingestion produced no data.
///
/// The display strings double as the loader's last-error message.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Error reading file: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("File is empty")]
    Empty,
}

/// Failure while writing a report or export.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no statistics loaded; select a column with numeric data first")]
    NoData,

    #[error("writing report")]
    Io(#[from] io::Error),

    #[error("encoding JSON report")]
    Json(#[from] serde_json::Error),

    #[error("writing moving-average CSV")]
    Csv(#[from] csv::Error),
}
