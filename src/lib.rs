//! Ingest delimited text files of mixed text and numbers, then describe a
//! numeric column: descriptive and order statistics, distribution shape and
//! moving averages.
//!
//! ```text
//!  file lines ──▶ data::Ingester ──▶ Dataset ──▶ column values
//!                                                   │
//!                                                   ▼
//!                         report ◀── FullAnalysis ◀── stats::Statistics
//! ```
//!
//! Everything here is synchronous and owns its data; hosts decide which
//! thread runs an ingestion or an analysis.

pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod session;
pub mod stats;

pub use config::AnalyzerConfig;
pub use data::{Dataset, Delimiter, IngestOptions, Ingester};
pub use error::{IngestError, ReportError};
pub use session::Session;
pub use stats::{FullAnalysis, MovingAverage, Statistics};
