/// Data layer: tokenizing, numeric cleaning, the dataset container and column selection.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .txt lines
///        │
///        ▼
///   ┌────────────┐
///   │ delimiter   │  detect separator, split quote-aware fields
///   └────────────┘
///        │
///        ▼
///   ┌────────────┐
///   │  loader     │  header, record loop, numeric::clean_and_parse
///   └────────────┘
///        │
///        ▼
///   ┌────────────┐
///   │  Dataset    │  sparse numeric columns + raw records + counts
///   └────────────┘
///        │
///        ▼
///   ┌────────────┐
///   │  filter     │  choose the column handed to the statistics engine
///   └────────────┘
/// ```

pub mod delimiter;
pub mod filter;
pub mod loader;
pub mod model;
pub mod numeric;

pub use delimiter::Delimiter;
pub use loader::{IngestOptions, Ingester, ingest_lines, try_load_file};
pub use model::{Column, Dataset, RawRecord, RecordCounts};
