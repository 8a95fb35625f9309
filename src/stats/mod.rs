//! Statistics engine: one immutable snapshot per analyzed column.
//!
//! ```text
//!   &[f64] column values
//!        │
//!        ▼
//!   ┌────────────┐
//!   │ Statistics  │  copy + sorted copy; stats derived on demand
//!   └────────────┘
//!        │                 │
//!        ▼                 ▼
//!   FullAnalysis      moving_average::{simple, four_point, exponential, weighted}
//! ```

pub mod engine;
pub mod moving_average;
pub mod summary;

pub use engine::{DEFAULT_Z_THRESHOLD, Statistics};
pub use moving_average::{Comparison, ComparisonRow, ComparisonSummary, MovingAverage};
pub use summary::{FullAnalysis, Histogram, KurtosisShape, SkewnessShape};
