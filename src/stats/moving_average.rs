//! Moving-average transforms and their alignment against the source series.

use std::fmt;

use serde::Serialize;

/// Smoothing factor substituted for an EMA `alpha` outside `[0, 1]`.
pub const DEFAULT_EMA_ALPHA: f64 = 0.3;

const FOUR_POINT_WINDOW: usize = 4;

// ---------------------------------------------------------------------------
// Transforms
// ---------------------------------------------------------------------------

/// Simple moving average with a running window sum.
///
/// Returns `n − window + 1` values, or nothing unless `1 <= window <= n`.
pub fn simple(data: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || window > data.len() {
        return Vec::new();
    }
    let w = window as f64;
    let mut sum: f64 = data[..window].iter().sum();
    let mut out = Vec::with_capacity(data.len() - window + 1);
    out.push(sum / w);
    for i in window..data.len() {
        sum += data[i] - data[i - window];
        out.push(sum / w);
    }
    out
}

/// Simple moving average over four points.
pub fn four_point(data: &[f64]) -> Vec<f64> {
    simple(data, FOUR_POINT_WINDOW)
}

/// Exponential moving average, same length as the input.
///
/// `alpha` outside `[0, 1]` (or NaN) is replaced by [`DEFAULT_EMA_ALPHA`].
pub fn exponential(data: &[f64], alpha: f64) -> Vec<f64> {
    let alpha = if (0.0..=1.0).contains(&alpha) {
        alpha
    } else {
        DEFAULT_EMA_ALPHA
    };
    let mut out = Vec::with_capacity(data.len());
    let mut iter = data.iter();
    let Some(&first) = iter.next() else {
        return out;
    };
    let mut prev = first;
    out.push(prev);
    for &x in iter {
        prev = alpha * x + (1.0 - alpha) * prev;
        out.push(prev);
    }
    out
}

/// Linearly weighted moving average: the j-th oldest value in a window
/// (1-based) has weight j, normalized by `window·(window + 1)/2`.
pub fn weighted(data: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || window > data.len() {
        return Vec::new();
    }
    let norm = (window * (window + 1)) as f64 / 2.0;
    data.windows(window)
        .map(|w| {
            w.iter()
                .zip(1u32..)
                .map(|(&x, weight)| x * f64::from(weight))
                .sum::<f64>()
                / norm
        })
        .collect()
}

// ---------------------------------------------------------------------------
// MovingAverage – a transform choice plus its display alignment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MovingAverage {
    Simple { window: usize },
    FourPoint,
    Exponential { alpha: f64 },
    Weighted { window: usize },
}

impl MovingAverage {
    pub fn compute(&self, data: &[f64]) -> Vec<f64> {
        match *self {
            MovingAverage::Simple { window } => simple(data, window),
            MovingAverage::FourPoint => four_point(data),
            MovingAverage::Exponential { alpha } => exponential(data, alpha),
            MovingAverage::Weighted { window } => weighted(data, window),
        }
    }

    /// Number of source positions by which MA output `k` trails the source:
    /// source index `i` pairs with output `i − offset`.
    ///
    /// The four-point average is offset by 1, not by `4 / 2`.
    pub fn alignment_offset(&self) -> usize {
        match *self {
            MovingAverage::Exponential { .. } => 0,
            MovingAverage::FourPoint => 1,
            MovingAverage::Simple { window } | MovingAverage::Weighted { window } => window / 2,
        }
    }

    /// MA value shown next to source index `index`, if any.
    pub fn aligned_value(&self, averages: &[f64], index: usize) -> Option<f64> {
        index
            .checked_sub(self.alignment_offset())
            .and_then(|k| averages.get(k).copied())
    }

    /// Pair every source value with its aligned MA value.
    pub fn compare(&self, data: &[f64]) -> Comparison {
        let averages = self.compute(data);
        let rows: Vec<ComparisonRow> = data
            .iter()
            .enumerate()
            .map(|(index, &original)| {
                let moving_average = self.aligned_value(&averages, index);
                let difference = moving_average.map(|ma| original - ma);
                let percent_change = moving_average
                    .zip(difference)
                    .filter(|(ma, _)| *ma != 0.0)
                    .map(|(ma, diff)| diff / ma * 100.0);
                ComparisonRow {
                    index,
                    original,
                    moving_average,
                    difference,
                    percent_change,
                }
            })
            .collect();

        let diffs: Vec<f64> = rows.iter().filter_map(|r| r.difference).collect();
        let summary = if diffs.is_empty() {
            ComparisonSummary::default()
        } else {
            let n = diffs.len() as f64;
            ComparisonSummary {
                compared: diffs.len(),
                mean_difference: diffs.iter().sum::<f64>() / n,
                mean_absolute_error: diffs.iter().map(|d| d.abs()).sum::<f64>() / n,
            }
        };

        Comparison {
            kind: *self,
            averages,
            rows,
            summary,
        }
    }
}

impl fmt::Display for MovingAverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovingAverage::Simple { window } => write!(f, "SMA (window={window})"),
            MovingAverage::FourPoint => write!(f, "4-Point MA (window=4)"),
            MovingAverage::Exponential { alpha } => write!(f, "EMA (alpha={alpha})"),
            MovingAverage::Weighted { window } => write!(f, "WMA (window={window})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Comparison – source vs. aligned moving average
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// 0-based position in the source series.
    pub index: usize,
    pub original: f64,
    pub moving_average: Option<f64>,
    /// `original − moving_average`.
    pub difference: Option<f64>,
    /// Difference as a percentage of the MA value; absent when the MA is 0.
    pub percent_change: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub compared: usize,
    pub mean_difference: f64,
    pub mean_absolute_error: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub kind: MovingAverage,
    pub averages: Vec<f64>,
    pub rows: Vec<ComparisonRow>,
    pub summary: ComparisonSummary,
}
