use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

// ---------------------------------------------------------------------------
// FullAnalysis – ordered stat name → value
// ---------------------------------------------------------------------------

/// Every statistic of a snapshot, in a fixed insertion order.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FullAnalysis {
    entries: Vec<(String, f64)>,
}

impl FullAnalysis {
    pub(crate) fn push(&mut self, name: impl Into<String>, value: f64) {
        self.entries.push((name.into(), value));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FullAnalysis {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Shape buckets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(into = "String")]
pub enum SkewnessShape {
    HighlyLeft,
    ModeratelyLeft,
    Symmetric,
    ModeratelyRight,
    HighlyRight,
}

impl SkewnessShape {
    pub fn classify(skewness: f64) -> Self {
        if skewness < -1.0 {
            SkewnessShape::HighlyLeft
        } else if skewness < -0.5 {
            SkewnessShape::ModeratelyLeft
        } else if skewness < 0.5 {
            SkewnessShape::Symmetric
        } else if skewness < 1.0 {
            SkewnessShape::ModeratelyRight
        } else {
            SkewnessShape::HighlyRight
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SkewnessShape::HighlyLeft => "highly left-skewed",
            SkewnessShape::ModeratelyLeft => "moderately left-skewed",
            SkewnessShape::Symmetric => "approximately symmetric",
            SkewnessShape::ModeratelyRight => "moderately right-skewed",
            SkewnessShape::HighlyRight => "highly right-skewed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(into = "String")]
pub enum KurtosisShape {
    VeryFlat,
    Flat,
    Normal,
    Peaked,
    VeryPeaked,
}

impl KurtosisShape {
    pub fn classify(kurtosis: f64) -> Self {
        if kurtosis < -1.0 {
            KurtosisShape::VeryFlat
        } else if kurtosis < 0.0 {
            KurtosisShape::Flat
        } else if kurtosis < 1.0 {
            KurtosisShape::Normal
        } else if kurtosis < 3.0 {
            KurtosisShape::Peaked
        } else {
            KurtosisShape::VeryPeaked
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            KurtosisShape::VeryFlat => "very flat / platykurtic",
            KurtosisShape::Flat => "flat / platykurtic",
            KurtosisShape::Normal => "normal / mesokurtic",
            KurtosisShape::Peaked => "peaked / leptokurtic",
            KurtosisShape::VeryPeaked => "very peaked / leptokurtic",
        }
    }
}

impl fmt::Display for SkewnessShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl fmt::Display for KurtosisShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl From<SkewnessShape> for String {
    fn from(value: SkewnessShape) -> Self {
        value.description().to_string()
    }
}

impl From<KurtosisShape> for String {
    fn from(value: KurtosisShape) -> Self {
        value.description().to_string()
    }
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

const MIN_BINS: usize = 5;
const MAX_BINS: usize = 20;

/// Equal-width frequency bins over the value range.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Histogram {
    /// Lower edge of the first bin.
    pub start: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `⌊√n⌋` bins, clamped to 5..=20.
    ///
    /// A constant series is spread over `[v − 1, v + 1]`.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let bins = ((values.len() as f64).sqrt() as usize).clamp(MIN_BINS, MAX_BINS);

        let mut low = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut high = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if low == high {
            low -= 1.0;
            high += 1.0;
        }
        let bin_width = (high - low) / bins as f64;

        let mut counts = vec![0; bins];
        for &v in values {
            let slot = ((v - low) / bin_width).floor().max(0.0) as usize;
            counts[slot.min(bins - 1)] += 1;
        }

        Self {
            start: low,
            bin_width,
            counts,
        }
    }

    /// `(lower, upper)` edges of bin `i`.
    pub fn edges(&self, i: usize) -> (f64, f64) {
        let lower = self.start + i as f64 * self.bin_width;
        (lower, lower + self.bin_width)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skewness_buckets() {
        assert_eq!(SkewnessShape::classify(-1.5), SkewnessShape::HighlyLeft);
        assert_eq!(SkewnessShape::classify(-1.0), SkewnessShape::ModeratelyLeft);
        assert_eq!(SkewnessShape::classify(-0.5), SkewnessShape::Symmetric);
        assert_eq!(SkewnessShape::classify(0.49), SkewnessShape::Symmetric);
        assert_eq!(SkewnessShape::classify(0.5), SkewnessShape::ModeratelyRight);
        assert_eq!(SkewnessShape::classify(1.0), SkewnessShape::HighlyRight);
        assert_eq!(
            SkewnessShape::Symmetric.to_string(),
            "approximately symmetric"
        );
    }

    #[test]
    fn kurtosis_buckets() {
        assert_eq!(KurtosisShape::classify(-2.0), KurtosisShape::VeryFlat);
        assert_eq!(KurtosisShape::classify(-0.2), KurtosisShape::Flat);
        assert_eq!(KurtosisShape::classify(0.0), KurtosisShape::Normal);
        assert_eq!(KurtosisShape::classify(2.9), KurtosisShape::Peaked);
        assert_eq!(KurtosisShape::classify(3.0), KurtosisShape::VeryPeaked);
        assert_eq!(
            KurtosisShape::VeryPeaked.to_string(),
            "very peaked / leptokurtic"
        );
    }

    #[test]
    fn full_analysis_serializes_in_order() {
        let mut analysis = FullAnalysis::default();
        analysis.push("Zeta", 1.0);
        analysis.push("Alpha", 2.5);
        let json = serde_json::to_string(&analysis).unwrap();
        assert_eq!(json, r#"{"Zeta":1.0,"Alpha":2.5}"#);
    }

    #[test]
    fn histogram_bins_and_clamps() {
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        let h = Histogram::from_values(&values);
        assert_eq!(h.counts.len(), 10);
        assert_eq!(h.total(), 100);
        assert!(h.counts.iter().all(|&c| c == 10));
        assert_eq!(h.edges(0), (0.0, 9.9));

        let h = Histogram::from_values(&[1.0, 2.0]);
        assert_eq!(h.counts.len(), 5);
        assert_eq!(h.counts[0], 1);
        assert_eq!(h.counts[4], 1);
    }

    #[test]
    fn constant_series_is_widened() {
        let h = Histogram::from_values(&[3.0; 9]);
        assert_eq!(h.start, 2.0);
        assert_eq!(h.counts.len(), 5);
        assert_eq!(h.counts[2], 9);
    }

    #[test]
    fn empty_histogram() {
        let h = Histogram::from_values(&[]);
        assert!(h.counts.is_empty());
        assert_eq!(h.total(), 0);
    }
}
