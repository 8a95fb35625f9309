//! Descriptive statistics over one numeric column.
//!
//! [`Statistics::load`] copies the values and a sorted copy of them; every
//! statistic is then recomputed on demand from those two vectors. Degenerate
//! input never errors: an empty snapshot reports 0 for everything, and
//! statistics with a minimum sample size report 0 below it.

use super::moving_average;
use super::summary::{FullAnalysis, Histogram, KurtosisShape, SkewnessShape};

/// Threshold used by [`Statistics::full_analysis`] for z-score outliers.
pub const DEFAULT_Z_THRESHOLD: f64 = 2.0;

/// Immutable snapshot of a loaded numeric sequence.
///
/// # Example
///
/// ```
/// use column_analyzer::stats::Statistics;
///
/// let stats = Statistics::load(&[1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(stats.median(), 2.5);
/// assert_eq!(stats.percentile(100.0), 4.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    data: Vec<f64>,
    sorted: Vec<f64>,
}

impl Statistics {
    pub fn load(values: &[f64]) -> Self {
        Self::from(values.to_vec())
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn sorted(&self) -> &[f64] {
        &self.sorted
    }

    pub fn count(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn n(&self) -> f64 {
        self.data.len() as f64
    }

    // -- Basic --

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    pub fn mean(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.sum() / self.n()
    }

    pub fn min(&self) -> f64 {
        self.sorted.first().copied().unwrap_or(0.0)
    }

    pub fn max(&self) -> f64 {
        self.sorted.last().copied().unwrap_or(0.0)
    }

    pub fn range(&self) -> f64 {
        self.max() - self.min()
    }

    // -- Central tendency --

    pub fn median(&self) -> f64 {
        let n = self.sorted.len();
        if n == 0 {
            return 0.0;
        }
        let mid = n / 2;
        if n % 2 == 0 {
            (self.sorted[mid - 1] + self.sorted[mid]) / 2.0
        } else {
            self.sorted[mid]
        }
    }

    /// Most frequent value and its count.
    ///
    /// Ties go to the smallest value: runs of the sorted copy are scanned in
    /// ascending order and only a strictly larger count replaces the leader.
    pub fn mode_with_frequency(&self) -> (f64, usize) {
        let mut best = (0.0, 0);
        let mut i = 0;
        while i < self.sorted.len() {
            let value = self.sorted[i];
            let run = self.sorted[i..]
                .iter()
                .take_while(|&&v| v == value)
                .count()
                .max(1);
            if run > best.1 {
                best = (value, run);
            }
            i += run;
        }
        best
    }

    pub fn mode(&self) -> f64 {
        self.mode_with_frequency().0
    }

    pub fn mode_frequency(&self) -> usize {
        self.mode_with_frequency().1
    }

    /// Geometric mean of the strictly positive values; 0 if there are none.
    pub fn geometric_mean(&self) -> f64 {
        let (log_sum, count) = self
            .data
            .iter()
            .filter(|&&v| v > 0.0)
            .fold((0.0, 0usize), |(s, c), &v| (s + v.ln(), c + 1));
        if count == 0 {
            return 0.0;
        }
        (log_sum / count as f64).exp()
    }

    /// Harmonic mean of the nonzero values; 0 if there are none or their
    /// reciprocals cancel out.
    pub fn harmonic_mean(&self) -> f64 {
        let (reciprocal_sum, count) = self
            .data
            .iter()
            .filter(|&&v| v != 0.0)
            .fold((0.0, 0usize), |(s, c), &v| (s + 1.0 / v, c + 1));
        if count == 0 || reciprocal_sum == 0.0 {
            return 0.0;
        }
        count as f64 / reciprocal_sum
    }

    // -- Dispersion --

    fn squared_deviations(&self) -> f64 {
        let mean = self.mean();
        self.data.iter().map(|v| (v - mean).powi(2)).sum()
    }

    /// Sample variance (n − 1 denominator); 0 below two values.
    pub fn variance(&self) -> f64 {
        if self.count() < 2 {
            return 0.0;
        }
        self.squared_deviations() / (self.n() - 1.0)
    }

    pub fn population_variance(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.squared_deviations() / self.n()
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn population_std_dev(&self) -> f64 {
        self.population_variance().sqrt()
    }

    pub fn standard_error(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.std_dev() / self.n().sqrt()
    }

    /// Sample std-dev as a percentage of |mean|; 0 when the mean is 0.
    pub fn coefficient_of_variation(&self) -> f64 {
        let mean = self.mean();
        if mean == 0.0 {
            return 0.0;
        }
        self.std_dev() / mean.abs() * 100.0
    }

    pub fn sum_of_absolute_deviations(&self) -> f64 {
        let mean = self.mean();
        self.data.iter().map(|v| (v - mean).abs()).sum()
    }

    pub fn mean_absolute_deviation(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.sum_of_absolute_deviations() / self.n()
    }

    // -- Order statistics --

    /// Linearly interpolated percentile, `p` in `[0, 100]`.
    ///
    /// Out-of-range (or NaN) `p` returns 0.
    pub fn percentile(&self, p: f64) -> f64 {
        if self.is_empty() || !(0.0..=100.0).contains(&p) {
            return 0.0;
        }
        let position = p / 100.0 * (self.n() - 1.0);
        let lower = position.floor() as usize;
        let upper = position.ceil() as usize;
        if lower == upper {
            return self.sorted[lower];
        }
        let fraction = position - lower as f64;
        self.sorted[lower] + fraction * (self.sorted[upper] - self.sorted[lower])
    }

    pub fn quartile1(&self) -> f64 {
        self.percentile(25.0)
    }

    pub fn quartile2(&self) -> f64 {
        self.median()
    }

    pub fn quartile3(&self) -> f64 {
        self.percentile(75.0)
    }

    pub fn interquartile_range(&self) -> f64 {
        self.quartile3() - self.quartile1()
    }

    // -- Shape --

    /// Sum of `z^k` over the data, or `None` when the std-dev is 0.
    fn standardized_power_sum(&self, k: i32) -> Option<f64> {
        let sd = self.std_dev();
        if sd == 0.0 {
            return None;
        }
        let mean = self.mean();
        Some(self.data.iter().map(|v| ((v - mean) / sd).powi(k)).sum())
    }

    /// Adjusted Fisher–Pearson skewness; 0 below three values.
    pub fn skewness(&self) -> f64 {
        if self.count() < 3 {
            return 0.0;
        }
        let Some(cubes) = self.standardized_power_sum(3) else {
            return 0.0;
        };
        let n = self.n();
        n / ((n - 1.0) * (n - 2.0)) * cubes
    }

    /// Bias-corrected excess kurtosis; 0 below four values.
    pub fn kurtosis(&self) -> f64 {
        if self.count() < 4 {
            return 0.0;
        }
        let Some(fourths) = self.standardized_power_sum(4) else {
            return 0.0;
        };
        let n = self.n();
        let scale = n * (n + 1.0) / ((n - 1.0) * (n - 2.0) * (n - 3.0));
        let correction = 3.0 * (n - 1.0).powi(2) / ((n - 2.0) * (n - 3.0));
        scale * fourths - correction
    }

    pub fn skewness_shape(&self) -> SkewnessShape {
        SkewnessShape::classify(self.skewness())
    }

    pub fn kurtosis_shape(&self) -> KurtosisShape {
        KurtosisShape::classify(self.kurtosis())
    }

    // -- Outliers --

    /// `(x − mean) / s` per value; all zeros when `s` is 0.
    pub fn z_scores(&self) -> Vec<f64> {
        let sd = self.std_dev();
        if sd == 0.0 {
            return vec![0.0; self.count()];
        }
        let mean = self.mean();
        self.data.iter().map(|v| (v - mean) / sd).collect()
    }

    pub fn count_outliers(&self, z_threshold: f64) -> usize {
        self.z_scores()
            .into_iter()
            .filter(|z| z.abs() > z_threshold)
            .count()
    }

    /// Values outside `[Q1 − 1.5·IQR, Q3 + 1.5·IQR]`.
    pub fn count_outliers_iqr(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let q1 = self.quartile1();
        let q3 = self.quartile3();
        let iqr = q3 - q1;
        let (low, high) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);
        self.data.iter().filter(|&&v| v < low || v > high).count()
    }

    // -- Additional --

    pub fn sum_of_squares(&self) -> f64 {
        self.data.iter().map(|v| v * v).sum()
    }

    pub fn root_mean_square(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        (self.sum_of_squares() / self.n()).sqrt()
    }

    pub fn histogram(&self) -> Histogram {
        Histogram::from_values(&self.data)
    }

    // -- Moving averages --

    pub fn moving_average(&self, window: usize) -> Vec<f64> {
        moving_average::simple(&self.data, window)
    }

    pub fn four_point_moving_average(&self) -> Vec<f64> {
        moving_average::four_point(&self.data)
    }

    pub fn exponential_moving_average(&self, alpha: f64) -> Vec<f64> {
        moving_average::exponential(&self.data, alpha)
    }

    pub fn weighted_moving_average(&self, window: usize) -> Vec<f64> {
        moving_average::weighted(&self.data, window)
    }

    // -- Snapshot --

    /// Every statistic in its fixed report order, outliers counted at `|z| > 2`.
    pub fn full_analysis(&self) -> FullAnalysis {
        self.full_analysis_with(DEFAULT_Z_THRESHOLD)
    }

    pub fn full_analysis_with(&self, z_threshold: f64) -> FullAnalysis {
        let (mode, mode_frequency) = self.mode_with_frequency();
        let z_label = format!("Outliers (Z > {z_threshold})");

        let mut analysis = FullAnalysis::default();
        analysis.push("Count", self.count() as f64);
        analysis.push("Sum", self.sum());
        analysis.push("Minimum", self.min());
        analysis.push("Maximum", self.max());
        analysis.push("Range", self.range());
        analysis.push("Mean", self.mean());
        analysis.push("Median", self.median());
        analysis.push("Mode", mode);
        analysis.push("Mode Frequency", mode_frequency as f64);
        analysis.push("Geometric Mean", self.geometric_mean());
        analysis.push("Harmonic Mean", self.harmonic_mean());
        analysis.push("Variance (Sample)", self.variance());
        analysis.push("Variance (Population)", self.population_variance());
        analysis.push("Std Dev (Sample)", self.std_dev());
        analysis.push("Std Dev (Population)", self.population_std_dev());
        analysis.push("Standard Error", self.standard_error());
        analysis.push("Coeff of Variation %", self.coefficient_of_variation());
        analysis.push("Mean Abs Deviation", self.mean_absolute_deviation());
        analysis.push("Quartile 1 (25%)", self.quartile1());
        analysis.push("Quartile 2 (50%)", self.quartile2());
        analysis.push("Quartile 3 (75%)", self.quartile3());
        analysis.push("Interquartile Range", self.interquartile_range());
        analysis.push("10th Percentile", self.percentile(10.0));
        analysis.push("90th Percentile", self.percentile(90.0));
        analysis.push("Skewness", self.skewness());
        analysis.push("Kurtosis", self.kurtosis());
        analysis.push("Root Mean Square", self.root_mean_square());
        analysis.push("Sum of Squares", self.sum_of_squares());
        analysis.push("Sum of Abs Deviations", self.sum_of_absolute_deviations());
        analysis.push("Outliers (IQR method)", self.count_outliers_iqr() as f64);
        analysis.push(z_label, self.count_outliers(z_threshold) as f64);
        analysis
    }
}

impl From<Vec<f64>> for Statistics {
    fn from(data: Vec<f64>) -> Self {
        let mut sorted = data.clone();
        sorted.sort_by(f64::total_cmp);
        Self { data, sorted }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn empty_snapshot_is_all_zero() {
        let s = Statistics::default();
        assert_eq!(s.count(), 0);
        for v in [
            s.sum(),
            s.mean(),
            s.min(),
            s.max(),
            s.range(),
            s.median(),
            s.mode(),
            s.geometric_mean(),
            s.harmonic_mean(),
            s.variance(),
            s.population_variance(),
            s.standard_error(),
            s.coefficient_of_variation(),
            s.mean_absolute_deviation(),
            s.percentile(50.0),
            s.skewness(),
            s.kurtosis(),
            s.root_mean_square(),
            s.sum_of_squares(),
        ] {
            assert_eq!(v, 0.0);
        }
        assert_eq!(s.mode_frequency(), 0);
        assert_eq!(s.count_outliers_iqr(), 0);
        assert!(s.z_scores().is_empty());
    }

    #[test]
    fn basic_moments() {
        let s = Statistics::load(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(s.count(), 8);
        assert!(close(s.sum(), 40.0));
        assert!(close(s.mean(), 5.0));
        assert!(close(s.min(), 2.0));
        assert!(close(s.max(), 9.0));
        assert!(close(s.range(), 7.0));
        assert!(close(s.population_variance(), 4.0));
        assert!(close(s.population_std_dev(), 2.0));
        assert!(close(s.variance(), 32.0 / 7.0));
        assert!(close(s.standard_error(), (32.0f64 / 7.0).sqrt() / 8f64.sqrt()));
        assert!(close(s.mean_absolute_deviation(), 1.5));
        assert!(close(s.sum_of_absolute_deviations(), 12.0));
    }

    #[test]
    fn median_odd_and_even() {
        assert!(close(Statistics::load(&[3.0, 1.0, 2.0]).median(), 2.0));
        assert!(close(Statistics::load(&[4.0, 1.0, 3.0, 2.0]).median(), 2.5));
    }

    #[test]
    fn mode_prefers_smallest_on_tie() {
        let s = Statistics::load(&[5.0, 3.0, 5.0, 3.0, 1.0]);
        assert_eq!(s.mode_with_frequency(), (3.0, 2));

        let s = Statistics::load(&[7.0, 2.0, 7.0, 7.0, 2.0]);
        assert_eq!(s.mode_with_frequency(), (7.0, 3));
    }

    #[test]
    fn geometric_and_harmonic_means() {
        let s = Statistics::load(&[1.0, 2.0, 4.0]);
        assert!(close(s.geometric_mean(), 2.0));
        assert!(close(s.harmonic_mean(), 3.0 / 1.75));

        // Non-positive values are left out of the geometric mean.
        let s = Statistics::load(&[-3.0, 0.0, 4.0, 9.0]);
        assert!(close(s.geometric_mean(), 6.0));

        let s = Statistics::load(&[-2.0, 2.0]);
        assert_eq!(s.harmonic_mean(), 0.0);
        assert_eq!(Statistics::load(&[0.0, 0.0]).harmonic_mean(), 0.0);
    }

    #[test]
    fn percentile_interpolation() {
        let s = Statistics::load(&[4.0, 3.0, 2.0, 1.0]);
        assert!(close(s.percentile(50.0), 2.5));
        assert!(close(s.percentile(0.0), 1.0));
        assert!(close(s.percentile(100.0), 4.0));
        assert!(close(s.percentile(25.0), 1.75));
        assert_eq!(s.percentile(-1.0), 0.0);
        assert_eq!(s.percentile(100.5), 0.0);
        assert_eq!(s.percentile(f64::NAN), 0.0);
    }

    #[test]
    fn second_quartile_is_median() {
        for data in [
            vec![1.0],
            vec![1.0, 10.0],
            vec![5.0, 1.0, 9.0, 2.0, 2.0],
            vec![0.5, -3.0, 8.25, 4.0, 4.0, 1.0],
        ] {
            let s = Statistics::load(&data);
            assert!(close(s.quartile2(), s.median()));
            assert!(close(s.percentile(50.0), s.median()));
        }
    }

    #[test]
    fn degenerate_sizes() {
        assert_eq!(Statistics::load(&[42.0]).variance(), 0.0);
        assert_eq!(Statistics::load(&[1.0, 9.0]).skewness(), 0.0);
        assert_eq!(Statistics::load(&[1.0, 2.0, 9.0]).kurtosis(), 0.0);
        assert_eq!(Statistics::load(&[3.0, 3.0, 3.0, 3.0]).skewness(), 0.0);
        assert_eq!(Statistics::load(&[3.0, 3.0, 3.0, 3.0]).kurtosis(), 0.0);
    }

    #[test]
    fn coefficient_of_variation_zero_mean() {
        assert_eq!(Statistics::load(&[-1.0, 1.0]).coefficient_of_variation(), 0.0);
        let s = Statistics::load(&[-2.0, -4.0]);
        assert!(close(s.coefficient_of_variation(), 2f64.sqrt() / 3.0 * 100.0));
    }

    #[test]
    fn symmetric_data_has_zero_skew() {
        let s = Statistics::load(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(close(s.skewness(), 0.0));
        // Uniform-like data is flat.
        assert!(close(s.kurtosis(), -1.2));
        assert_eq!(s.skewness_shape(), SkewnessShape::Symmetric);
        assert_eq!(s.kurtosis_shape(), KurtosisShape::VeryFlat);
    }

    #[test]
    fn right_tail_is_positive_skew() {
        let s = Statistics::load(&[1.0, 1.0, 1.0, 2.0, 10.0]);
        assert!((s.skewness() - 2.171_292_493_874_224).abs() < 1e-9);
        assert!((s.kurtosis() - 4.747_138_397_502_599).abs() < 1e-9);
        assert_eq!(s.skewness_shape(), SkewnessShape::HighlyRight);
    }

    #[test]
    fn z_scores_and_outliers() {
        let s = Statistics::load(&[5.0, 5.0, 5.0]);
        assert_eq!(s.z_scores(), vec![0.0, 0.0, 0.0]);
        assert_eq!(s.count_outliers(0.5), 0);

        let mut data = vec![10.0; 9];
        data.push(100.0);
        let s = Statistics::load(&data);
        let z = s.z_scores();
        assert!(close(z.iter().sum::<f64>(), 0.0));
        assert_eq!(s.count_outliers(2.0), 1);
        assert_eq!(s.count_outliers_iqr(), 1);
    }

    #[test]
    fn rms_and_sum_of_squares() {
        let s = Statistics::load(&[3.0, -4.0]);
        assert!(close(s.sum_of_squares(), 25.0));
        assert!(close(s.root_mean_square(), 12.5f64.sqrt()));
    }

    #[test]
    fn full_analysis_order_and_values() {
        let s = Statistics::load(&[1.0, 2.0, 3.0, 4.0]);
        let analysis = s.full_analysis();
        let keys: Vec<&str> = analysis.iter().map(|(k, _)| k).collect();
        assert_eq!(keys.len(), 31);
        assert_eq!(keys[0], "Count");
        assert_eq!(keys[5], "Mean");
        assert_eq!(keys[30], "Outliers (Z > 2)");
        assert_eq!(analysis.get("Count"), Some(4.0));
        assert_eq!(analysis.get("Quartile 2 (50%)"), Some(2.5));
        assert_eq!(analysis.get("Nope"), None);
    }

    #[test]
    fn load_copies_input() {
        let mut input = vec![3.0, 1.0, 2.0];
        let s = Statistics::load(&input);
        input[0] = 100.0;
        assert_eq!(s.data(), &[3.0, 1.0, 2.0]);
        assert_eq!(s.sorted(), &[1.0, 2.0, 3.0]);
    }
}
