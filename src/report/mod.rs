//! Rendering of an analyzed column: plain-text report, JSON export and the
//! moving-average comparison table as CSV.

pub mod format;

use std::io::Write;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::data::RecordCounts;
use crate::error::ReportError;
use crate::stats::{Comparison, FullAnalysis, Histogram, KurtosisShape, SkewnessShape, Statistics};
use format::{format_fixed, format_value};

const RULE: &str = "========================================";
const THIN_RULE: &str = "----------------------------------------";

/// Everything a report says about one analyzed column.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    pub source: &'a str,
    pub column: &'a str,
    pub counts: RecordCounts,
    pub stats: &'a Statistics,
    pub z_threshold: f64,
    /// Number of 4-point moving-average values listed in the text report.
    pub preview_len: usize,
    pub generated: DateTime<Local>,
}

impl<'a> Report<'a> {
    pub fn new(source: &'a str, column: &'a str, counts: RecordCounts, stats: &'a Statistics) -> Self {
        Self {
            source,
            column,
            counts,
            stats,
            z_threshold: crate::stats::DEFAULT_Z_THRESHOLD,
            preview_len: 10,
            generated: Local::now(),
        }
    }

    pub fn analysis(&self) -> FullAnalysis {
        self.stats.full_analysis_with(self.z_threshold)
    }
}

// ---------------------------------------------------------------------------
// Interpretation
// ---------------------------------------------------------------------------

/// Narrative reading of a snapshot, one sentence per line.
pub fn interpretation(stats: &Statistics) -> Vec<String> {
    let mean = stats.mean();
    let median = stats.median();
    let mut lines = vec![format!(
        "Central Value: The data centers around {} (mean) with a median of {}.",
        format_fixed(mean),
        format_fixed(median)
    )];

    if mean != 0.0 && (mean - median).abs() / mean.abs() > 0.1 {
        lines.push(
            "Note: Mean and median differ significantly, suggesting potential outliers or skewness."
                .to_string(),
        );
    }

    let mut spread = format!("Spread: Standard deviation is {}", format_fixed(stats.std_dev()));
    let cv = stats.coefficient_of_variation();
    if cv > 0.0 {
        spread.push_str(&format!(" (CV: {}%)", format_fixed(cv)));
    }
    spread.push('.');
    lines.push(spread);

    lines.push(format!(
        "Distribution: {}, {}.",
        stats.skewness_shape(),
        stats.kurtosis_shape()
    ));

    let outliers = stats.count_outliers_iqr();
    if outliers > 0 {
        lines.push(format!(
            "Outliers: {outliers} potential outlier(s) detected using IQR method."
        ));
    }
    lines
}

// ---------------------------------------------------------------------------
// Text report
// ---------------------------------------------------------------------------

pub fn write_text_report<W: Write>(report: &Report<'_>, mut out: W) -> Result<(), ReportError> {
    if report.stats.is_empty() {
        return Err(ReportError::NoData);
    }

    writeln!(out, "{RULE}")?;
    writeln!(out, "    COLUMN ANALYZER - ANALYSIS REPORT")?;
    writeln!(out, "{RULE}")?;
    writeln!(out)?;
    writeln!(out, "Source File: {}", report.source)?;
    writeln!(out, "Column Analyzed: {}", report.column)?;
    writeln!(
        out,
        "Records: {} total, {} valid, {} skipped",
        report.counts.total, report.counts.valid, report.counts.skipped
    )?;
    writeln!(out, "Generated: {}", report.generated.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out)?;

    section(&mut out, "STATISTICAL SUMMARY")?;
    for (name, value) in report.analysis().iter() {
        writeln!(out, "{name:<25} : {}", format_value(Some(value)))?;
    }
    writeln!(out)?;

    section(&mut out, "INTERPRETATION")?;
    writeln!(out, "Skewness: {}", report.stats.skewness_shape())?;
    writeln!(out, "Kurtosis: {}", report.stats.kurtosis_shape())?;
    for line in interpretation(report.stats) {
        writeln!(out, "* {line}")?;
    }
    writeln!(out)?;

    section(&mut out, "MOVING AVERAGES")?;
    let ma4 = report.stats.four_point_moving_average();
    writeln!(out, "4-Point Moving Average values: {}", ma4.len())?;
    if !ma4.is_empty() && report.preview_len > 0 {
        let shown: Vec<String> = ma4
            .iter()
            .take(report.preview_len)
            .map(|v| format_fixed(*v))
            .collect();
        writeln!(out, "First {}: {}", shown.len(), shown.join(", "))?;
    }
    writeln!(out)?;

    writeln!(out, "{RULE}")?;
    writeln!(out, "            END OF REPORT")?;
    writeln!(out, "{RULE}")?;
    out.flush()?;
    Ok(())
}

fn section<W: Write>(out: &mut W, title: &str) -> std::io::Result<()> {
    writeln!(out, "{THIN_RULE}")?;
    writeln!(out, "         {title}")?;
    writeln!(out, "{THIN_RULE}")?;
    writeln!(out)
}

// ---------------------------------------------------------------------------
// JSON report
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    column: &'a str,
    generated: String,
    counts: RecordCounts,
    analysis: FullAnalysis,
    interpretation: JsonInterpretation,
    histogram: Histogram,
    four_point_moving_average: Vec<f64>,
}

#[derive(Serialize)]
struct JsonInterpretation {
    skewness: SkewnessShape,
    kurtosis: KurtosisShape,
    notes: Vec<String>,
}

pub fn write_json_report<W: Write>(report: &Report<'_>, mut out: W) -> Result<(), ReportError> {
    if report.stats.is_empty() {
        return Err(ReportError::NoData);
    }
    let doc = JsonReport {
        source: report.source,
        column: report.column,
        generated: report.generated.to_rfc3339(),
        counts: report.counts,
        analysis: report.analysis(),
        interpretation: JsonInterpretation {
            skewness: report.stats.skewness_shape(),
            kurtosis: report.stats.kurtosis_shape(),
            notes: interpretation(report.stats),
        },
        histogram: report.stats.histogram(),
        four_point_moving_average: report.stats.four_point_moving_average(),
    };
    serde_json::to_writer_pretty(&mut out, &doc)?;
    writeln!(out)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Moving-average CSV
// ---------------------------------------------------------------------------

/// Write the aligned comparison table.
///
/// Indices are 1-based. Rows without an aligned MA value leave the last three
/// cells empty; percent change is also empty when the MA value is 0.
pub fn write_moving_average_csv<W: Write>(
    comparison: &Comparison,
    out: W,
) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([
        "index",
        "original",
        "moving_average",
        "difference",
        "percent_change",
    ])?;

    let cell = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
    for row in &comparison.rows {
        writer.write_record([
            (row.index + 1).to_string(),
            row.original.to_string(),
            cell(row.moving_average),
            cell(row.difference),
            cell(row.percent_change),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// One-line summary of a comparison, e.g.
/// `SMA (window=3) | MA Values: 8 | Avg Diff: 0.1 | MAE: 1.2`.
pub fn comparison_summary(comparison: &Comparison) -> String {
    let mut line = format!(
        "{} | MA Values: {}",
        comparison.kind,
        comparison.averages.len()
    );
    if comparison.summary.compared > 0 {
        line.push_str(&format!(
            " | Avg Diff: {} | MAE: {}",
            format_fixed(comparison.summary.mean_difference),
            format_fixed(comparison.summary.mean_absolute_error)
        ));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::MovingAverage;

    fn stats() -> Statistics {
        Statistics::load(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
    }

    fn report(stats: &Statistics) -> Report<'_> {
        Report::new(
            "data.csv",
            "value",
            RecordCounts {
                total: 6,
                valid: 6,
                skipped: 0,
            },
            stats,
        )
    }

    #[test]
    fn text_report_sections() {
        let stats = stats();
        let mut buf = Vec::new();
        write_text_report(&report(&stats), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Source File: data.csv"));
        assert!(text.contains("Column Analyzed: value"));
        assert!(text.contains(&format!("{:<25} : 3.5\n", "Mean")));
        assert!(text.contains(&format!("{:<25} : 6\n", "Count")));
        assert!(text.contains("Skewness: approximately symmetric"));
        assert!(text.contains("4-Point Moving Average values: 3"));
        assert!(text.contains("First 3: 2.5, 3.5, 4.5"));
        assert!(text.trim_end().ends_with(RULE));
    }

    #[test]
    fn empty_snapshot_is_rejected() {
        let stats = Statistics::default();
        let err = write_text_report(&report(&stats), Vec::new()).unwrap_err();
        assert!(matches!(err, ReportError::NoData));
    }

    #[test]
    fn json_report_keeps_analysis_order() {
        let stats = stats();
        let mut buf = Vec::new();
        write_json_report(&report(&stats), &mut buf).unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(doc["column"], "value");
        assert_eq!(doc["counts"]["valid"], 6);
        assert_eq!(doc["analysis"]["Mean"], 3.5);
        assert_eq!(doc["interpretation"]["skewness"], "approximately symmetric");
        assert_eq!(doc["four_point_moving_average"].as_array().unwrap().len(), 3);

        let text = String::from_utf8(buf).unwrap();
        let count_at = text.find("\"Count\"").unwrap();
        let mean_at = text.find("\"Mean\"").unwrap();
        assert!(count_at < mean_at);
    }

    #[test]
    fn interpretation_notes_skew_and_outliers() {
        let mut data = vec![10.0; 9];
        data.push(100.0);
        let lines = interpretation(&Statistics::load(&data));
        assert!(lines.iter().any(|l| l.starts_with("Note: Mean and median differ")));
        assert!(lines
            .iter()
            .any(|l| l == "Outliers: 1 potential outlier(s) detected using IQR method."));
    }

    #[test]
    fn moving_average_csv_layout() {
        let cmp = MovingAverage::FourPoint.compare(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let mut buf = Vec::new();
        write_moving_average_csv(&cmp, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "index,original,moving_average,difference,percent_change");
        assert_eq!(lines[1], "1,1,,,");
        assert_eq!(lines[2], "2,2,2.5,-0.5,-20");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn summary_line() {
        let cmp = MovingAverage::FourPoint.compare(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(
            comparison_summary(&cmp),
            "4-Point MA (window=4) | MA Values: 3 | Avg Diff: -0.5 | MAE: 0.5"
        );

        let cmp = MovingAverage::Simple { window: 3 }.compare(&[2.0, 4.0, 6.0]);
        assert_eq!(
            comparison_summary(&cmp),
            "SMA (window=3) | MA Values: 1 | Avg Diff: 0 | MAE: 0"
        );
    }
}
