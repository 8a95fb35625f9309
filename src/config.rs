use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{Delimiter, IngestOptions};
use crate::stats::moving_average::DEFAULT_EMA_ALPHA;
use crate::stats::DEFAULT_Z_THRESHOLD;

/// Analysis settings, loadable from a JSON file.
///
/// Missing keys fall back to their defaults:
///
/// ```json
/// { "has_header": true, "delimiter": null, "window": 4, "ema_alpha": 0.3,
///   "z_threshold": 2.0, "preview_len": 10 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub has_header: bool,
    /// `None` detects the delimiter from the first line.
    pub delimiter: Option<Delimiter>,
    /// Window for the simple and weighted moving averages.
    pub window: usize,
    pub ema_alpha: f64,
    pub z_threshold: f64,
    /// Moving-average values listed in the text report.
    pub preview_len: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: None,
            window: 4,
            ema_alpha: DEFAULT_EMA_ALPHA,
            z_threshold: DEFAULT_Z_THRESHOLD,
            preview_len: 10,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            has_header: self.has_header,
            delimiter: self.delimiter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: AnalyzerConfig =
            serde_json::from_str(r#"{ "window": 7, "delimiter": "tab" }"#).unwrap();
        assert_eq!(cfg.window, 7);
        assert_eq!(cfg.delimiter, Some(Delimiter::Tab));
        assert!(cfg.has_header);
        assert_eq!(cfg.ema_alpha, 0.3);
        assert_eq!(cfg.preview_len, 10);
    }

    #[test]
    fn ingest_options_follow_config() {
        let cfg = AnalyzerConfig {
            has_header: false,
            delimiter: Some(Delimiter::Pipe),
            ..AnalyzerConfig::default()
        };
        assert_eq!(
            cfg.ingest_options(),
            IngestOptions {
                has_header: false,
                delimiter: Some(Delimiter::Pipe),
            }
        );
    }

    #[test]
    fn missing_file_has_context() {
        let err = AnalyzerConfig::from_path(Path::new("/no/such/config.json")).unwrap_err();
        assert!(err.to_string().starts_with("reading config"));
    }
}
