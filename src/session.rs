use log::{info, warn};

use crate::data::filter::first_populated;
use crate::data::Dataset;
use crate::stats::Statistics;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// What a host application holds between user actions: the loaded dataset,
/// the analyzed column and its statistics, plus a one-line status.
#[derive(Debug, Default)]
pub struct Session {
    /// Loaded dataset (None until a file with data is loaded).
    pub dataset: Option<Dataset>,

    /// Column currently analyzed.
    pub selected_column: Option<String>,

    /// Snapshot of the selected column.
    pub stats: Option<Statistics>,

    /// Status line shown to the user.
    pub status_message: String,
}

impl Session {
    /// Take a freshly ingested dataset and analyze its first populated column.
    ///
    /// A dataset without columns is not kept.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.selected_column = None;
        self.stats = None;

        if !dataset.has_data() {
            warn!("no numerical data in {}", dataset.source().unwrap_or("<input>"));
            self.dataset = None;
            self.status_message = "No numerical data found in file".to_string();
            return;
        }

        self.status_message = format!(
            "Loaded: {} | {} columns | {} records",
            dataset.source().unwrap_or("<input>"),
            dataset.column_count(),
            dataset.counts().total
        );
        let first = first_populated(&dataset).map(str::to_string);
        self.dataset = Some(dataset);

        match first {
            Some(column) => {
                self.select_column(&column);
            }
            None => {
                warn!("no column of {} holds a numeric value", self.source_name());
                self.status_message = "No numerical data found in file".to_string();
            }
        }
    }

    fn source_name(&self) -> &str {
        self.dataset
            .as_ref()
            .and_then(Dataset::source)
            .unwrap_or("<input>")
    }

    /// Analyze `column`. Returns the new snapshot, or `None` when the column
    /// is unknown or holds no values (the previous selection is dropped).
    pub fn select_column(&mut self, column: &str) -> Option<&Statistics> {
        let values = self
            .dataset
            .as_ref()
            .map(|ds| ds.column_values(column))
            .unwrap_or(&[]);

        if values.is_empty() {
            self.selected_column = None;
            self.stats = None;
            self.status_message = format!("No numeric data in column: {column}");
            return None;
        }

        let stats = Statistics::load(values);
        self.status_message = format!("Analyzing: {column} ({} values)", stats.count());
        info!("{}", self.status_message);
        self.selected_column = Some(column.to_string());
        self.stats = Some(stats);
        self.stats.as_ref()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
