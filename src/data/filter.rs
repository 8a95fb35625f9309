use super::model::Dataset;

/// Pick the column to analyze.
///
/// A requested name must exist and hold at least one value. Without a
/// request the first column in insertion order that holds values is used.
pub fn select_column<'a>(dataset: &'a Dataset, requested: Option<&str>) -> Option<&'a str> {
    match requested {
        Some(name) => dataset
            .column(name)
            .filter(|c| !c.is_empty())
            .map(|c| c.name.as_str()),
        None => first_populated(dataset),
    }
}

/// Name of the first column that holds at least one value.
pub fn first_populated(dataset: &Dataset) -> Option<&str> {
    dataset
        .columns()
        .iter()
        .find(|c| !c.is_empty())
        .map(|c| c.name.as_str())
}

/// Names of every column holding at least `min_values` values, in order.
pub fn numeric_columns(dataset: &Dataset, min_values: usize) -> Vec<&str> {
    dataset
        .columns()
        .iter()
        .filter(|c| c.len() >= min_values.max(1))
        .map(|c| c.name.as_str())
        .collect()
}
