use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::data::utils::parse_value;
use crate::error::{Error, Result};
use crate::metrics::best_trial::TrialResult;

/// Read a whole text file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Load a one-value-per-line series. Every line must parse.
pub fn read_series(path: &Path) -> Result<Vec<f64>> {
    let text = read_text(path)?;
    let values = text
        .lines()
        .enumerate()
        .map(|(i, line)| parse_value(line, path, i + 1))
        .collect::<Result<Vec<f64>>>()?;
    debug!(path = %path.display(), values = values.len(), "loaded series");
    Ok(values)
}

/// Load a headerless results table.
pub fn read_trial_table(path: &Path) -> Result<Vec<TrialResult>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|source| Error::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|source| Error::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let fields: Vec<&str> = record.iter().collect();
        let row = TrialResult::from_fields(&fields).map_err(|reason| Error::MalformedRow {
            path: path.to_path_buf(),
            row: i + 1,
            reason,
        })?;
        rows.push(row);
    }
    debug!(path = %path.display(), rows = rows.len(), "loaded results table");
    Ok(rows)
}
