use std::path::Path;

use crate::error::{Error, Result};

/// Text written in place of a value that could not be computed.
pub const NONE_SENTINEL: &str = "None";

/// Sample count shared by every benchmark run in the built-in sweeps.
pub const DEFAULT_ITERATIONS: u32 = 10000;

/// Render a value the way the series files store it: shortest round-trip
/// form, integral values keep a trailing `.0`.
pub fn format_value(v: f64) -> String {
    format!("{:?}", v)
}

pub fn format_optional(v: Option<f64>) -> String {
    match v {
        Some(v) => format_value(v),
        None => NONE_SENTINEL.to_string(),
    }
}

/// Parse one trimmed line of a series file. `line` is 1-based.
pub fn parse_value(text: &str, path: &Path, line: usize) -> Result<f64> {
    let trimmed = text.trim();
    trimmed.parse::<f64>().map_err(|_| Error::DirtyValue {
        path: path.to_path_buf(),
        line,
        value: trimmed.to_string(),
    })
}

/// Results table name for one benchmark configuration.
pub fn stats_file_name(sketch: u32, hop: u32, window: u32, iterations: u32) -> String {
    format!("stats-s-{}-h-{}-w-{}-i-{}.csv", sketch, hop, window, iterations)
}

/// Output series name for one sweep and one metric slug.
pub fn series_file_name(sweep: &str, metric: &str) -> String {
    format!("{}-{}-perf.txt", sweep, metric)
}
