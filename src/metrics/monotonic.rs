//! Clean up approximate progress timestamps.
//!
//! The instrumentation records an elapsed time every time a fixed number of
//! edges has been processed. The readings are approximate, so a later reading
//! can come out smaller than an earlier one. Any such reading is raised to the
//! largest value seen so far, giving a non-decreasing series that can be
//! plotted against the edge count.

use std::path::Path;

use tracing::info;

use crate::data::{loader, writer};
use crate::error::Result;

/// Running maximum of `values`, starting from 0.
pub fn clean_up(values: &[f64]) -> Vec<f64> {
    let mut current = 0.0_f64;
    values
        .iter()
        .map(|&v| {
            if v > current {
                current = v;
            }
            current
        })
        .collect()
}

/// Read `input`, clean it and write the result to `output`.
///
/// The input is fully parsed before `output` is touched, so a dirty value
/// leaves no output file behind.
pub fn clean_up_file(input: &Path, output: &Path) -> Result<usize> {
    let values = loader::read_series(input)?;
    let cleaned = clean_up(&values);
    let raised = values
        .iter()
        .zip(cleaned.iter())
        .filter(|(raw, clean)| raw < clean)
        .count();
    writer::write_series(output, &cleaned)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        values = cleaned.len(),
        raised,
        "cleaned timestamps"
    );
    Ok(cleaned.len())
}
