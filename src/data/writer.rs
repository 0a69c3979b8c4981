use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::data::utils::{format_optional, format_value};
use crate::error::{Error, Result};

fn render<I: IntoIterator<Item = String>>(lines: I) -> String {
    let mut out = lines.into_iter().join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Write a series, replacing whatever `path` held.
pub fn write_series(path: &Path, values: &[f64]) -> Result<()> {
    let body = render(values.iter().map(|&v| format_value(v)));
    fs::write(path, body).map_err(|e| Error::io(path, e))
}

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io(path, e))
}

/// Append a series to `path`, creating it if needed.
pub fn append_series(path: &Path, values: &[f64]) -> Result<()> {
    let mut batch = AppendBatch::new();
    batch.extend(path, values);
    batch.flush().map(|_| ())
}

/// Lines destined for several append-only files, held back until every
/// input has been processed so a failure leaves all outputs untouched.
#[derive(Debug, Default)]
pub struct AppendBatch {
    pending: BTreeMap<PathBuf, Vec<String>>,
}

impl AppendBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<PathBuf>, value: Option<f64>) {
        self.pending
            .entry(path.into())
            .or_default()
            .push(format_optional(value));
    }

    pub fn extend(&mut self, path: impl Into<PathBuf>, values: &[f64]) {
        self.pending
            .entry(path.into())
            .or_default()
            .extend(values.iter().map(|&v| format_value(v)));
    }

    /// Append every pending line, one write per file. Every target is opened
    /// before the first write, so a bad path leaves all files unextended.
    pub fn flush(self) -> Result<usize> {
        let mut targets = Vec::with_capacity(self.pending.len());
        for (path, lines) in self.pending {
            let file = open_append(&path)?;
            targets.push((path, file, render(lines)));
        }
        let files = targets.len();
        for (path, mut file, body) in targets {
            file.write_all(body.as_bytes())
                .map_err(|e| Error::io(&path, e))?;
        }
        Ok(files)
    }
}
