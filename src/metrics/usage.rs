//! Split sampled `ps` logs into memory and CPU series.
//!
//! A sample starts with a `%CPU` header followed by one `%CPU %MEM` line for
//! the process. Per-thread samples follow a `PSR` header as `<core> <cpu%>`
//! lines and are summed per core. CPU values are emitted at each `%CPU` header,
//! so both series stay the same length.

use std::path::{Path, PathBuf};

use itertools::Itertools;
use tracing::{debug, info};

use crate::config::UsageLayout;
use crate::data::utils::parse_value;
use crate::data::loader;
use crate::data::writer::AppendBatch;
use crate::error::{Error, Result};

const SAMPLE_HEADER: &str = "%CPU";
const CORE_HEADER: &str = "PSR";

/// How per-core accumulations become CPU series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CpuMode {
    /// Sum of all cores over the core count.
    Average,
    /// Busiest core.
    Highest,
    /// One series per core.
    PerCore,
    /// The process `%CPU` column, no per-core block.
    Process,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UsageSeries {
    pub mem: Vec<f64>,
    /// One series for every mode except `PerCore`, which has one per core.
    pub cpu: Vec<Vec<f64>>,
}

struct Line<'a> {
    number: usize,
    tokens: Vec<&'a str>,
}

impl<'a> Line<'a> {
    fn number_at(&self, index: usize, path: &Path) -> Result<f64> {
        match self.tokens.get(index) {
            Some(token) => parse_value(token, path, self.number),
            None => Err(Error::DirtyValue {
                path: path.to_path_buf(),
                line: self.number,
                value: self.tokens.join(" "),
            }),
        }
    }
}

/// Decompose the text of a `ps` log. `path` only labels errors.
pub fn decompose(
    text: &str,
    path: &Path,
    layout: UsageLayout,
    mode: CpuMode,
) -> Result<UsageSeries> {
    let series_count = match mode {
        CpuMode::PerCore => layout.cores,
        _ => 1,
    };
    let mut out = UsageSeries {
        mem: Vec::new(),
        cpu: vec![Vec::new(); series_count],
    };
    let mut cores = vec![0.0_f64; layout.cores];
    let mut next_is_mem = false;
    let mut next_is_cpu = false;

    for (i, raw) in text.lines().enumerate() {
        let line = Line {
            number: i + 1,
            tokens: raw.split_whitespace().collect(),
        };
        let Some(&first) = line.tokens.first() else {
            continue;
        };

        if first == SAMPLE_HEADER {
            if mode != CpuMode::Process {
                emit_cpu(&mut out.cpu, &cores, mode);
                cores.iter_mut().for_each(|c| *c = 0.0);
            }
            next_is_mem = true;
            next_is_cpu = false;
            continue;
        }
        if next_is_mem {
            let mem = line.number_at(1, path)? * layout.total_mem_mb * 0.01;
            out.mem.push(mem);
            if mode == CpuMode::Process {
                out.cpu[0].push(line.number_at(0, path)?);
            }
            next_is_mem = false;
            continue;
        }
        if first == CORE_HEADER {
            next_is_cpu = true;
            continue;
        }
        if next_is_cpu {
            if let Ok(core) = first.parse::<usize>() {
                if core < layout.cores {
                    cores[core] += line.number_at(1, path)?;
                }
            }
        }
    }

    debug!(samples = out.mem.len(), ?mode, "decomposed usage log");
    Ok(out)
}

fn emit_cpu(cpu: &mut [Vec<f64>], cores: &[f64], mode: CpuMode) {
    match mode {
        CpuMode::Average => {
            let total: f64 = cores.iter().sum();
            cpu[0].push(total / cores.len().max(1) as f64);
        }
        CpuMode::Highest => {
            let highest = cores.iter().copied().fold(0.0_f64, f64::max);
            cpu[0].push(highest);
        }
        CpuMode::PerCore => {
            for (series, &value) in cpu.iter_mut().zip(cores) {
                series.push(value);
            }
        }
        CpuMode::Process => {}
    }
}

/// Decompose `input` and append to `mem_out` and one file per CPU series.
/// Nothing is appended unless the whole log parses.
pub fn decompose_file(
    input: &Path,
    mem_out: &Path,
    cpu_out: &[PathBuf],
    layout: UsageLayout,
    mode: CpuMode,
) -> Result<UsageSeries> {
    let text = loader::read_text(input)?;
    let series = decompose(&text, input, layout, mode)?;
    if cpu_out.len() != series.cpu.len() {
        return Err(Error::Config {
            path: input.to_path_buf(),
            reason: format!(
                "{} cpu outputs given, {} series produced",
                cpu_out.len(),
                series.cpu.len()
            ),
        });
    }
    let mut batch = AppendBatch::new();
    batch.extend(mem_out, &series.mem);
    for (path, values) in cpu_out.iter().zip(&series.cpu) {
        batch.extend(path, values);
    }
    batch.flush()?;
    info!(
        input = %input.display(),
        samples = series.mem.len(),
        outputs = %cpu_out.iter().map(|p| p.display()).join(", "),
        "appended usage series"
    );
    Ok(series)
}

/// Arithmetic mean of the series stored at `path`.
pub fn average_file(path: &Path) -> Result<f64> {
    let values = loader::read_series(path)?;
    mean(&values).ok_or_else(|| Error::EmptySeries {
        path: path.to_path_buf(),
    })
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
