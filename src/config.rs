use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::utils::{stats_file_name, DEFAULT_ITERATIONS};
use crate::error::{Error, Result};

/// One configuration value of a sweep and the results table it produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub value: String,
    pub input: String,
}

/// Benchmark runs that vary one parameter while holding the others fixed.
/// Output series rows follow `points` order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    pub name: String,
    pub points: Vec<SweepPoint>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub data_dir: PathBuf,
    pub sweeps: Vec<Sweep>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("../data"),
            sweeps: build_sweeps(),
        }
    }
}

impl SelectorConfig {
    /// Load a JSON config; missing fields fall back to the defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let config: SelectorConfig =
            serde_json::from_reader(file).map_err(|e| Error::Config {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        for sweep in &self.sweeps {
            if sweep.name.is_empty() {
                return Err(Error::Config {
                    path: path.to_path_buf(),
                    reason: "sweep with an empty name".to_string(),
                });
            }
            if sweep.points.is_empty() {
                return Err(Error::Config {
                    path: path.to_path_buf(),
                    reason: format!("sweep {} has no points", sweep.name),
                });
            }
        }
        Ok(())
    }
}

/// The sketch, window and hop sweeps of the evaluation.
pub fn build_sweeps() -> Vec<Sweep> {
    let sketch: Vec<SweepPoint> = [500, 1000, 1500, 2000, 3000]
        .iter()
        .map(|&s| SweepPoint {
            value: s.to_string(),
            input: stats_file_name(s, 3, 450, DEFAULT_ITERATIONS),
        })
        .collect();
    let window: Vec<SweepPoint> = [200, 450, 500, 1000, 2000]
        .iter()
        .map(|&w| SweepPoint {
            value: w.to_string(),
            input: stats_file_name(2000, 3, w, DEFAULT_ITERATIONS),
        })
        .collect();
    let hop: Vec<SweepPoint> = (1..=5)
        .map(|h| SweepPoint {
            value: h.to_string(),
            input: stats_file_name(2000, h, 450, DEFAULT_ITERATIONS),
        })
        .collect();

    vec![
        Sweep {
            name: "sketch".into(),
            points: sketch,
        },
        Sweep {
            name: "window".into(),
            points: window,
        },
        Sweep {
            name: "hop".into(),
            points: hop,
        },
    ]
}

/// Shape of the machine a `ps` log was sampled on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UsageLayout {
    pub cores: usize,
    pub total_mem_mb: f64,
}

impl Default for UsageLayout {
    fn default() -> Self {
        Self {
            cores: 4,
            total_mem_mb: 4096.0,
        }
    }
}
