//! Publish the best trial of every sweep point into per-metric series.

use tracing::{info, warn};

use crate::config::{SelectorConfig, Sweep, SweepPoint};
use crate::data::loader::read_trial_table;
use crate::data::utils::series_file_name;
use crate::data::writer::AppendBatch;
use crate::error::Result;
use crate::metrics::best_trial::{best_result, BestTrial, Metric};

#[derive(Clone, Debug)]
pub struct PointOutcome {
    pub point: SweepPoint,
    pub best: Option<BestTrial>,
}

#[derive(Clone, Debug)]
pub struct SweepOutcome {
    pub name: String,
    pub points: Vec<PointOutcome>,
}

impl SweepOutcome {
    /// Values of `metric` in point order, `None` where no row qualified.
    pub fn series(&self, metric: Metric) -> Vec<Option<f64>> {
        self.points
            .iter()
            .map(|p| p.best.as_ref().map(|b| b.scores.get(metric)))
            .collect()
    }
}

/// Select the best trial of every point without writing anything.
pub fn select_sweep(config: &SelectorConfig, sweep: &Sweep) -> Result<SweepOutcome> {
    let mut points = Vec::with_capacity(sweep.points.len());
    for point in &sweep.points {
        let path = config.data_dir.join(&point.input);
        let rows = read_trial_table(&path)?;
        let best = best_result(&rows);
        match &best {
            Some(b) => info!(
                sweep = %sweep.name,
                value = %point.value,
                mode = %b.metric_mode,
                f_measure = b.scores.f_measure,
                "selected best trial"
            ),
            None => warn!(
                sweep = %sweep.name,
                value = %point.value,
                path = %path.display(),
                "no complete trial row"
            ),
        }
        points.push(PointOutcome {
            point: point.clone(),
            best,
        });
    }
    Ok(SweepOutcome {
        name: sweep.name.clone(),
        points,
    })
}

/// Run every sweep, then append one line per point to each of the four
/// `<sweep>-<metric>-perf.txt` series under `data_dir`.
///
/// All tables are read before any series is extended; a malformed table
/// leaves every output untouched.
pub fn run_selector(config: &SelectorConfig) -> Result<Vec<SweepOutcome>> {
    let outcomes = config
        .sweeps
        .iter()
        .map(|sweep| select_sweep(config, sweep))
        .collect::<Result<Vec<_>>>()?;

    let mut batch = AppendBatch::new();
    for outcome in &outcomes {
        for metric in Metric::ALL {
            let path = config
                .data_dir
                .join(series_file_name(&outcome.name, metric.slug()));
            for value in outcome.series(metric) {
                batch.push(&path, value);
            }
        }
    }
    let files = batch.flush()?;
    info!(sweeps = outcomes.len(), files, "appended best-trial series");
    Ok(outcomes)
}
