use std::cmp::Ordering;
use std::fmt;

use ordered_float::OrderedFloat;
use tracing::debug;

use crate::data::utils::NONE_SENTINEL;

/// Column holding the aggregation mode label.
pub const MODE_COLUMN: usize = 0;
/// Column holding the standard deviation.
pub const STD_COLUMN: usize = 1;
/// Columns 6..=9: precision, recall, accuracy, f-measure.
pub const PRECISION_COLUMN: usize = 6;
pub const RECALL_COLUMN: usize = 7;
pub const ACCURACY_COLUMN: usize = 8;
pub const F_MEASURE_COLUMN: usize = 9;
pub const MIN_COLUMNS: usize = F_MEASURE_COLUMN + 1;

/// Statistical aggregation a trial row was computed with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MetricMode {
    Mean,
    Max,
    Other(String),
}

impl MetricMode {
    pub fn parse(label: &str) -> Self {
        match label {
            "mean" => MetricMode::Mean,
            "max" => MetricMode::Max,
            other => MetricMode::Other(other.to_string()),
        }
    }

    /// Mean is preferred over max, anything else ranks below both.
    fn rank(&self) -> u8 {
        match self {
            MetricMode::Mean => 2,
            MetricMode::Max => 1,
            MetricMode::Other(_) => 0,
        }
    }
}

impl fmt::Display for MetricMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricMode::Mean => write!(f, "mean"),
            MetricMode::Max => write!(f, "max"),
            MetricMode::Other(label) => write!(f, "{}", label),
        }
    }
}

/// The four quality metrics published per trial.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    FMeasure,
    Precision,
    Recall,
    Accuracy,
}

impl Metric {
    /// Output order of the per-metric series.
    pub const ALL: [Metric; 4] = [
        Metric::FMeasure,
        Metric::Precision,
        Metric::Recall,
        Metric::Accuracy,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Metric::FMeasure => "f-measure",
            Metric::Precision => "precision",
            Metric::Recall => "recall",
            Metric::Accuracy => "accuracy",
        }
    }
}

/// One row of a benchmark results table.
#[derive(Clone, Debug, PartialEq)]
pub struct TrialResult {
    pub metric_mode: MetricMode,
    pub std_dev: Option<f64>,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub accuracy: Option<f64>,
    pub f_measure: Option<f64>,
}

fn parse_optional(field: &str, column: usize) -> Result<Option<f64>, String> {
    if field == NONE_SENTINEL {
        return Ok(None);
    }
    field
        .parse::<f64>()
        .map(Some)
        .map_err(|_| format!("column {} holds {:?}, expected a number or None", column, field))
}

/// A score is a finite number or `None`.
fn parse_score(field: &str, column: usize) -> Result<Option<f64>, String> {
    match parse_optional(field, column)? {
        Some(v) if !v.is_finite() => Err(format!(
            "column {} holds non-finite score {:?}",
            column, field
        )),
        score => Ok(score),
    }
}

fn field<S: AsRef<str>>(fields: &[S], i: usize) -> &str {
    fields[i].as_ref().trim()
}

impl TrialResult {
    /// Build a row from its already-split fields. Extra columns are ignored.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, String> {
        if fields.len() < MIN_COLUMNS {
            return Err(format!(
                "expected at least {} columns, found {}",
                MIN_COLUMNS,
                fields.len()
            ));
        }
        let metric_mode = MetricMode::parse(field(fields, MODE_COLUMN));
        // Only mean rows compare std; elsewhere unparsable text reads as absent.
        let std_field = field(fields, STD_COLUMN);
        let std_dev = match metric_mode {
            MetricMode::Mean => parse_optional(std_field, STD_COLUMN)?,
            _ => parse_optional(std_field, STD_COLUMN).ok().flatten(),
        };
        Ok(TrialResult {
            metric_mode,
            std_dev,
            precision: parse_score(field(fields, PRECISION_COLUMN), PRECISION_COLUMN)?,
            recall: parse_score(field(fields, RECALL_COLUMN), RECALL_COLUMN)?,
            accuracy: parse_score(field(fields, ACCURACY_COLUMN), ACCURACY_COLUMN)?,
            f_measure: parse_score(field(fields, F_MEASURE_COLUMN), F_MEASURE_COLUMN)?,
        })
    }

    /// `None` when any of the four scores is absent.
    pub fn scores(&self) -> Option<Scores> {
        Some(Scores {
            f_measure: self.f_measure?,
            accuracy: self.accuracy?,
            precision: self.precision?,
            recall: self.recall?,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scores {
    pub f_measure: f64,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
}

impl Scores {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::FMeasure => self.f_measure,
            Metric::Precision => self.precision,
            Metric::Recall => self.recall,
            Metric::Accuracy => self.accuracy,
        }
    }
}

/// A valid trial row, ordered by the selection ladder.
#[derive(Clone, Debug, PartialEq)]
pub struct BestTrial {
    pub metric_mode: MetricMode,
    pub std_dev: Option<f64>,
    pub scores: Scores,
}

type SelectionKey = (
    OrderedFloat<f64>,
    OrderedFloat<f64>,
    OrderedFloat<f64>,
    OrderedFloat<f64>,
    u8,
    OrderedFloat<f64>,
);

impl BestTrial {
    fn from_row(row: &TrialResult) -> Option<Self> {
        Some(BestTrial {
            metric_mode: row.metric_mode.clone(),
            std_dev: row.std_dev,
            scores: row.scores()?,
        })
    }

    /// (f_measure, accuracy, precision, recall, mode rank, std of mean rows).
    /// Std only separates two mean rows; every other mode shares the floor.
    fn key(&self) -> SelectionKey {
        let std = match self.metric_mode {
            MetricMode::Mean => self.std_dev.unwrap_or(f64::NEG_INFINITY),
            _ => f64::NEG_INFINITY,
        };
        (
            OrderedFloat(self.scores.f_measure),
            OrderedFloat(self.scores.accuracy),
            OrderedFloat(self.scores.precision),
            OrderedFloat(self.scores.recall),
            self.metric_mode.rank(),
            OrderedFloat(std),
        )
    }

    pub fn compare(&self, other: &BestTrial) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Pick the best complete row. Rows with an absent score never qualify;
/// a candidate must be strictly greater to displace the current best.
pub fn best_result<'a, I>(rows: I) -> Option<BestTrial>
where
    I: IntoIterator<Item = &'a TrialResult>,
{
    let mut best: Option<BestTrial> = None;
    for (i, row) in rows.into_iter().enumerate() {
        let Some(candidate) = BestTrial::from_row(row) else {
            debug!(row = i + 1, "skipping row with absent scores");
            continue;
        };
        let replace = match &best {
            None => true,
            Some(current) => candidate.compare(current) == Ordering::Greater,
        };
        if replace {
            best = Some(candidate);
        }
    }
    best
}
