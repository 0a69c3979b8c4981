use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A line that should hold a single number does not.
    #[error("dirty value {value:?} at {}:{line}", .path.display())]
    DirtyValue {
        path: PathBuf,
        line: usize,
        value: String,
    },
    #[error("malformed row {row} in {}: {reason}", .path.display())]
    MalformedRow {
        path: PathBuf,
        row: usize,
        reason: String,
    },
    #[error("csv error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("config {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
    #[error("{} holds no values", .path.display())]
    EmptySeries { path: PathBuf },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
