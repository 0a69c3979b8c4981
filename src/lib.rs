pub mod config;
pub mod error;
pub mod report;
pub mod sweep;

pub mod data {
    pub mod loader;
    pub mod utils;
    pub mod writer;
}

pub mod metrics {
    pub mod best_trial;
    pub mod monotonic;
    pub mod usage;
}

pub use error::{Error, Result};
