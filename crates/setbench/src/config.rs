//! Application configuration from CLI flags and environment.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use setbench_calibration::{Estimator, RunOptions};
use setbench_core::constants::{
    DEFAULT_EPOCHS, DEFAULT_MAX_ITERS, DEFAULT_MIN_ITERS, DEFAULT_THREAD_COUNTS,
};
use setbench_core::BenchError;

/// How calibration samples are reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EstimatorArg {
    Min,
    Median,
}

impl From<EstimatorArg> for Estimator {
    fn from(arg: EstimatorArg) -> Self {
        match arg {
            EstimatorArg::Min => Estimator::Min,
            EstimatorArg::Median => Estimator::Median,
        }
    }
}

/// Measures the cost of reading shared settings, alone and under
/// concurrent access.
#[derive(Parser, Debug)]
#[command(name = "setbench", version, about)]
pub struct AppConfig {
    /// Iteration count each calibration epoch starts from.
    #[arg(long, default_value_t = DEFAULT_MIN_ITERS, env = "SETBENCH_MIN_ITERS")]
    pub bm_min_iters: u64,

    /// Minimum duration of a timed run, in microseconds.
    #[arg(long, default_value_t = 100)]
    pub bm_min_usec: u64,

    /// Wall-clock budget per case, in seconds.
    #[arg(long, default_value_t = 1.0, env = "SETBENCH_MAX_SECS")]
    pub bm_max_secs: f64,

    /// Give up calibrating a case past this many iterations.
    #[arg(long, default_value_t = DEFAULT_MAX_ITERS)]
    pub bm_max_iters: u64,

    /// Maximum number of samples per case.
    #[arg(long, default_value_t = DEFAULT_EPOCHS)]
    pub bm_epochs: usize,

    /// Reduce samples with the minimum or the median.
    #[arg(long, value_enum, default_value_t = EstimatorArg::Min)]
    pub bm_estimator: EstimatorArg,

    /// Subtract the cost of an empty loop from every result.
    #[arg(long)]
    pub bm_subtract_baseline: bool,

    /// Only run cases whose name contains this text.
    #[arg(long)]
    pub bm_filter: Option<String>,

    /// Thread counts for the parallel cases (comma separated).
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_THREAD_COUNTS.to_vec())]
    pub threads: Vec<usize>,

    /// Store the integer setting behind a reader-writer lock instead of in an
    /// atomic cell.
    #[arg(long)]
    pub locked: bool,

    /// Override a setting, e.g. `--setting setbench_trivial=7`.
    #[arg(long = "setting", value_name = "PROJECT_NAME=VALUE")]
    pub settings: Vec<String>,

    /// Print the declared settings and exit.
    #[arg(long)]
    pub list_settings: bool,

    /// Emit results as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Calibration options described by the flags.
    pub fn run_options(&self) -> Result<RunOptions, BenchError> {
        let max_time = Duration::try_from_secs_f64(self.bm_max_secs).map_err(|_| {
            BenchError::InvalidOption(format!("bm-max-secs: {}", self.bm_max_secs))
        })?;
        let opts = RunOptions {
            min_iters: self.bm_min_iters,
            min_time: Duration::from_micros(self.bm_min_usec),
            max_time,
            max_iters: self.bm_max_iters,
            epochs: self.bm_epochs,
            estimator: self.bm_estimator.into(),
            subtract_baseline: self.bm_subtract_baseline,
            filter: self.bm_filter.clone(),
        };
        opts.validate()?;
        Ok(opts)
    }

    /// Thread counts for the parallel cases; each must be positive.
    pub fn thread_counts(&self) -> Result<&[usize], BenchError> {
        if self.threads.contains(&0) {
            return Err(BenchError::InvalidOption(
                "thread counts must be positive".into(),
            ));
        }
        Ok(&self.threads)
    }
}
