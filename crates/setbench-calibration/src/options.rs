//! Calibration options.

use std::time::Duration;

use setbench_core::constants::{
    DEFAULT_EPOCHS, DEFAULT_MAX_ITERS, DEFAULT_MAX_TIME, DEFAULT_MIN_ITERS, DEFAULT_MIN_TIME,
};
use setbench_core::BenchError;

/// How per-epoch samples are reduced to one estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Estimator {
    /// Fastest sample; least affected by preemption.
    #[default]
    Min,
    Median,
}

/// Knobs of the calibration loop and the suite runner.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// First iteration count tried.
    pub min_iters: u64,
    /// A run must take at least this long to yield a sample.
    pub min_time: Duration,
    /// Wall-clock budget per case.
    pub max_time: Duration,
    /// Give up on an epoch past this many iterations.
    pub max_iters: u64,
    /// Maximum samples per case.
    pub epochs: usize,
    pub estimator: Estimator,
    /// Subtract the cost of an empty loop from every result.
    pub subtract_baseline: bool,
    /// Only run cases whose display name contains this.
    pub filter: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            min_iters: DEFAULT_MIN_ITERS,
            min_time: DEFAULT_MIN_TIME,
            max_time: DEFAULT_MAX_TIME,
            max_iters: DEFAULT_MAX_ITERS,
            epochs: DEFAULT_EPOCHS,
            estimator: Estimator::default(),
            subtract_baseline: false,
            filter: None,
        }
    }
}

impl RunOptions {
    /// Check that the options describe a loop that can terminate.
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.min_iters == 0 {
            return Err(BenchError::InvalidOption("min_iters must be positive".into()));
        }
        if self.min_iters > self.max_iters {
            return Err(BenchError::InvalidOption(format!(
                "min_iters ({}) exceeds max_iters ({})",
                self.min_iters, self.max_iters
            )));
        }
        if self.epochs == 0 {
            return Err(BenchError::InvalidOption("epochs must be positive".into()));
        }
        if self.min_time.is_zero() {
            return Err(BenchError::InvalidOption("min_time must be positive".into()));
        }
        Ok(())
    }

    /// Whether a case with this display name should run.
    pub fn selects(&self, display_name: &str) -> bool {
        match self.filter.as_deref() {
            Some(filter) => display_name.contains(filter),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(RunOptions::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_min_iters() {
        let opts = RunOptions {
            min_iters: 0,
            ..RunOptions::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn rejects_inverted_iters() {
        let opts = RunOptions {
            min_iters: 100,
            max_iters: 10,
            ..RunOptions::default()
        };
        let err = opts.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn rejects_zero_epochs_and_time() {
        let no_epochs = RunOptions {
            epochs: 0,
            ..RunOptions::default()
        };
        assert!(no_epochs.validate().is_err());

        let no_time = RunOptions {
            min_time: Duration::ZERO,
            ..RunOptions::default()
        };
        assert!(no_time.validate().is_err());
    }

    #[test]
    fn filter_by_substring() {
        let opts = RunOptions {
            filter: Some("parallel".into()),
            ..RunOptions::default()
        };
        assert!(opts.selects("trivial_access_parallel(8thr)"));
        assert!(!opts.selects("trivial_access"));
        assert!(RunOptions::default().selects("anything"));
    }
}
