//! Calibration loop: repeated adaptive runs reduced to one estimate.

use std::time::Instant;

use serde::Serialize;

use crate::adaptive::find_stable_run;
use crate::options::{Estimator, RunOptions};

/// Per-iteration cost of a case, reduced from one or more samples.
#[derive(Debug, Clone, Serialize)]
pub struct Estimate {
    /// The value reported for the case, in nanoseconds per iteration.
    pub ns_per_iter: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
    pub samples: usize,
}

impl Estimate {
    /// Reduce per-iteration samples (nanoseconds). Non-finite and negative
    /// samples are discarded; `None` if nothing usable remains.
    pub fn from_samples(mut samples: Vec<f64>, estimator: Estimator) -> Option<Self> {
        samples.retain(|s| s.is_finite() && *s >= 0.0);
        if samples.is_empty() {
            return None;
        }
        samples.sort_by(f64::total_cmp);

        let min = samples[0];
        let max = samples[samples.len() - 1];
        let mid = samples.len() / 2;
        let median = if samples.len() % 2 == 1 {
            samples[mid]
        } else {
            (samples[mid - 1] + samples[mid]) / 2.0
        };

        Some(Self {
            ns_per_iter: match estimator {
                Estimator::Min => min,
                Estimator::Median => median,
            },
            min,
            median,
            max,
            samples: samples.len(),
        })
    }

    /// Iterations per second implied by [`ns_per_iter`](Self::ns_per_iter).
    pub fn iters_per_sec(&self) -> f64 {
        1e9 / self.ns_per_iter
    }

    /// Remove a fixed per-iteration overhead from every statistic.
    pub fn subtract_baseline(&mut self, baseline_ns: f64) {
        self.ns_per_iter -= baseline_ns;
        self.min -= baseline_ns;
        self.median -= baseline_ns;
        self.max -= baseline_ns;
    }
}

/// Calibrate `work` and estimate its cost per iteration.
///
/// Each epoch searches for an iteration count whose run exceeds
/// `opts.min_time`; later epochs start from the count the previous one
/// settled on. Epochs stop after `opts.epochs` samples or once `opts.max_time`
/// of wall-clock time has passed. Returns `None` when no epoch produced a
/// sample, i.e. the work could not be measured within `opts.max_iters`.
pub fn calibrate<F: Fn(u64)>(opts: &RunOptions, work: F) -> Option<Estimate> {
    let started = Instant::now();
    let mut samples = Vec::new();
    let mut start_iters = opts.min_iters;

    for epoch in 0..opts.epochs {
        let Some(sample) = find_stable_run(opts, &work, start_iters) else {
            tracing::debug!(epoch, max_iters = opts.max_iters, "epoch did not reach minimum time");
            break;
        };
        samples.push(sample.ns_per_iter());
        start_iters = sample.iters;

        if started.elapsed() >= opts.max_time {
            break;
        }
    }

    tracing::trace!(samples = samples.len(), "calibration finished");
    Estimate::from_samples(samples, opts.estimator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hint::black_box;
    use std::time::Duration;

    fn quick() -> RunOptions {
        RunOptions {
            min_time: Duration::from_micros(200),
            max_time: Duration::from_millis(50),
            ..RunOptions::default()
        }
    }

    fn spin(iters: u64) {
        for i in 0..iters {
            black_box(i);
        }
    }

    #[test]
    fn min_and_median() {
        let samples = vec![5.0, 1.0, 3.0, 2.0];
        let min = Estimate::from_samples(samples.clone(), Estimator::Min).unwrap();
        let median = Estimate::from_samples(samples, Estimator::Median).unwrap();
        assert!((min.ns_per_iter - 1.0).abs() < f64::EPSILON);
        assert!((median.ns_per_iter - 2.5).abs() < f64::EPSILON);
        assert!((min.max - 5.0).abs() < f64::EPSILON);
        assert_eq!(min.samples, 4);
    }

    #[test]
    fn discards_unusable_samples() {
        let est = Estimate::from_samples(vec![f64::NAN, f64::INFINITY, -1.0, 4.0], Estimator::Min)
            .unwrap();
        assert_eq!(est.samples, 1);
        assert!(Estimate::from_samples(vec![f64::NAN], Estimator::Min).is_none());
        assert!(Estimate::from_samples(Vec::new(), Estimator::Median).is_none());
    }

    #[test]
    fn throughput_is_inverse() {
        let est = Estimate::from_samples(vec![2.0], Estimator::Min).unwrap();
        assert!((est.iters_per_sec() - 5e8).abs() < 1.0);
    }

    #[test]
    fn baseline_shifts_every_statistic() {
        let mut est = Estimate::from_samples(vec![3.0, 5.0, 10.0], Estimator::Median).unwrap();
        est.subtract_baseline(2.0);
        assert!((est.ns_per_iter - 3.0).abs() < f64::EPSILON);
        assert!((est.min - 1.0).abs() < f64::EPSILON);
        assert!((est.median - 3.0).abs() < f64::EPSILON);
        assert!((est.max - 8.0).abs() < f64::EPSILON);
        assert_eq!(est.samples, 3);
    }

    #[test]
    fn calibrates_cheap_work() {
        let est = calibrate(&quick(), spin).unwrap();
        assert!(est.ns_per_iter > 0.0);
        assert!(est.ns_per_iter.is_finite());
        assert!(est.samples >= 1);
    }

    #[test]
    fn respects_epoch_limit() {
        let opts = RunOptions {
            epochs: 3,
            max_time: Duration::from_secs(30),
            ..quick()
        };
        let est = calibrate(&opts, spin).unwrap();
        assert_eq!(est.samples, 3);
    }

    #[test]
    fn unmeasurable_work_yields_nothing() {
        let opts = RunOptions {
            min_time: Duration::from_secs(60),
            max_iters: 64,
            ..quick()
        };
        assert!(calibrate(&opts, spin).is_none());
    }

    #[test]
    fn repeated_runs_are_comparable() {
        let slow = |iters: u64| {
            for _ in 0..iters {
                spin(1_000);
            }
        };
        let a = calibrate(&quick(), slow).unwrap().ns_per_iter;
        let b = calibrate(&quick(), slow).unwrap().ns_per_iter;
        let ratio = a.max(b) / a.min(b);
        assert!(ratio < 10.0, "a={a} b={b}");
    }
}
