//! Adaptive iteration-count search.

use std::time::Duration;

use setbench_core::measure;

use crate::options::RunOptions;

/// One timed run that lasted long enough to trust.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub iters: u64,
    pub elapsed: Duration,
}

impl Sample {
    /// Nanoseconds per iteration.
    pub fn ns_per_iter(&self) -> f64 {
        self.elapsed.as_nanos() as f64 / self.iters as f64
    }
}

/// Time `work(iters)` once, excluding suspended time.
pub fn time_run<F: Fn(u64)>(work: &F, iters: u64) -> Duration {
    measure(|| work(iters))
}

/// Double the iteration count from `start` until a run exceeds
/// `opts.min_time`.
///
/// Returns `None` when `opts.max_iters` is passed first: the work is too fast
/// (or too noisy) to measure with the current bounds.
pub fn find_stable_run<F: Fn(u64)>(opts: &RunOptions, work: &F, start: u64) -> Option<Sample> {
    let mut iters = start.max(1);
    while iters <= opts.max_iters {
        let elapsed = time_run(work, iters);
        if elapsed >= opts.min_time {
            return Some(Sample { iters, elapsed });
        }
        iters = iters.checked_mul(2)?;
    }
    None
}
