//! Calibration defaults and process exit codes.

use std::time::Duration;

/// Iteration count the calibration loop starts each epoch with.
pub const DEFAULT_MIN_ITERS: u64 = 1;

/// A timed run must exceed this to count as a sample.
pub const DEFAULT_MIN_TIME: Duration = Duration::from_micros(100);

/// Total time budget spent calibrating one case.
pub const DEFAULT_MAX_TIME: Duration = Duration::from_secs(1);

/// Upper bound on the iteration count of a single run.
pub const DEFAULT_MAX_ITERS: u64 = 1 << 30;

/// Maximum number of samples collected per case.
pub const DEFAULT_EPOCHS: usize = 1000;

/// Thread counts the parallel case families are registered with.
pub const DEFAULT_THREAD_COUNTS: [usize; 5] = [1, 8, 24, 48, 72];

/// Width of the report table, rules included.
pub const REPORT_WIDTH: usize = 76;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Invalid configuration or settings override.
    pub const ERROR_CONFIG: i32 = 4;
}
