//! # setbench-calibration
//!
//! Adaptive iteration-count calibration and execution of a whole
//! [`BenchmarkRegistry`](setbench_core::BenchmarkRegistry).

pub mod adaptive;
pub mod options;
pub mod runner;
pub mod suite;

pub use options::{Estimator, RunOptions};
pub use runner::{calibrate, Estimate};
pub use suite::{run_suite, CaseResult, ReportLine, SuiteReport};
