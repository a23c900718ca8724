//! # setbench-core
//!
//! Synchronization and timing primitives for nanosecond-scale benchmarks:
//! a reusable [`Barrier`], the [`Suspender`] timing-exclusion guard, the
//! [`parallel`] driver built on both, and the case registry.

pub mod barrier;
pub mod case;
pub mod constants;
pub mod error;
pub mod parallel;
pub mod registry;
pub mod suspender;

pub use barrier::Barrier;
pub use case::{BenchmarkCase, CaseParam};
pub use error::BenchError;
pub use parallel::parallel;
pub use registry::{BenchmarkRegistry, Entry};
pub use suspender::{measure, Suspender};
