//! # setbench-cli
//!
//! Report formatting: the result table, JSON output and settings listings.

pub mod output;
pub mod presenter;

pub use presenter::{JsonPresenter, ReportPresenter, TablePresenter};
