//! Application logic for the settings-read benchmark.

pub mod app;
pub mod cases;
pub mod config;
pub mod errors;
