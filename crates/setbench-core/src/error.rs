//! Error type for benchmark registration and execution.

/// Errors raised while building or running a benchmark suite.
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// Two cases share the same display name.
    #[error("duplicate benchmark case: {0}")]
    DuplicateCase(String),

    /// A run option is out of range.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// The case filter left nothing to run.
    #[error("no benchmark case matches filter {0:?}")]
    NoMatch(String),
}
