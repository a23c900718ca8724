//! Benchmark cases.

use std::fmt;

/// Work function of a case: runs the measured operation `iters` times.
pub type WorkFn = Box<dyn Fn(u64) + Send + Sync>;

/// Integer argument of a parameterized case, with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseParam {
    pub value: u64,
    pub label: String,
}

/// A named benchmark case. Immutable once built.
pub struct BenchmarkCase {
    name: String,
    param: Option<CaseParam>,
    relative: bool,
    work: WorkFn,
}

impl BenchmarkCase {
    /// Create a plain case.
    pub fn new<F>(name: impl Into<String>, work: F) -> Self
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            param: None,
            relative: false,
            work: Box::new(work),
        }
    }

    /// Create a case that forwards `value` to `work` on every invocation.
    pub fn with_param<F>(
        name: impl Into<String>,
        label: impl Into<String>,
        value: u64,
        work: F,
    ) -> Self
    where
        F: Fn(u64, u64) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            param: Some(CaseParam {
                value,
                label: label.into(),
            }),
            relative: false,
            work: Box::new(move |iters| work(iters, value)),
        }
    }

    /// Report this case relative to the preceding non-relative case.
    #[must_use]
    pub fn relative(mut self) -> Self {
        self.relative = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param(&self) -> Option<&CaseParam> {
        self.param.as_ref()
    }

    pub fn is_relative(&self) -> bool {
        self.relative
    }

    /// Name shown in reports: `name(label)` for parameterized cases.
    pub fn display_name(&self) -> String {
        match &self.param {
            Some(param) => format!("{}({})", self.name, param.label),
            None => self.name.clone(),
        }
    }

    /// Invoke the work function.
    #[inline]
    pub fn run(&self, iters: u64) {
        (self.work)(iters);
    }
}

impl fmt::Debug for BenchmarkCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkCase")
            .field("name", &self.name)
            .field("param", &self.param)
            .field("relative", &self.relative)
            .finish_non_exhaustive()
    }
}
