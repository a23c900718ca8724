//! Executes every case of a registry in order.

use std::hint::black_box;

use serde::Serialize;

use setbench_core::{BenchError, BenchmarkCase, BenchmarkRegistry, Entry};

use crate::options::RunOptions;
use crate::runner::{calibrate, Estimate};

/// Measured result of one case.
#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    /// Display name, `name(label)` for parameterized cases.
    pub name: String,
    pub ns_per_iter: f64,
    pub iters_per_sec: f64,
    /// Percentage speed against the preceding non-relative case.
    pub relative: Option<f64>,
    pub estimate: Estimate,
}

/// A line of the report: a measured case or a group separator.
#[derive(Debug, Clone)]
pub enum ReportLine {
    Row(CaseResult),
    Separator,
}

/// Ordered output of a suite run.
#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    pub lines: Vec<ReportLine>,
    /// Cost of the empty loop, when it was subtracted.
    pub baseline_ns: Option<f64>,
}

impl SuiteReport {
    /// Measured rows in order, separators skipped.
    pub fn rows(&self) -> impl Iterator<Item = &CaseResult> {
        self.lines.iter().filter_map(|line| match line {
            ReportLine::Row(row) => Some(row),
            ReportLine::Separator => None,
        })
    }

    fn push_separator(&mut self) {
        if matches!(self.lines.last(), Some(ReportLine::Row(_))) {
            self.lines.push(ReportLine::Separator);
        }
    }
}

fn empty_loop(iters: u64) {
    for i in 0..iters {
        black_box(i);
    }
}

/// Run every selected case of `registry` in registration order.
///
/// Cases whose calibration does not stabilize are logged and left out of the
/// report. Separators are kept only between non-empty groups.
pub fn run_suite(
    registry: &BenchmarkRegistry,
    opts: &RunOptions,
) -> Result<SuiteReport, BenchError> {
    opts.validate()?;
    if let Some(filter) = &opts.filter {
        if !registry.cases().any(|case| opts.selects(&case.display_name())) {
            return Err(BenchError::NoMatch(filter.clone()));
        }
    }

    let mut report = SuiteReport::default();
    if opts.subtract_baseline {
        report.baseline_ns = calibrate(opts, empty_loop).map(|est| est.ns_per_iter);
        tracing::info!(baseline_ns = ?report.baseline_ns, "measured loop baseline");
    }

    let mut reference: Option<f64> = None;
    for entry in registry.entries() {
        let case = match entry {
            Entry::Separator => {
                report.push_separator();
                continue;
            }
            Entry::Case(case) if opts.selects(&case.display_name()) => case,
            Entry::Case(_) => continue,
        };

        let Some(row) = run_case(case, opts, report.baseline_ns, reference) else {
            continue;
        };
        if !case.is_relative() {
            reference = Some(row.ns_per_iter);
        }
        report.lines.push(ReportLine::Row(row));
    }

    if matches!(report.lines.last(), Some(ReportLine::Separator)) {
        report.lines.pop();
    }
    Ok(report)
}

fn run_case(
    case: &BenchmarkCase,
    opts: &RunOptions,
    baseline_ns: Option<f64>,
    reference: Option<f64>,
) -> Option<CaseResult> {
    let name = case.display_name();
    tracing::info!(case = %name, "running benchmark case");

    let Some(mut estimate) = calibrate(opts, |iters| case.run(iters)) else {
        tracing::warn!(case = %name, "calibration did not stabilize, no result reported");
        return None;
    };

    if let Some(baseline) = baseline_ns {
        estimate.subtract_baseline(baseline);
    }
    if !(estimate.ns_per_iter.is_finite() && estimate.ns_per_iter > 0.0) {
        tracing::warn!(
            case = %name,
            ns_per_iter = estimate.ns_per_iter,
            "measurement below resolution, no result reported"
        );
        return None;
    }

    let relative = if case.is_relative() {
        reference.map(|base| base / estimate.ns_per_iter * 100.0)
    } else {
        None
    };

    Some(CaseResult {
        name,
        ns_per_iter: estimate.ns_per_iter,
        iters_per_sec: estimate.iters_per_sec(),
        relative,
        estimate,
    })
}
