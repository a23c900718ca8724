//! Number and table-line formatting.

use setbench_core::constants::REPORT_WIDTH;

/// Width of the name column; the three value columns take the rest.
pub const NAME_WIDTH: usize = REPORT_WIDTH - 33;

const TIME_UNITS: [(f64, &str); 6] = [
    (1e9, "s"),
    (1e6, "ms"),
    (1e3, "us"),
    (1.0, "ns"),
    (1e-3, "ps"),
    (1e-6, "fs"),
];

const RATE_UNITS: [(f64, &str); 5] = [(1e12, "T"), (1e9, "G"), (1e6, "M"), (1e3, "K"), (1.0, "")];

/// Format a duration given in nanoseconds, e.g. `1.01ns` or `380.90fs`.
#[must_use]
pub fn format_time(ns: f64) -> String {
    if !ns.is_finite() {
        return format!("{ns}");
    }
    let (scale, unit) = TIME_UNITS
        .iter()
        .copied()
        .find(|(scale, _)| ns.abs() >= *scale)
        .unwrap_or(TIME_UNITS[TIME_UNITS.len() - 1]);
    format!("{:.2}{unit}", ns / scale)
}

/// Format a rate with a metric suffix, e.g. `987.97M`.
#[must_use]
pub fn format_rate(per_sec: f64) -> String {
    if !per_sec.is_finite() {
        return format!("{per_sec}");
    }
    let (scale, unit) = RATE_UNITS
        .iter()
        .copied()
        .find(|(scale, _)| per_sec.abs() >= *scale)
        .unwrap_or(RATE_UNITS[RATE_UNITS.len() - 1]);
    format!("{:.2}{unit}", per_sec / scale)
}

/// Format a relative speed as a percentage, empty when absent.
#[must_use]
pub fn format_relative(relative: Option<f64>) -> String {
    relative.map_or_else(String::new, |pct| format!("{pct:.2}%"))
}

/// A full-width rule drawn with `ch`.
#[must_use]
pub fn rule(ch: char) -> String {
    ch.to_string().repeat(REPORT_WIDTH)
}

/// Lay out one table line.
#[must_use]
pub fn table_line(name: &str, relative: &str, time: &str, rate: &str) -> String {
    format!(
        "{name:<width$}{relative:>9}{time:>12}{rate:>12}",
        width = NAME_WIDTH
    )
}
