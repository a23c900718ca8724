//! Report presenters.

use std::io::{self, Write};

use setbench_calibration::{ReportLine, SuiteReport};
use setbench_settings::SettingInfo;

use crate::output::{format_rate, format_relative, format_time, rule, table_line};

/// Renders a finished suite run.
pub trait ReportPresenter {
    fn present(&self, report: &SuiteReport, out: &mut dyn Write) -> io::Result<()>;
}

/// Fixed-width result table.
pub struct TablePresenter {
    title: String,
}

impl TablePresenter {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl ReportPresenter for TablePresenter {
    fn present(&self, report: &SuiteReport, out: &mut dyn Write) -> io::Result<()> {
        let heavy = rule('=');
        writeln!(out, "{heavy}")?;
        writeln!(
            out,
            "{}",
            table_line(&self.title, "relative", "time/iter", "iters/s")
        )?;
        writeln!(out, "{heavy}")?;

        for line in &report.lines {
            match line {
                ReportLine::Row(row) => writeln!(
                    out,
                    "{}",
                    table_line(
                        &row.name,
                        &format_relative(row.relative),
                        &format_time(row.ns_per_iter),
                        &format_rate(row.iters_per_sec),
                    )
                )?,
                ReportLine::Separator => writeln!(out, "{}", rule('-'))?,
            }
        }
        writeln!(out, "{heavy}")
    }
}

/// JSON array of measured rows, in order.
pub struct JsonPresenter;

impl ReportPresenter for JsonPresenter {
    fn present(&self, report: &SuiteReport, out: &mut dyn Write) -> io::Result<()> {
        let rows: Vec<_> = report.rows().collect();
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)
    }
}

/// List declared settings, one per line.
pub fn present_settings(settings: &[SettingInfo], out: &mut dyn Write) -> io::Result<()> {
    for s in settings {
        writeln!(
            out,
            "{} ({}) = {} [default {}, {:?}, {:?}] {}",
            s.full_name,
            s.type_name,
            s.current,
            s.default,
            s.mutability,
            s.command_line,
            s.description
        )?;
    }
    Ok(())
}
