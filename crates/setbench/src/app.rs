//! Application entry point and dispatch.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;

use setbench_calibration::{run_suite, RunOptions};
use setbench_cli::presenter::present_settings;
use setbench_cli::{JsonPresenter, ReportPresenter, TablePresenter};
use setbench_core::BenchmarkRegistry;
use setbench_settings::{Setting, SettingCell, SettingsRegistry};

use crate::cases;
use crate::config::AppConfig;

/// Title printed above the result table.
pub const REPORT_TITLE: &str = "setbench: settings read";

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    let opts = config.run_options()?;
    let thread_counts = config.thread_counts()?;

    let settings = SettingsRegistry::new();
    let non_trivial = settings.declare(cases::non_trivial_setting())?;
    if config.locked {
        let trivial = settings.declare(cases::trivial_setting_locked())?;
        run_with(config, &opts, thread_counts, &settings, &trivial, &non_trivial)
    } else {
        let trivial = settings.declare(cases::trivial_setting())?;
        run_with(config, &opts, thread_counts, &settings, &trivial, &non_trivial)
    }
}

fn run_with<C>(
    config: &AppConfig,
    opts: &RunOptions,
    thread_counts: &[usize],
    settings: &SettingsRegistry,
    trivial: &Arc<Setting<i64, C>>,
    non_trivial: &Arc<Setting<String>>,
) -> Result<()>
where
    C: SettingCell<i64> + 'static,
{
    let applied = settings.init(config.settings.as_slice())?;
    tracing::debug!(applied, locked = config.locked, "settings initialized");

    let mut out = io::stdout().lock();
    if config.list_settings {
        present_settings(&settings.list(), &mut out)?;
        return Ok(());
    }

    let mut registry = BenchmarkRegistry::new();
    cases::register_cases(&mut registry, trivial, non_trivial, thread_counts)?;
    let report = run_suite(&registry, opts)?;

    let presenter: Box<dyn ReportPresenter> = if config.json {
        Box::new(JsonPresenter)
    } else {
        Box::new(TablePresenter::new(REPORT_TITLE))
    };
    presenter.present(&report, &mut out)?;
    out.flush()?;
    Ok(())
}
