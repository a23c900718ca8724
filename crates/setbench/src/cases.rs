//! The settings-read benchmark cases.

use std::hint::black_box;
use std::sync::Arc;

use setbench_core::{parallel, BenchError, BenchmarkRegistry};
use setbench_settings::{
    CommandLine, LockFreeCell, Mutability, Setting, SettingCell, SettingMeta,
};

/// Project prefix of the benchmarked settings.
pub const PROJECT: &str = "setbench";

/// Default of the fixed-width setting.
pub const TRIVIAL_DEFAULT: i64 = 100;

/// Default of the heap-backed setting.
pub const NON_TRIVIAL_DEFAULT: &str = "default";

fn trivial_meta() -> SettingMeta {
    SettingMeta::new(PROJECT, "trivial")
        .mutability(Mutability::Mutable)
        .command_line(CommandLine::AcceptOverrides)
        .description("Fixed-width value read by the trivial cases")
}

/// Integer setting stored in an atomic cell; reads are a single load.
pub fn trivial_setting() -> Setting<i64, LockFreeCell<i64>> {
    Setting::lock_free(trivial_meta(), TRIVIAL_DEFAULT)
}

/// Integer setting stored behind a reader-writer lock.
pub fn trivial_setting_locked() -> Setting<i64> {
    Setting::locked(trivial_meta(), TRIVIAL_DEFAULT)
}

/// String setting; every read clones the heap-allocated value.
pub fn non_trivial_setting() -> Setting<String> {
    Setting::locked(
        SettingMeta::new(PROJECT, "non_trivial")
            .mutability(Mutability::Mutable)
            .command_line(CommandLine::AcceptOverrides)
            .description("Heap-backed value read by the non-trivial cases"),
        NON_TRIVIAL_DEFAULT.to_string(),
    )
}

/// Register both single-threaded cases, then one parallel group per family.
pub fn register_cases<C>(
    registry: &mut BenchmarkRegistry,
    trivial: &Arc<Setting<i64, C>>,
    non_trivial: &Arc<Setting<String>>,
    thread_counts: &[usize],
) -> Result<(), BenchError>
where
    C: SettingCell<i64> + 'static,
{
    let setting = Arc::clone(trivial);
    registry.add("trivial_access", move |iters| {
        for _ in 0..iters {
            black_box(setting.get());
        }
    })?;

    let setting = Arc::clone(non_trivial);
    registry.add("non_trivial_access", move |iters| {
        for _ in 0..iters {
            black_box(setting.get());
        }
    })?;

    let setting = Arc::clone(trivial);
    register_parallel(
        registry,
        "trivial_access_parallel",
        thread_counts,
        move || setting.get(),
    )?;

    let setting = Arc::clone(non_trivial);
    register_parallel(
        registry,
        "non_trivial_access_parallel",
        thread_counts,
        move || setting.get(),
    )?;
    Ok(())
}

/// Register `name(Nthr)` for each thread count, preceded by a separator.
///
/// Each worker performs all `iters` reads, so the reported time per
/// iteration is the wall time of one read when `N` threads read at once.
pub fn register_parallel<R, F>(
    registry: &mut BenchmarkRegistry,
    name: &str,
    thread_counts: &[usize],
    read: F,
) -> Result<(), BenchError>
where
    F: Fn() -> R + Clone + Send + Sync + 'static,
{
    registry.draw_line();
    for &threads in thread_counts {
        let value = u64::try_from(threads)
            .map_err(|_| BenchError::InvalidOption(format!("thread count {threads}")))?;
        let read = read.clone();
        registry.add_param(name, &format!("{threads}thr"), value, move |iters, _| {
            parallel(threads, || {
                for _ in 0..iters {
                    black_box(read());
                }
            });
        })?;
    }
    Ok(())
}
