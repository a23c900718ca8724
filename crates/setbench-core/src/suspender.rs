//! Timing exclusion for the measuring thread.
//!
//! [`measure`] times a closure on the current thread. While a [`Suspender`]
//! is alive on that thread, elapsed wall-clock time is recorded as excluded
//! and subtracted from the measurement. [`Suspender::dismissing`] lifts the
//! exclusion for the duration of a single action.

use std::cell::Cell;
use std::marker::PhantomData;
use std::time::{Duration, Instant};

thread_local! {
    /// Time excluded from the measurement currently running on this thread.
    static EXCLUDED: Cell<Duration> = const { Cell::new(Duration::ZERO) };
    /// Whether timing is currently suspended on this thread.
    static SUSPENDED: Cell<bool> = const { Cell::new(false) };
}

/// Run `f` and return its wall-clock duration minus any suspended time.
///
/// Measurements nest: an inner `measure` does not leak its exclusions into
/// the enclosing one.
pub fn measure<F: FnOnce()>(f: F) -> Duration {
    /// Puts the enclosing measurement's exclusions back, also on unwind.
    struct RestoreOuter(Duration);

    impl Drop for RestoreOuter {
        fn drop(&mut self) {
            let outer = self.0;
            EXCLUDED.with(|e| e.set(outer));
        }
    }

    let restore = RestoreOuter(EXCLUDED.with(|e| e.replace(Duration::ZERO)));
    let start = Instant::now();
    f();
    let elapsed = start.elapsed();
    let excluded = EXCLUDED.with(Cell::get);
    drop(restore);
    elapsed.saturating_sub(excluded)
}

/// Scoped guard that stops the measurement clock of the current thread.
///
/// Timing is suspended on construction and resumes when the guard is
/// dropped, including during unwinding. Only one suspender may be active per
/// thread at a time; violating that panics instead of skewing results.
///
/// The guard is tied to the thread that created it and is therefore `!Send`.
#[derive(Debug)]
pub struct Suspender {
    started: Option<Instant>,
    _thread_bound: PhantomData<*const ()>,
}

impl Suspender {
    /// Suspend timing on the current thread.
    ///
    /// # Panics
    ///
    /// Panics if timing is already suspended on this thread.
    #[must_use = "timing resumes as soon as the suspender is dropped"]
    pub fn new() -> Self {
        let mut suspender = Self {
            started: None,
            _thread_bound: PhantomData,
        };
        suspender.rehire();
        suspender
    }

    /// Whether this suspender is currently excluding time.
    pub fn is_active(&self) -> bool {
        self.started.is_some()
    }

    /// Resume timing without dropping the guard.
    ///
    /// # Panics
    ///
    /// Panics if the suspender is already dismissed.
    pub fn dismiss(&mut self) {
        let Some(started) = self.started.take() else {
            panic!("suspender dismissed twice");
        };
        let spent = started.elapsed();
        EXCLUDED.with(|e| e.set(e.get() + spent));
        SUSPENDED.with(|s| s.set(false));
    }

    /// Suspend timing again after [`dismiss`](Self::dismiss).
    ///
    /// # Panics
    ///
    /// Panics if this suspender or another one on the same thread is
    /// already active.
    pub fn rehire(&mut self) {
        assert!(self.started.is_none(), "suspender rehired while active");
        SUSPENDED.with(|s| {
            assert!(!s.get(), "timing is already suspended on this thread");
            s.set(true);
        });
        self.started = Some(Instant::now());
    }

    /// Run `action` with timing resumed, then suspend again.
    ///
    /// The suspension is re-established on every exit path, including when
    /// `action` panics.
    pub fn dismissing<R, F: FnOnce() -> R>(&mut self, action: F) -> R {
        struct Rehire<'a>(&'a mut Suspender);

        impl Drop for Rehire<'_> {
            fn drop(&mut self) {
                self.0.rehire();
            }
        }

        self.dismiss();
        let _rehire = Rehire(self);
        action()
    }
}

impl Default for Suspender {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Suspender {
    fn drop(&mut self) {
        if self.is_active() {
            self.dismiss();
        }
    }
}
