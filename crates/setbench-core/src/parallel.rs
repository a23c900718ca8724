//! Parallel execution driver.
//!
//! Fans a unit of work out across OS threads while attributing only the
//! concurrent execution window to the enclosing [`measure`](crate::measure).

use std::panic::{self, AssertUnwindSafe};
use std::thread;

use crate::barrier::Barrier;
use crate::suspender::Suspender;

/// Run `func` once on each of `thread_count` freshly spawned threads.
///
/// Spawning happens while timing is suspended. All workers and the calling
/// thread meet at a first barrier round; the calling thread then resumes
/// timing only for the second round, which completes when the last worker
/// has finished `func`. Joining happens suspended again. Every worker has
/// been joined when this returns.
///
/// A panic in `func` propagates to the calling thread once all workers
/// have been joined. Failing to spawn a worker aborts the process: the
/// workers already waiting at the first round could never be released.
pub fn parallel<F>(thread_count: usize, func: F)
where
    F: Fn() + Sync,
{
    let mut suspender = Suspender::new();
    if thread_count == 0 {
        return;
    }

    let barrier = Barrier::new(thread_count + 1);
    let barrier = &barrier;
    let func = &func;

    thread::scope(|scope| {
        for index in 0..thread_count {
            let spawned = thread::Builder::new()
                .name(format!("setbench-worker-{index}"))
                .spawn_scoped(scope, move || {
                    barrier.wait(); // A
                    let outcome = panic::catch_unwind(AssertUnwindSafe(func));
                    barrier.wait(); // B
                    if let Err(payload) = outcome {
                        panic::resume_unwind(payload);
                    }
                });
            if let Err(err) = spawned {
                tracing::error!(
                    thread_count,
                    index,
                    error = %err,
                    "failed to spawn benchmark worker"
                );
                std::process::abort();
            }
        }
        tracing::trace!(thread_count, "workers spawned");

        barrier.wait(); // A
        suspender.dismissing(|| {
            barrier.wait(); // B
        });
    });
}
