//! Reusable multi-party rendezvous.

use parking_lot::{Condvar, Mutex};

#[derive(Debug)]
struct BarrierState {
    /// Parties that have arrived in the current generation.
    count: usize,
    generation: u64,
}

/// A reusable barrier for a fixed number of parties.
///
/// A generation completes once exactly `parties` calls to [`Barrier::wait`]
/// have been made. All waiters of that generation are then released together
/// and the barrier is immediately ready for the next one.
///
/// There is no timeout and no cancellation: a generation that never receives
/// its last arrival blocks its waiters forever.
///
/// # Example
/// ```
/// use setbench_core::Barrier;
///
/// let barrier = Barrier::new(1);
/// assert!(barrier.wait());
/// assert_eq!(barrier.generation(), 1);
/// ```
#[derive(Debug)]
pub struct Barrier {
    parties: usize,
    state: Mutex<BarrierState>,
    released: Condvar,
}

impl Barrier {
    /// Create a barrier for `parties` participants.
    ///
    /// # Panics
    ///
    /// Panics if `parties` is zero.
    #[must_use]
    pub fn new(parties: usize) -> Self {
        assert!(parties > 0, "a barrier needs at least one party");
        Self {
            parties,
            state: Mutex::new(BarrierState {
                count: 0,
                generation: 0,
            }),
            released: Condvar::new(),
        }
    }

    /// Number of parties required to complete a generation.
    pub fn parties(&self) -> usize {
        self.parties
    }

    /// Number of generations completed so far.
    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    /// Block until all parties of the current generation have arrived.
    ///
    /// Returns `true` for exactly one caller per generation: the last one to
    /// arrive, which performs the release.
    pub fn wait(&self) -> bool {
        let mut state = self.state.lock();
        let generation = state.generation;
        state.count += 1;

        if state.count == self.parties {
            state.count = 0;
            state.generation = state.generation.wrapping_add(1);
            drop(state);
            self.released.notify_all();
            return true;
        }

        // Spurious wakeups are filtered by the generation check.
        while state.generation == generation {
            self.released.wait(&mut state);
        }
        false
    }
}
