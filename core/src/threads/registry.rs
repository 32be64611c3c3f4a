//! Thread slots
//!
//! The boss is anchored by N threads. Each thread-break window severs one;
//! severing all of them unlocks the execution finisher. `broken_count` only
//! ever increases within an encounter lifetime.

use crate::events::EncounterSignal;

#[derive(Debug, Clone)]
pub struct Thread {
    pub index: usize,
    pub intact: bool,
}

#[derive(Debug)]
pub struct ThreadRegistry {
    threads: Vec<Thread>,
    broken_count: usize,
}

impl ThreadRegistry {
    pub fn new(total: usize) -> Self {
        Self {
            threads: (0..total)
                .map(|index| Thread {
                    index,
                    intact: true,
                })
                .collect(),
            broken_count: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.threads.len()
    }

    pub fn broken_count(&self) -> usize {
        self.broken_count
    }

    pub fn all_broken(&self) -> bool {
        self.broken_count == self.threads.len()
    }

    pub fn is_intact(&self, index: usize) -> bool {
        self.threads.get(index).is_some_and(|t| t.intact)
    }

    /// Lowest-index intact thread, the next QTE target
    pub fn first_intact(&self) -> Option<usize> {
        self.threads.iter().find(|t| t.intact).map(|t| t.index)
    }

    /// Sever a thread. Emits `ThreadBroken`, and `AllThreadsBroken` exactly
    /// once when the count reaches the total. Breaking an invalid or
    /// already-broken thread is a logged no-op.
    pub fn break_thread(&mut self, index: usize) -> Vec<EncounterSignal> {
        let Some(thread) = self.threads.get_mut(index) else {
            tracing::warn!(index, "break_thread: index out of range");
            return Vec::new();
        };
        if !thread.intact {
            tracing::warn!(index, "break_thread: thread already broken");
            return Vec::new();
        }

        thread.intact = false;
        self.broken_count += 1;

        let mut signals = vec![EncounterSignal::ThreadBroken { index }];
        if self.all_broken() {
            signals.push(EncounterSignal::AllThreadsBroken);
        }
        signals
    }
}
