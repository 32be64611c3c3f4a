//! Cooperative delayed-task queue
//!
//! Staggered projectile spawns are queued here instead of blocking: each
//! entry carries a due time and the scheduler epoch it was queued under.
//! `cancel_all` bumps the epoch, which invalidates every outstanding entry
//! at once — including entries already drained but not yet executed, because
//! the encounter re-checks `is_current` immediately before acting on one.
//! Single-threaded by design; the tick loop is the only driver.

use glam::Vec2;

/// Work a due task performs, kept as data so the encounter can resolve it
/// against its own state (and drop it if the boss died in the interim).
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduledAction {
    SpawnProjectile {
        spec_id: String,
        origin: Vec2,
        direction: Vec2,
    },
}

/// A drained task: the action plus the epoch it was queued under.
#[derive(Debug, Clone, PartialEq)]
pub struct DueTask {
    pub epoch: u64,
    pub action: ScheduledAction,
}

#[derive(Debug)]
struct Entry {
    due: f32,
    epoch: u64,
    action: ScheduledAction,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    epoch: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to run `delay` seconds after `now`.
    pub fn schedule(&mut self, now: f32, delay: f32, action: ScheduledAction) {
        self.entries.push(Entry {
            due: now + delay,
            epoch: self.epoch,
            action,
        });
    }

    /// Invalidate every outstanding task, queued or in flight.
    pub fn cancel_all(&mut self) {
        if !self.entries.is_empty() {
            tracing::debug!(count = self.entries.len(), "cancelling pending tasks");
        }
        self.epoch += 1;
        self.entries.clear();
    }

    /// Whether a drained task is still valid to execute.
    pub fn is_current(&self, epoch: u64) -> bool {
        epoch == self.epoch
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Remove and return every task due at `now`, earliest due time first.
    pub fn drain_due(&mut self, now: f32) -> Vec<DueTask> {
        let mut due: Vec<Entry> = Vec::new();
        let mut index = 0;
        while index < self.entries.len() {
            if self.entries[index].due <= now {
                due.push(self.entries.swap_remove(index));
            } else {
                index += 1;
            }
        }
        due.sort_by(|a, b| a.due.total_cmp(&b.due));
        due.into_iter()
            .map(|entry| DueTask {
                epoch: entry.epoch,
                action: entry.action,
            })
            .collect()
    }
}
