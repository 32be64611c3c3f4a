//! Boss health, break thresholds, and the death latch
//!
//! The tracker owns current/max health, the invulnerability flag, and a
//! monotonic pointer into the descending threshold list. Mutating operations
//! return the signals they produced, in the order they occurred.
//!
//! Death is latched, and its `Defeated` notification is *deferred*: `die`
//! only raises a pending flag that the encounter drains at the next tick
//! boundary. Nothing here ever delivers death side effects while a damage
//! call is still on the stack.

use crate::events::EncounterSignal;

/// Overkill factor used by `execution_kill`. Anything >= max health bypasses
/// invulnerability, so this lands regardless of rounding.
const EXECUTION_OVERKILL: f32 = 10.0;

#[derive(Debug)]
pub struct HealthTracker {
    current: f32,
    max: f32,
    /// Descending break percentages, e.g. [75, 50, 25]
    thresholds: Vec<f32>,
    /// Monotonic pointer to the next unfired threshold
    next_threshold: usize,
    invulnerable: bool,
    dead: bool,
    /// Guards against duplicate death notification
    death_latched: bool,
    /// Set by `die`, drained by the encounter at a tick boundary
    pending_defeat: bool,
    /// Once all threads are severed, thresholds stop firing and
    /// invulnerability holds until the execution kill
    all_threads_broken: bool,
}

impl HealthTracker {
    pub fn new(max_health: f32, thresholds: Vec<f32>) -> (Self, Vec<EncounterSignal>) {
        let tracker = Self {
            current: max_health,
            max: max_health,
            thresholds,
            next_threshold: 0,
            invulnerable: false,
            dead: false,
            death_latched: false,
            pending_defeat: false,
            all_threads_broken: false,
        };
        let signals = vec![
            EncounterSignal::HealthChanged {
                current: max_health,
                max: max_health,
            },
            EncounterSignal::HealthPercentChanged { percent: 100.0 },
        ];
        (tracker, signals)
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn percent(&self) -> f32 {
        if self.max > 0.0 {
            (self.current / self.max) * 100.0
        } else {
            0.0
        }
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    pub fn next_threshold_index(&self) -> usize {
        self.next_threshold
    }

    /// Apply incoming damage.
    ///
    /// - No-op once dead.
    /// - Invulnerability blocks any hit smaller than max health; a single hit
    ///   of at least max health always lands (the execution-finisher
    ///   carve-out).
    /// - At most one threshold fires per call, even if the hit's percentage
    ///   delta spans several; the rest fire on subsequent hits.
    pub fn take_damage(&mut self, amount: f32) -> Vec<EncounterSignal> {
        if self.dead {
            return Vec::new();
        }
        if self.invulnerable && amount < self.max {
            tracing::debug!(amount, "hit absorbed while invulnerable");
            return Vec::new();
        }

        let prev_pct = self.percent();
        let prev_current = self.current;
        self.current = (self.current - amount).max(0.0);
        let curr_pct = self.percent();

        // Overkill is clamped: Damaged carries the health actually lost
        let mut signals = vec![
            EncounterSignal::HealthChanged {
                current: self.current,
                max: self.max,
            },
            EncounterSignal::HealthPercentChanged { percent: curr_pct },
            EncounterSignal::Damaged {
                amount: prev_current - self.current,
            },
        ];

        if !self.all_threads_broken
            && let Some(index) = self.check_threshold(prev_pct, curr_pct)
        {
            signals.push(EncounterSignal::ThresholdCrossed { index });
        }

        if self.current <= 0.0 {
            self.die();
        }

        signals
    }

    /// Check the *next* threshold only. Fires when the hit moved the health
    /// percentage from at-or-above the threshold to strictly below it.
    fn check_threshold(&mut self, prev_pct: f32, curr_pct: f32) -> Option<usize> {
        let threshold = *self.thresholds.get(self.next_threshold)?;
        if prev_pct >= threshold && threshold > curr_pct {
            let index = self.next_threshold;
            self.next_threshold += 1;
            self.invulnerable = true;
            tracing::debug!(index, threshold, "break threshold crossed");
            return Some(index);
        }
        None
    }

    /// Latch death. Idempotent: only the first call raises the deferred
    /// defeat flag.
    fn die(&mut self) {
        if self.death_latched {
            return;
        }
        self.death_latched = true;
        self.dead = true;
        self.current = 0.0;
        self.invulnerable = false;
        self.pending_defeat = true;
    }

    /// Drain the deferred defeat notification. Returns true exactly once per
    /// encounter lifetime.
    pub fn take_pending_defeat(&mut self) -> bool {
        std::mem::take(&mut self.pending_defeat)
    }

    /// Set invulnerability. Turning it *on* for a dead boss is rejected.
    pub fn set_invulnerable(&mut self, value: bool) {
        if value && self.dead {
            tracing::warn!("rejecting invulnerability on a dead boss");
            return;
        }
        self.invulnerable = value;
    }

    /// All threads severed: the boss stays invulnerable until the execution
    /// kill, and no further thresholds fire.
    pub fn on_all_threads_broken(&mut self) {
        self.all_threads_broken = true;
        self.set_invulnerable(true);
    }

    /// The execution finisher. Clears invulnerability and applies a massive
    /// overkill hit so the >= max-health bypass fires and death latches
    /// exactly once.
    pub fn execution_kill(&mut self) -> Vec<EncounterSignal> {
        self.invulnerable = false;
        self.take_damage(self.max * EXECUTION_OVERKILL)
    }
}
