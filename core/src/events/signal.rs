//! Signals emitted by the encounter for cross-cutting concerns.
//!
//! These represent "interesting things that happened" at a higher level than
//! raw tick updates. HUD, audio, animation, and progression layers each
//! subscribe independently; zero listeners is valid.

use crate::machine::StateKind;

/// Signals emitted by an encounter during a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum EncounterSignal {
    // Health lifecycle
    HealthChanged {
        current: f32,
        max: f32,
    },
    HealthPercentChanged {
        percent: f32,
    },
    Damaged {
        amount: f32,
    },
    /// The boss is defeated. Delivered only at a tick boundary, never from
    /// inside damage application (see the encounter's deferred-death rule).
    Defeated,

    // Break thresholds and threads
    ThresholdCrossed {
        index: usize,
    },
    ThreadBroken {
        index: usize,
    },
    AllThreadsBroken,

    // Thread-break QTE
    QteStarted {
        thread_index: usize,
    },
    QteSucceeded {
        thread_index: usize,
    },
    QteFailed {
        thread_index: usize,
    },

    // State machine
    StateChanged {
        from: StateKind,
        to: StateKind,
    },
    Enraged,

    // Projectile contract with the player-combat layer
    /// An unreflected projectile reached the player; the player subsystem
    /// owns applying this damage to its own health.
    PlayerHit {
        damage: f32,
    },
    ProjectileReflected {
        projectile_id: u64,
    },
}
