//! Boss behavioral states
//!
//! Exactly one `BossState` is active at a time. Variants carry their own
//! timers and latches; the encounter drives transitions and side effects.

/// Discriminant-only view of a state, for signals and transition checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    Idle,
    Attacking,
    Stunned,
    ThreadBreak,
    Execution,
    Death,
}

/// Active behavioral state of the boss.
#[derive(Debug, Clone, PartialEq)]
pub enum BossState {
    /// Waiting out a random dwell before the next attack
    Idle { remaining: f32 },
    /// Fires the selected pattern once, then returns to Idle the same tick
    Attacking { pattern_index: usize, fired: bool },
    /// Hit-stun after an interrupting hit
    Stunned { remaining: f32 },
    /// A thread-break QTE is in flight; no other transition occurs until it
    /// resolves
    ThreadBreak { thread_index: usize },
    /// Execution cinematic; the guaranteed kill lands at the midpoint
    Execution { elapsed: f32, kill_applied: bool },
    /// Terminal. Stays visible for a fixed linger before the encounter
    /// concludes
    Death { elapsed: f32 },
}

impl BossState {
    pub fn kind(&self) -> StateKind {
        match self {
            Self::Idle { .. } => StateKind::Idle,
            Self::Attacking { .. } => StateKind::Attacking,
            Self::Stunned { .. } => StateKind::Stunned,
            Self::ThreadBreak { .. } => StateKind::ThreadBreak,
            Self::Execution { .. } => StateKind::Execution,
            Self::Death { .. } => StateKind::Death,
        }
    }
}

impl StateKind {
    /// Whether an incoming hit interrupts into Stunned from this state
    pub fn allows_stun_interrupt(self) -> bool {
        matches!(self, Self::Idle | Self::Attacking)
    }

    /// Terminal states never transition out
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Death)
    }
}
