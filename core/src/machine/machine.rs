//! State machine holder
//!
//! `BossStateMachine` owns the current state and enforces the transition
//! rule: a request for the state already active is a no-op (no duplicate
//! enter/exit), and nothing leaves `Death`. Enter/exit *side effects* (firing
//! patterns, starting QTEs, cancelling scheduled tasks) belong to the
//! encounter, which acts on the returned transition.

use super::state::{BossState, StateKind};

/// A transition that actually happened, old kind then new kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: StateKind,
    pub to: StateKind,
}

#[derive(Debug)]
pub struct BossStateMachine {
    state: BossState,
}

impl Default for BossStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl BossStateMachine {
    pub fn new() -> Self {
        Self {
            // Initial dwell is assigned by the encounter on its first tick
            state: BossState::Idle { remaining: 0.0 },
        }
    }

    pub fn state(&self) -> &BossState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut BossState {
        &mut self.state
    }

    pub fn kind(&self) -> StateKind {
        self.state.kind()
    }

    /// Request a state change. Returns the transition if one occurred.
    ///
    /// Requesting the currently-active kind is a no-op, and `Death` is
    /// sticky: once entered, nothing transitions out.
    pub fn change_state(&mut self, new: BossState) -> Option<Transition> {
        let from = self.state.kind();
        let to = new.kind();

        if from == to {
            return None;
        }
        if from.is_terminal() {
            tracing::debug!(?from, ?to, "ignoring transition out of terminal state");
            return None;
        }

        tracing::debug!(?from, ?to, "boss state transition");
        self.state = new;
        Some(Transition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_kind_is_noop() {
        let mut machine = BossStateMachine::new();
        assert!(machine.change_state(BossState::Idle { remaining: 2.0 }).is_none());
        // The original state payload is untouched
        assert_eq!(*machine.state(), BossState::Idle { remaining: 0.0 });
    }

    #[test]
    fn transition_reports_from_and_to() {
        let mut machine = BossStateMachine::new();
        let t = machine
            .change_state(BossState::Stunned { remaining: 0.6 })
            .unwrap();
        assert_eq!(t.from, StateKind::Idle);
        assert_eq!(t.to, StateKind::Stunned);
    }

    #[test]
    fn death_is_sticky() {
        let mut machine = BossStateMachine::new();
        machine.change_state(BossState::Death { elapsed: 0.0 });
        assert!(machine.change_state(BossState::Idle { remaining: 1.0 }).is_none());
        assert_eq!(machine.kind(), StateKind::Death);
    }
}
