//! Boss state machine
//!
//! This module provides:
//! - **BossState / StateKind**: The tagged behavioral states
//! - **BossStateMachine**: Holder enforcing the transition rules
//!
//! Transition side effects live on `Encounter`, which drives the machine
//! from its `tick`.

#[allow(clippy::module_inception)]
mod machine;
mod state;

pub use machine::{BossStateMachine, Transition};
pub use state::{BossState, StateKind};
