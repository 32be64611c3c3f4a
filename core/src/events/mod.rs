//! Encounter signal system
//!
//! This module provides:
//! - **EncounterSignal**: Broadcast events (health, thresholds, threads, QTE,
//!   state changes, projectile contract)
//! - **SignalHandler**: Trait collaborators implement to subscribe

mod handler;
mod signal;

pub use handler::SignalHandler;
pub use signal::EncounterSignal;
