//! Encounter configuration
//!
//! This module provides:
//! - **EncounterConfig**: Static tuning loaded from TOML (health, thresholds,
//!   thread count, timers)
//! - **ProjectileSpec / AttackPattern**: The attack catalog an encounter fires
//! - **Loader**: TOML file/directory loading with validation

mod definition;
mod error;
mod loader;

pub use definition::*;
pub use error::ConfigError;
pub use loader::{load_encounter_file, load_encounters_from_dir, validate};
