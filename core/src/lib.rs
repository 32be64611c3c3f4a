//! sever-core: the boss encounter orchestrator for Sever's boss-rush combat.
//!
//! The crate drives a single encounter from engagement to defeat: the boss
//! behavioral state machine, the health/threshold tracker, the thread-break
//! QTE gate that unlocks the execution finisher, the pooled projectile
//! pipeline, and the parry/reflection contract with the player-combat layer.
//! Rendering, audio, scenes, saves, and UI live outside and subscribe to
//! [`events::EncounterSignal`]s.

pub mod attack;
pub mod config;
pub mod encounter;
pub mod events;
pub mod health;
pub mod machine;
pub mod scheduler;
pub mod serde_defaults;
pub mod threads;

// Re-exports for convenience
pub use attack::{Projectile, ProjectilePool};
pub use config::{
    AttackPattern, ConfigError, EncounterConfig, EncounterFile, ProjectileSpec,
    load_encounter_file, load_encounters_from_dir, validate,
};
pub use encounter::{Encounter, EncounterOutcome, EncounterSummary, PlayerTarget};
pub use events::{EncounterSignal, SignalHandler};
pub use health::HealthTracker;
pub use machine::{BossState, BossStateMachine, StateKind};
pub use threads::{QteGate, QteOutcome, ThreadRegistry};
