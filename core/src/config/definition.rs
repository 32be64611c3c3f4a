//! Encounter definition types
//!
//! Definitions are loaded from TOML config files and describe a single boss
//! encounter: health, break thresholds, thread count, the attack catalog and
//! the projectile specs it references, plus all tuning timers (stun, QTE
//! window, execution, death linger).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::serde_defaults;

// ═══════════════════════════════════════════════════════════════════════════
// Root Config Structure
// ═══════════════════════════════════════════════════════════════════════════

/// Root structure for encounter config files (TOML).
/// A file contains exactly one `[encounter]` block plus its projectile and
/// pattern tables:
///
/// ```toml
/// [encounter]
/// id = "weaver"
/// max_health = 1000.0
/// thresholds = [75.0, 50.0, 25.0]
/// thread_count = 3
///
/// [[projectile]]
/// id = "needle"
/// speed = 8.0
///
/// [[pattern]]
/// id = "needle_fan"
/// projectile = "needle"
/// count = 3
/// spread_degrees = 30.0
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncounterFile {
    pub encounter: EncounterConfig,

    /// Projectile specs referenced by patterns
    #[serde(default, rename = "projectile")]
    pub projectiles: Vec<ProjectileSpec>,

    /// Attack catalog
    #[serde(default, rename = "pattern")]
    pub patterns: Vec<AttackPattern>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Encounter Tuning
// ═══════════════════════════════════════════════════════════════════════════

/// Static tuning for a boss encounter, consumed once at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterConfig {
    /// Unique identifier (e.g., "weaver")
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Maximum health, must be > 0
    pub max_health: f32,

    /// Break thresholds as descending health percentages (e.g., [75, 50, 25]).
    /// Crossing one opens a thread-break window.
    #[serde(default)]
    pub thresholds: Vec<f32>,

    /// Number of threads that must be severed before execution unlocks
    #[serde(default = "serde_defaults::default_thread_count")]
    pub thread_count: usize,

    /// Idle dwell between attacks, sampled uniformly from [min, max] seconds
    #[serde(default = "serde_defaults::default_idle_dwell")]
    pub idle_dwell_secs: [f32; 2],

    /// Idle dwell while enraged (shorter = faster attack cadence)
    #[serde(default = "serde_defaults::default_enraged_dwell")]
    pub enraged_dwell_secs: [f32; 2],

    /// Health percentage at or below which the boss enrages (0 disables)
    #[serde(default)]
    pub enrage_threshold: f32,

    /// Stun duration after an interrupting hit, seconds
    #[serde(default = "serde_defaults::default_stun_secs")]
    pub stun_secs: f32,

    /// Player input window for each thread-break QTE, seconds
    #[serde(default = "serde_defaults::default_qte_window")]
    pub qte_window_secs: f32,

    /// Maximum player distance at which execution may start
    #[serde(default = "serde_defaults::default_execution_range")]
    pub execution_range: f32,

    /// Execution cinematic duration; the kill lands at the midpoint
    #[serde(default = "serde_defaults::default_execution_secs")]
    pub execution_secs: f32,

    /// How long the Death state stays visible before the encounter concludes
    #[serde(default = "serde_defaults::default_death_linger")]
    pub death_linger_secs: f32,

    /// Boss hurtbox radius (reflected projectiles collide against this)
    #[serde(default = "serde_defaults::default_boss_radius")]
    pub boss_radius: f32,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            max_health: 100.0,
            thresholds: Vec::new(),
            thread_count: serde_defaults::default_thread_count(),
            idle_dwell_secs: serde_defaults::default_idle_dwell(),
            enraged_dwell_secs: serde_defaults::default_enraged_dwell(),
            enrage_threshold: 0.0,
            stun_secs: serde_defaults::default_stun_secs(),
            qte_window_secs: serde_defaults::default_qte_window(),
            execution_range: serde_defaults::default_execution_range(),
            execution_secs: serde_defaults::default_execution_secs(),
            death_linger_secs: serde_defaults::default_death_linger(),
            boss_radius: serde_defaults::default_boss_radius(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Projectile Spec
// ═══════════════════════════════════════════════════════════════════════════

/// Static description of one projectile kind. Instances are pooled by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileSpec {
    /// Unique identifier, also the pool key
    pub id: String,

    /// Travel speed, units per second
    pub speed: f32,

    /// Seconds before an unresolved projectile despawns
    #[serde(default = "serde_defaults::default_projectile_lifetime")]
    pub lifetime_secs: f32,

    /// Damage dealt to the player on contact
    pub damage: f32,

    /// Damage dealt to the boss when a reflected copy lands
    #[serde(default)]
    pub reflect_damage: f32,

    /// Speed multiplier applied on reflection
    #[serde(default = "serde_defaults::default_reflect_speed_scale")]
    pub reflect_speed_scale: f32,

    /// Collision radius
    #[serde(default = "serde_defaults::default_projectile_radius")]
    pub radius: f32,

    /// Whether the player's parry can reflect this projectile
    #[serde(default = "serde_defaults::default_true")]
    pub can_be_parried: bool,

    /// Opaque visual tag for the rendering layer; the core never inspects it
    #[serde(default)]
    pub visual: String,
}

// ═══════════════════════════════════════════════════════════════════════════
// Attack Pattern
// ═══════════════════════════════════════════════════════════════════════════

/// One entry of the attack catalog: a single shot or a staggered fan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackPattern {
    /// Unique identifier
    pub id: String,

    /// Projectile spec this pattern fires (by spec `id`)
    pub projectile: String,

    /// Number of projectiles, >= 1
    #[serde(default = "serde_defaults::default_pattern_count")]
    pub count: usize,

    /// Total fan width in degrees, centered on the aim direction
    #[serde(default)]
    pub spread_degrees: f32,

    /// Delay between consecutive projectiles of a fan, seconds (>= 0)
    #[serde(default)]
    pub stagger_secs: f32,

    /// Aim at the player's current position; falls back to `fixed_direction`
    /// when no player reference is available
    #[serde(default = "serde_defaults::default_true")]
    pub aim_at_target: bool,

    /// Direction used when not aiming (or when the player is absent)
    #[serde(default = "serde_defaults::default_fixed_direction")]
    pub fixed_direction: [f32; 2],
}

impl AttackPattern {
    /// Base aim direction when no target is available
    pub fn fallback_direction(&self) -> Vec2 {
        let v = Vec2::from_array(self.fixed_direction);
        v.try_normalize().unwrap_or(Vec2::NEG_X)
    }
}
