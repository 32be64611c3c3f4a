//! Common serde default value functions
//!
//! Used across encounter, projectile, and pattern definitions to avoid
//! duplication.

/// Default for enabled/flag fields
pub fn default_true() -> bool {
    true
}

pub fn default_thread_count() -> usize {
    3
}

pub fn default_idle_dwell() -> [f32; 2] {
    [0.5, 1.5]
}

pub fn default_enraged_dwell() -> [f32; 2] {
    [0.25, 0.75]
}

pub fn default_stun_secs() -> f32 {
    0.6
}

pub fn default_qte_window() -> f32 {
    2.0
}

pub fn default_execution_range() -> f32 {
    2.5
}

pub fn default_execution_secs() -> f32 {
    3.0
}

pub fn default_death_linger() -> f32 {
    4.0
}

pub fn default_boss_radius() -> f32 {
    1.0
}

pub fn default_projectile_lifetime() -> f32 {
    6.0
}

pub fn default_reflect_speed_scale() -> f32 {
    1.5
}

pub fn default_projectile_radius() -> f32 {
    0.25
}

pub fn default_pattern_count() -> usize {
    1
}

/// Default fan direction when a pattern neither aims nor sets one (toward -X,
/// the conventional player approach side)
pub fn default_fixed_direction() -> [f32; 2] {
    [-1.0, 0.0]
}
