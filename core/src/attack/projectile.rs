//! A single live projectile
//!
//! Armed from a `ProjectileSpec` when the pool hands it out, advanced by the
//! encounter tick, and reset when released back. Ownership of the value
//! moves between the pool (inert) and the encounter's active list (live),
//! so an instance can never be live twice.

use glam::Vec2;

use crate::config::ProjectileSpec;

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    /// Stable instance id, assigned once by the pool
    pub id: u64,
    /// Pool key: the spec id this shell was created for
    pub spec_id: String,
    pub position: Vec2,
    /// Unit travel direction
    pub direction: Vec2,
    pub speed: f32,
    pub lifetime_remaining: f32,
    pub damage: f32,
    pub reflect_damage: f32,
    pub reflect_speed_scale: f32,
    pub radius: f32,
    /// Spec-level parry permission
    pub parryable: bool,
    /// Reflected projectiles damage the boss, never the player
    pub reflected: bool,
    pub alive: bool,
}

impl Projectile {
    pub(super) fn inert(id: u64, spec_id: String) -> Self {
        Self {
            id,
            spec_id,
            position: Vec2::ZERO,
            direction: Vec2::X,
            speed: 0.0,
            lifetime_remaining: 0.0,
            damage: 0.0,
            reflect_damage: 0.0,
            reflect_speed_scale: 1.0,
            radius: 0.0,
            parryable: false,
            reflected: false,
            alive: false,
        }
    }

    /// Arm an inert shell for flight.
    pub fn arm(&mut self, spec: &ProjectileSpec, origin: Vec2, direction: Vec2) {
        self.position = origin;
        self.direction = direction.try_normalize().unwrap_or(Vec2::X);
        self.speed = spec.speed;
        self.lifetime_remaining = spec.lifetime_secs;
        self.damage = spec.damage;
        self.reflect_damage = spec.reflect_damage;
        self.reflect_speed_scale = spec.reflect_speed_scale;
        self.radius = spec.radius;
        self.parryable = spec.can_be_parried;
        self.reflected = false;
        self.alive = true;
    }

    /// Zero velocity and clear flags before the shell returns to the pool.
    pub fn reset(&mut self) {
        self.position = Vec2::ZERO;
        self.direction = Vec2::X;
        self.speed = 0.0;
        self.lifetime_remaining = 0.0;
        self.reflected = false;
        self.alive = false;
    }

    /// Advance flight; returns false when lifetime has run out.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.position += self.direction * self.speed * dt;
        self.lifetime_remaining -= dt;
        self.lifetime_remaining > 0.0
    }

    /// The parry/reflection contract: live, spec-parryable, and not already
    /// reflected.
    pub fn can_be_parried(&self) -> bool {
        self.alive && self.parryable && !self.reflected
    }

    /// Flip ownership toward the boss. Rejected (returns false) when the
    /// projectile is not currently parryable; a projectile cannot be
    /// reflected a second time.
    pub fn reflect(&mut self, new_direction: Vec2) -> bool {
        if !self.can_be_parried() {
            return false;
        }
        self.reflected = true;
        self.direction = new_direction.try_normalize().unwrap_or(-self.direction);
        self.speed *= self.reflect_speed_scale;
        true
    }

    /// Circle-overlap test against a target hurtbox.
    pub fn overlaps(&self, center: Vec2, radius: f32) -> bool {
        self.position.distance_squared(center) <= (self.radius + radius).powi(2)
    }
}
