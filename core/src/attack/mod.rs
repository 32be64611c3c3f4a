//! Attack pipeline
//!
//! This module provides:
//! - **ProjectilePool**: Reusable shells keyed by spec id, grow-on-demand
//! - **Projectile**: A live hazard with the parry/reflection contract
//! - **Pattern helpers**: Catalog selection and spread-fan geometry

mod pattern;
mod pool;
mod projectile;


pub use pattern::{fan_directions, select_pattern};
pub use pool::ProjectilePool;
pub use projectile::Projectile;
