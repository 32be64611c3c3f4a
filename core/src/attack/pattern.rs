//! Attack selection and fan geometry

use glam::Vec2;
use rand::Rng;

use crate::config::AttackPattern;

/// Uniform-random pick from the catalog. `None` on an empty catalog; the
/// caller treats that as a no-op attack.
pub fn select_pattern<R: Rng>(catalog: &[AttackPattern], rng: &mut R) -> Option<usize> {
    if catalog.is_empty() {
        return None;
    }
    Some(rng.gen_range(0..catalog.len()))
}

/// Directions for an n-shot fan: angles evenly distributed across
/// `spread_degrees`, centered on `base`. A single shot flies straight along
/// `base`.
pub fn fan_directions(base: Vec2, count: usize, spread_degrees: f32) -> Vec<Vec2> {
    let base = base.try_normalize().unwrap_or(Vec2::NEG_X);
    if count <= 1 {
        return vec![base];
    }

    let spread = spread_degrees.to_radians();
    let step = spread / (count - 1) as f32;
    let start = -spread / 2.0;

    (0..count)
        .map(|i| rotate(base, start + step * i as f32))
        .collect()
}

fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}
