//! Reusable projectile pool
//!
//! Shells are keyed by spec id and handed out by value: an acquired shell
//! lives in the encounter's active list until released, so the active and
//! available sets are disjoint by ownership. The pool grows on demand; past
//! the soft cap it keeps growing but logs a warning (exhaustion is never a
//! hard failure).

use hashbrown::HashMap;

use crate::config::ProjectileSpec;

use super::projectile::Projectile;

/// Growth past this many live shells per spec id is logged.
const DEFAULT_SOFT_CAP: usize = 64;

#[derive(Debug)]
pub struct ProjectilePool {
    available: HashMap<String, Vec<Projectile>>,
    /// Shells ever created, per spec id
    created: HashMap<String, usize>,
    soft_cap: usize,
    next_id: u64,
}

impl Default for ProjectilePool {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectilePool {
    pub fn new() -> Self {
        Self::with_soft_cap(DEFAULT_SOFT_CAP)
    }

    pub fn with_soft_cap(soft_cap: usize) -> Self {
        Self {
            available: HashMap::new(),
            created: HashMap::new(),
            soft_cap,
            next_id: 0,
        }
    }

    /// Hand out an armed projectile for `spec`, reusing an inert shell when
    /// one is available.
    pub fn acquire(
        &mut self,
        spec: &ProjectileSpec,
        origin: glam::Vec2,
        direction: glam::Vec2,
    ) -> Projectile {
        let mut shell = match self
            .available
            .get_mut(spec.id.as_str())
            .and_then(Vec::pop)
        {
            Some(shell) => shell,
            None => self.create_shell(&spec.id),
        };
        shell.arm(spec, origin, direction);
        shell
    }

    fn create_shell(&mut self, spec_id: &str) -> Projectile {
        let count = self.created.entry(spec_id.to_string()).or_insert(0);
        *count += 1;
        if *count > self.soft_cap {
            tracing::warn!(
                spec_id,
                created = *count,
                soft_cap = self.soft_cap,
                "projectile pool exhausted, growing on demand"
            );
        }
        let id = self.next_id;
        self.next_id += 1;
        Projectile::inert(id, spec_id.to_string())
    }

    /// Return a shell to the pool. State is reset before it becomes
    /// available again.
    pub fn release(&mut self, mut projectile: Projectile) {
        projectile.reset();
        self.available
            .entry(projectile.spec_id.clone())
            .or_default()
            .push(projectile);
    }

    /// Force-reclaim a whole active list (encounter teardown).
    pub fn release_all(&mut self, projectiles: impl IntoIterator<Item = Projectile>) {
        for projectile in projectiles {
            self.release(projectile);
        }
    }

    pub fn available_count(&self, spec_id: &str) -> usize {
        self.available.get(spec_id).map_or(0, Vec::len)
    }

    pub fn created_count(&self, spec_id: &str) -> usize {
        self.created.get(spec_id).copied().unwrap_or(0)
    }
}
