//! Encounter aggregate root
//!
//! `Encounter` wires the health tracker, thread registry, QTE gate, state
//! machine, scheduler, and projectile pipeline together and exposes the
//! narrow surface outer layers are allowed to touch: `tick`, `on_damaged`,
//! `try_start_execution`, the QTE input, and the parry boundary.
//!
//! Concurrency contract: everything here runs on the tick thread. Damage
//! application is synchronous, but the `Defeated` notification is deferred —
//! `on_damaged` may latch death, and the next `tick` observes it, enters
//! `Death`, and only then dispatches the signal. Death side effects never
//! run while a damage-causing callback is still on the stack.

mod summary;

#[cfg(test)]
mod encounter_tests;

pub use summary::{EncounterOutcome, EncounterSummary};

use glam::Vec2;
use hashbrown::HashMap;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::attack::{Projectile, ProjectilePool, fan_directions, select_pattern};
use crate::config::{AttackPattern, EncounterConfig, EncounterFile, ProjectileSpec};
use crate::events::{EncounterSignal, SignalHandler};
use crate::health::HealthTracker;
use crate::machine::{BossState, BossStateMachine, StateKind};
use crate::scheduler::{ScheduledAction, Scheduler};
use crate::threads::{QteGate, QteOutcome, ThreadRegistry};

/// Player reference for aiming, collision, and the execution range check.
/// Updated by the surrounding combat layer; its absence degrades aiming to
/// fixed directions and makes execution unreachable.
#[derive(Debug, Clone, Copy)]
pub struct PlayerTarget {
    pub position: Vec2,
    pub radius: f32,
}

pub struct Encounter {
    config: EncounterConfig,
    catalog: Vec<AttackPattern>,
    specs: HashMap<String, ProjectileSpec>,

    health: HealthTracker,
    threads: ThreadRegistry,
    qte: QteGate,
    machine: BossStateMachine,
    scheduler: Scheduler,
    pool: ProjectilePool,
    projectiles: Vec<Projectile>,

    rng: SmallRng,
    boss_position: Vec2,
    player: Option<PlayerTarget>,
    enraged: bool,
    clock: f32,
    started: bool,
    concluded: bool,

    queued: Vec<EncounterSignal>,
    handlers: Vec<Box<dyn SignalHandler>>,
    summary: EncounterSummary,
}

impl Encounter {
    /// Build an encounter from a validated definition. The pool is injected
    /// so a host can share or pre-warm it; `seed` makes pattern selection
    /// and idle dwell deterministic for replays and tests.
    pub fn new(file: EncounterFile, pool: ProjectilePool, seed: u64) -> Self {
        let EncounterFile {
            encounter: config,
            projectiles,
            patterns,
        } = file;

        let specs: HashMap<String, ProjectileSpec> = projectiles
            .into_iter()
            .map(|spec| (spec.id.clone(), spec))
            .collect();

        let (health, initial_signals) =
            HealthTracker::new(config.max_health, config.thresholds.clone());
        let threads = ThreadRegistry::new(config.thread_count);

        let mut encounter = Self {
            catalog: patterns,
            specs,
            health,
            threads,
            qte: QteGate::new(),
            machine: BossStateMachine::new(),
            scheduler: Scheduler::new(),
            pool,
            projectiles: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
            boss_position: Vec2::ZERO,
            player: None,
            enraged: false,
            clock: 0.0,
            started: false,
            concluded: false,
            queued: initial_signals,
            handlers: Vec::new(),
            summary: EncounterSummary::default(),
            config,
        };

        // First idle dwell
        let dwell = encounter.roll_dwell();
        *encounter.machine.state_mut() = BossState::Idle { remaining: dwell };
        encounter
    }

    // ─── External surface ────────────────────────────────────────────────

    pub fn add_handler(&mut self, handler: Box<dyn SignalHandler>) {
        self.handlers.push(handler);
    }

    pub fn set_player(&mut self, player: Option<PlayerTarget>) {
        self.player = player;
    }

    pub fn set_boss_position(&mut self, position: Vec2) {
        self.boss_position = position;
    }

    pub fn boss_position(&self) -> Vec2 {
        self.boss_position
    }

    pub fn current_health_percent(&self) -> f32 {
        self.health.percent()
    }

    pub fn state_kind(&self) -> StateKind {
        self.machine.kind()
    }

    pub fn is_enraged(&self) -> bool {
        self.enraged
    }

    pub fn is_concluded(&self) -> bool {
        self.concluded
    }

    pub fn summary(&self) -> &EncounterSummary {
        &self.summary
    }

    pub fn threads_broken(&self) -> (usize, usize) {
        (self.threads.broken_count(), self.threads.total())
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Qualifying player input for the live thread-break QTE, if any.
    pub fn notify_qte_input(&mut self) {
        self.qte.notify_input();
    }

    /// All threads severed and the boss is still standing: the execution
    /// finisher may be triggered.
    pub fn is_ready_for_execution(&self) -> bool {
        self.threads.all_broken()
            && !self.health.is_dead()
            && !matches!(self.machine.kind(), StateKind::Execution | StateKind::Death)
    }

    /// External execution trigger (player pressed execute). Requires all
    /// threads broken and the player inside execution range; otherwise
    /// nothing happens.
    pub fn try_start_execution(&mut self) -> bool {
        if !self.is_ready_for_execution() {
            return false;
        }
        let Some(player) = self.player else {
            return false;
        };
        if player.position.distance(self.boss_position) > self.config.execution_range {
            return false;
        }
        self.enter_state(BossState::Execution {
            elapsed: 0.0,
            kill_applied: false,
        });
        true
    }

    /// Incoming damage from the player-combat layer.
    ///
    /// Forwards to the health tracker, enters `ThreadBreak` on a threshold
    /// crossing, otherwise stuns when the hit actually landed and the
    /// current state allows the interrupt. Death is only latched here; the
    /// `Defeated` signal and the `Death` transition happen on the next tick.
    pub fn on_damaged(&mut self, amount: f32) {
        if self.concluded {
            return;
        }

        let signals = self.health.take_damage(amount);
        let landed = !signals.is_empty();
        let crossed = signals
            .iter()
            .any(|s| matches!(s, EncounterSignal::ThresholdCrossed { .. }));
        self.queued.extend(signals);

        if crossed {
            self.enter_thread_break();
        } else if landed && !self.health.is_dead() && self.machine.kind().allows_stun_interrupt() {
            self.enter_state(BossState::Stunned {
                remaining: self.config.stun_secs,
            });
        }
    }

    /// Parry boundary: reflect a live projectile toward the boss. Returns
    /// false when the projectile is unknown or cannot be parried (wrong
    /// spec, already reflected).
    pub fn reflect_projectile(&mut self, projectile_id: u64, new_direction: Vec2) -> bool {
        let Some(projectile) = self
            .projectiles
            .iter_mut()
            .find(|p| p.id == projectile_id)
        else {
            tracing::warn!(projectile_id, "reflect: no such live projectile");
            return false;
        };
        if !projectile.reflect(new_direction) {
            return false;
        }
        self.queued
            .push(EncounterSignal::ProjectileReflected { projectile_id });
        true
    }

    // ─── Tick ────────────────────────────────────────────────────────────

    /// Advance the encounter by `dt` seconds. Order within one tick:
    /// deferred-death pickup, state machine, due scheduled tasks, projectile
    /// flight and collision, enrage check, signal dispatch.
    pub fn tick(&mut self, dt: f32) {
        if self.concluded {
            return;
        }
        if !self.started {
            self.started = true;
            for handler in &mut self.handlers {
                handler.on_encounter_start();
            }
        }
        self.clock += dt;

        if self.health.take_pending_defeat() {
            self.queued.push(EncounterSignal::Defeated);
            self.enter_state(BossState::Death { elapsed: 0.0 });
        }

        self.update_state(dt);
        self.run_due_tasks();
        self.advance_projectiles(dt);
        self.check_enrage();
        self.dispatch();
    }

    fn update_state(&mut self, dt: f32) {
        match self.machine.kind() {
            StateKind::Idle => {
                let expired = {
                    if let BossState::Idle { remaining } = self.machine.state_mut() {
                        *remaining -= dt;
                        *remaining <= 0.0
                    } else {
                        false
                    }
                };
                if expired {
                    self.idle_timer_expired();
                }
            }
            StateKind::Attacking => self.process_attacking(),
            StateKind::Stunned => {
                let expired = {
                    if let BossState::Stunned { remaining } = self.machine.state_mut() {
                        *remaining -= dt;
                        *remaining <= 0.0
                    } else {
                        false
                    }
                };
                if expired {
                    let dwell = self.roll_dwell();
                    self.enter_state(BossState::Idle { remaining: dwell });
                }
            }
            StateKind::ThreadBreak => {
                if let Some(outcome) = self.qte.update(self.clock) {
                    self.resolve_qte(outcome);
                }
            }
            StateKind::Execution => {
                let midpoint = self.config.execution_secs * 0.5;
                let kill_now = {
                    if let BossState::Execution {
                        elapsed,
                        kill_applied,
                    } = self.machine.state_mut()
                    {
                        *elapsed += dt;
                        if *elapsed >= midpoint && !*kill_applied {
                            *kill_applied = true;
                            true
                        } else {
                            false
                        }
                    } else {
                        false
                    }
                };
                if kill_now {
                    let signals = self.health.execution_kill();
                    self.queued.extend(signals);
                }
                // Death is reached via the deferred defeated notification,
                // not by this state's own timer.
            }
            StateKind::Death => {
                let linger_over = {
                    if let BossState::Death { elapsed } = self.machine.state_mut() {
                        *elapsed += dt;
                        *elapsed >= self.config.death_linger_secs
                    } else {
                        false
                    }
                };
                if linger_over {
                    self.conclude();
                }
            }
        }
    }

    /// Idle dwell ran out. All-broken suppresses attacks (the boss waits for
    /// execution); an invulnerable boss with intact threads re-offers the
    /// thread-break window instead of attacking, which is how a failed QTE
    /// gets its retry.
    fn idle_timer_expired(&mut self) {
        if self.health.is_dead() {
            return;
        }
        if self.threads.all_broken() {
            self.reset_idle_dwell();
            return;
        }
        if self.health.is_invulnerable() && self.threads.first_intact().is_some() {
            self.enter_thread_break();
            return;
        }
        match select_pattern(&self.catalog, &mut self.rng) {
            Some(pattern_index) => {
                self.enter_state(BossState::Attacking {
                    pattern_index,
                    fired: false,
                });
                // Attacking fires and returns to Idle within the same tick
                self.process_attacking();
            }
            None => self.reset_idle_dwell(),
        }
    }

    /// Fire the selected pattern once, then drop back to Idle.
    fn process_attacking(&mut self) {
        let pending = {
            if let BossState::Attacking {
                pattern_index,
                fired,
            } = self.machine.state_mut()
            {
                (!*fired).then(|| {
                    *fired = true;
                    *pattern_index
                })
            } else {
                None
            }
        };
        if let Some(pattern_index) = pending {
            self.fire_pattern(pattern_index);
            let dwell = self.roll_dwell();
            self.enter_state(BossState::Idle { remaining: dwell });
        }
    }

    fn reset_idle_dwell(&mut self) {
        let dwell = self.roll_dwell();
        if let BossState::Idle { remaining } = self.machine.state_mut() {
            *remaining = dwell;
        }
    }

    fn roll_dwell(&mut self) -> f32 {
        let [min, max] = if self.enraged {
            self.config.enraged_dwell_secs
        } else {
            self.config.idle_dwell_secs
        };
        if min >= max {
            // Degenerate bounds (validation rejects inverted ones, but a
            // hand-built definition may carry them); never an empty range
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    // ─── Transitions ─────────────────────────────────────────────────────

    /// Change state and run enter side effects. Same-kind requests and
    /// anything out of `Death` are no-ops inside the machine.
    fn enter_state(&mut self, new: BossState) {
        let Some(transition) = self.machine.change_state(new) else {
            return;
        };
        self.queued.push(EncounterSignal::StateChanged {
            from: transition.from,
            to: transition.to,
        });

        if transition.to == StateKind::Death {
            // Nothing queued may fire after death
            self.scheduler.cancel_all();
            self.qte.cancel();
        }
    }

    fn enter_thread_break(&mut self) {
        let Some(thread_index) = self.threads.first_intact() else {
            return;
        };
        let before = self.machine.kind();
        self.enter_state(BossState::ThreadBreak { thread_index });
        if self.machine.kind() == StateKind::ThreadBreak
            && before != StateKind::ThreadBreak
            && self.qte.start(
                &self.threads,
                thread_index,
                self.clock,
                self.config.qte_window_secs,
            )
        {
            self.queued
                .push(EncounterSignal::QteStarted { thread_index });
        }
    }

    fn resolve_qte(&mut self, outcome: QteOutcome) {
        match outcome {
            QteOutcome::Success { thread_index } => {
                self.queued
                    .push(EncounterSignal::QteSucceeded { thread_index });
                let signals = self.threads.break_thread(thread_index);
                self.queued.extend(signals);
                if self.threads.all_broken() {
                    // Permanently invulnerable until the execution kill
                    self.health.on_all_threads_broken();
                } else {
                    // Combat resumes
                    self.health.set_invulnerable(false);
                }
            }
            QteOutcome::Failure { thread_index } => {
                // Invulnerability holds; the idle loop re-offers the window
                self.queued
                    .push(EncounterSignal::QteFailed { thread_index });
            }
        }
        let dwell = self.roll_dwell();
        self.enter_state(BossState::Idle { remaining: dwell });
    }

    // ─── Attacks and projectiles ─────────────────────────────────────────

    fn fire_pattern(&mut self, pattern_index: usize) {
        if self.health.is_dead() {
            return;
        }
        let Some(pattern) = self.catalog.get(pattern_index).cloned() else {
            tracing::warn!(pattern_index, "fire_pattern: index out of catalog");
            return;
        };
        if !self.specs.contains_key(pattern.projectile.as_str()) {
            tracing::warn!(
                pattern = %pattern.id,
                projectile = %pattern.projectile,
                "fire_pattern: unknown projectile spec"
            );
            return;
        }

        let base = self.aim_direction(&pattern);
        let directions = fan_directions(base, pattern.count, pattern.spread_degrees);
        let origin = self.boss_position;

        for (i, direction) in directions.into_iter().enumerate() {
            let delay = i as f32 * pattern.stagger_secs;
            if delay <= 0.0 {
                self.spawn_projectile(&pattern.projectile, origin, direction);
            } else {
                self.scheduler.schedule(
                    self.clock,
                    delay,
                    ScheduledAction::SpawnProjectile {
                        spec_id: pattern.projectile.clone(),
                        origin,
                        direction,
                    },
                );
            }
        }
    }

    /// Toward the player when the pattern aims and a player reference
    /// exists; otherwise the pattern's fixed direction.
    fn aim_direction(&self, pattern: &AttackPattern) -> Vec2 {
        if pattern.aim_at_target
            && let Some(player) = self.player
            && let Some(direction) = (player.position - self.boss_position).try_normalize()
        {
            return direction;
        }
        pattern.fallback_direction()
    }

    /// Spawn one projectile now. Re-validates liveness: a boss that died
    /// between scheduling and firing spawns nothing.
    fn spawn_projectile(&mut self, spec_id: &str, origin: Vec2, direction: Vec2) {
        if self.health.is_dead() {
            return;
        }
        let Some(spec) = self.specs.get(spec_id) else {
            tracing::warn!(spec_id, "spawn: unknown projectile spec");
            return;
        };
        let projectile = self.pool.acquire(spec, origin, direction);
        self.projectiles.push(projectile);
    }

    fn run_due_tasks(&mut self) {
        for task in self.scheduler.drain_due(self.clock) {
            // A cancel that landed while this task was in flight wins
            if !self.scheduler.is_current(task.epoch) {
                continue;
            }
            match task.action {
                ScheduledAction::SpawnProjectile {
                    spec_id,
                    origin,
                    direction,
                } => self.spawn_projectile(&spec_id, origin, direction),
            }
        }
    }

    fn advance_projectiles(&mut self, dt: f32) {
        let mut reflected_damage = 0.0;
        let mut released = Vec::new();

        let mut i = 0;
        while i < self.projectiles.len() {
            let mut keep = self.projectiles[i].advance(dt);
            if keep {
                let projectile = &self.projectiles[i];
                if projectile.reflected {
                    if projectile.overlaps(self.boss_position, self.config.boss_radius) {
                        reflected_damage += projectile.reflect_damage;
                        keep = false;
                    }
                } else if let Some(player) = self.player
                    && projectile.overlaps(player.position, player.radius)
                {
                    self.queued.push(EncounterSignal::PlayerHit {
                        damage: projectile.damage,
                    });
                    keep = false;
                }
            }

            if keep {
                i += 1;
            } else {
                released.push(self.projectiles.swap_remove(i));
            }
        }
        self.pool.release_all(released);

        // Reflected hits go through the standard damage intake, so they can
        // stun, cross thresholds, and kill like any player hit.
        if reflected_damage > 0.0 {
            self.on_damaged(reflected_damage);
        }
    }

    fn check_enrage(&mut self) {
        if self.enraged || self.config.enrage_threshold <= 0.0 || self.health.is_dead() {
            return;
        }
        if self.health.percent() <= self.config.enrage_threshold {
            self.enraged = true;
            self.queued.push(EncounterSignal::Enraged);
        }
    }

    // ─── Conclusion and dispatch ─────────────────────────────────────────

    fn conclude(&mut self) {
        if self.concluded {
            return;
        }
        self.concluded = true;
        self.summary.duration_secs = self.clock;

        // Forced mass reclaim: the pool gets every live shell back
        let live: Vec<Projectile> = self.projectiles.drain(..).collect();
        self.pool.release_all(live);

        self.dispatch();
        for handler in &mut self.handlers {
            handler.on_encounter_end();
        }
    }

    fn dispatch(&mut self) {
        if self.queued.is_empty() {
            return;
        }
        let batch = std::mem::take(&mut self.queued);
        for signal in &batch {
            self.summary.record(signal);
        }
        for handler in &mut self.handlers {
            handler.handle_signals(&batch);
        }
    }
}
