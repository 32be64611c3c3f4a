//! Scenario tests driving a full encounter through its tick loop

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec2;

use crate::attack::ProjectilePool;
use crate::config::{AttackPattern, EncounterConfig, EncounterFile, ProjectileSpec};
use crate::events::{EncounterSignal, SignalHandler};
use crate::machine::StateKind;

use super::{Encounter, EncounterOutcome, PlayerTarget};

/// Records everything the encounter broadcasts.
#[derive(Clone, Default)]
struct Recorder {
    signals: Rc<RefCell<Vec<EncounterSignal>>>,
    started: Rc<Cell<bool>>,
    ended: Rc<Cell<bool>>,
}

impl SignalHandler for Recorder {
    fn handle_signal(&mut self, signal: &EncounterSignal) {
        self.signals.borrow_mut().push(signal.clone());
    }

    fn on_encounter_start(&mut self) {
        self.started.set(true);
    }

    fn on_encounter_end(&mut self) {
        self.ended.set(true);
    }
}

impl Recorder {
    fn count(&self, pred: impl Fn(&EncounterSignal) -> bool) -> usize {
        self.signals.borrow().iter().filter(|s| pred(s)).count()
    }

    fn contains(&self, signal: &EncounterSignal) -> bool {
        self.signals.borrow().contains(signal)
    }
}

fn needle() -> ProjectileSpec {
    ProjectileSpec {
        id: "needle".into(),
        speed: 8.0,
        lifetime_secs: 2.0,
        damage: 10.0,
        reflect_damage: 15.0,
        reflect_speed_scale: 1.5,
        radius: 0.25,
        can_be_parried: true,
        visual: "thread_needle".into(),
    }
}

fn single_shot() -> AttackPattern {
    AttackPattern {
        id: "single".into(),
        projectile: "needle".into(),
        count: 1,
        spread_degrees: 0.0,
        stagger_secs: 0.0,
        aim_at_target: true,
        fixed_direction: [-1.0, 0.0],
    }
}

/// Deterministic tuning: fixed 0.5s idle dwell, 2s QTE window, 1s execution
/// and death linger.
fn fight_file() -> EncounterFile {
    EncounterFile {
        encounter: EncounterConfig {
            id: "weaver".into(),
            name: "The Weaver".into(),
            max_health: 100.0,
            thresholds: vec![75.0, 50.0, 25.0],
            thread_count: 3,
            idle_dwell_secs: [0.5, 0.5],
            enraged_dwell_secs: [0.2, 0.2],
            enrage_threshold: 0.0,
            stun_secs: 0.6,
            qte_window_secs: 2.0,
            execution_range: 2.5,
            execution_secs: 1.0,
            death_linger_secs: 1.0,
            boss_radius: 1.0,
        },
        projectiles: vec![needle()],
        patterns: vec![single_shot()],
    }
}

fn encounter_with_recorder(file: EncounterFile) -> (Encounter, Recorder) {
    let mut encounter = Encounter::new(file, ProjectilePool::new(), 42);
    let recorder = Recorder::default();
    encounter.add_handler(Box::new(recorder.clone()));
    (encounter, recorder)
}

#[test]
fn idle_dwell_expires_into_a_single_attack() {
    let (mut enc, rec) = encounter_with_recorder(fight_file());

    enc.tick(0.3);
    assert_eq!(enc.state_kind(), StateKind::Idle);
    assert!(enc.projectiles().is_empty());

    enc.tick(0.3);
    // Attacking fired and dropped back to Idle within the tick
    assert_eq!(enc.state_kind(), StateKind::Idle);
    assert_eq!(enc.projectiles().len(), 1);
    assert!(rec.contains(&EncounterSignal::StateChanged {
        from: StateKind::Idle,
        to: StateKind::Attacking,
    }));
    assert!(rec.contains(&EncounterSignal::StateChanged {
        from: StateKind::Attacking,
        to: StateKind::Idle,
    }));
    assert!(rec.started.get());
}

#[test]
fn empty_catalog_never_attacks() {
    let mut file = fight_file();
    file.patterns.clear();
    let (mut enc, _rec) = encounter_with_recorder(file);

    for _ in 0..20 {
        enc.tick(0.3);
    }
    assert_eq!(enc.state_kind(), StateKind::Idle);
    assert!(enc.projectiles().is_empty());
}

#[test]
fn landing_hit_stuns_then_recovers() {
    let mut file = fight_file();
    file.encounter.thresholds.clear();
    let (mut enc, rec) = encounter_with_recorder(file);

    enc.tick(0.1);
    enc.on_damaged(10.0);
    assert_eq!(enc.state_kind(), StateKind::Stunned);
    enc.tick(0.0); // flush
    assert!(rec.contains(&EncounterSignal::Damaged { amount: 10.0 }));
    assert!((enc.current_health_percent() - 90.0).abs() < 0.01);

    enc.tick(0.7);
    assert_eq!(enc.state_kind(), StateKind::Idle);
}

#[test]
fn threshold_crossing_opens_thread_break_not_stun() {
    let (mut enc, rec) = encounter_with_recorder(fight_file());

    enc.tick(0.1);
    enc.on_damaged(30.0);
    assert_eq!(enc.state_kind(), StateKind::ThreadBreak);
    enc.tick(0.0);
    assert!(rec.contains(&EncounterSignal::ThresholdCrossed { index: 0 }));
    assert!(rec.contains(&EncounterSignal::QteStarted { thread_index: 0 }));
}

#[test]
fn blocked_hit_does_not_stun() {
    let (mut enc, rec) = encounter_with_recorder(fight_file());

    enc.tick(0.1);
    enc.on_damaged(30.0); // crosses 75, boss now invulnerable in ThreadBreak
    enc.notify_qte_input();
    enc.tick(0.1); // QTE resolves, back to Idle

    // Re-invulnerable path: cross the next threshold
    enc.on_damaged(25.0); // 70 -> 45, crosses 50
    assert_eq!(enc.state_kind(), StateKind::ThreadBreak);
    enc.tick(0.0); // flush

    let before = rec.count(|s| matches!(s, EncounterSignal::Damaged { .. }));
    enc.on_damaged(5.0); // absorbed: invulnerable, hit < max health
    enc.tick(0.0);
    let after = rec.count(|s| matches!(s, EncounterSignal::Damaged { .. }));
    assert_eq!(before, after);
    assert_eq!(enc.state_kind(), StateKind::ThreadBreak);
}

#[test]
fn qte_success_breaks_thread_and_resumes_combat() {
    let (mut enc, rec) = encounter_with_recorder(fight_file());

    enc.tick(0.1);
    enc.on_damaged(30.0);
    enc.notify_qte_input();
    enc.tick(0.1);

    assert_eq!(enc.state_kind(), StateKind::Idle);
    assert_eq!(enc.threads_broken(), (1, 3));
    assert!(rec.contains(&EncounterSignal::QteSucceeded { thread_index: 0 }));
    assert!(rec.contains(&EncounterSignal::ThreadBroken { index: 0 }));

    // Combat resumed: a small hit lands again
    enc.on_damaged(1.0);
    enc.tick(0.0);
    assert!(rec.contains(&EncounterSignal::Damaged { amount: 1.0 }));
}

#[test]
fn qte_failure_keeps_invulnerability_and_rearms() {
    let (mut enc, rec) = encounter_with_recorder(fight_file());

    enc.tick(0.1);
    enc.on_damaged(30.0);
    assert_eq!(enc.state_kind(), StateKind::ThreadBreak);

    // Window elapses with no input
    enc.tick(2.1);
    assert!(rec.contains(&EncounterSignal::QteFailed { thread_index: 0 }));
    assert_eq!(enc.state_kind(), StateKind::Idle);
    assert_eq!(enc.threads_broken(), (0, 3));

    // Still invulnerable: small hits stay absorbed
    enc.on_damaged(5.0);
    assert!((enc.current_health_percent() - 70.0).abs() < 0.01);

    // The idle loop re-offers the window instead of attacking
    enc.tick(0.6);
    assert_eq!(enc.state_kind(), StateKind::ThreadBreak);
    assert_eq!(
        rec.count(|s| matches!(s, EncounterSignal::QteStarted { .. })),
        2
    );
}

#[test]
fn full_fight_to_execution_and_conclusion() {
    let (mut enc, rec) = encounter_with_recorder(fight_file());
    enc.tick(0.1);

    // Cross all three thresholds, passing each QTE
    for damage in [30.0, 25.0, 21.0] {
        enc.on_damaged(damage);
        assert_eq!(enc.state_kind(), StateKind::ThreadBreak);
        enc.notify_qte_input();
        enc.tick(0.1);
        assert_eq!(enc.state_kind(), StateKind::Idle);
    }

    assert_eq!(enc.threads_broken(), (3, 3));
    assert_eq!(
        rec.count(|s| matches!(s, EncounterSignal::AllThreadsBroken)),
        1
    );
    assert!(enc.is_ready_for_execution());

    // All-broken idle: the attack timer is suppressed
    for _ in 0..5 {
        enc.tick(0.6);
    }
    assert_eq!(enc.state_kind(), StateKind::Idle);
    assert!(enc.projectiles().is_empty());

    // No player reference: execution is unreachable, not a crash
    assert!(!enc.try_start_execution());

    // Out of range is rejected too
    enc.set_player(Some(PlayerTarget {
        position: Vec2::new(10.0, 0.0),
        radius: 0.5,
    }));
    assert!(!enc.try_start_execution());

    enc.set_player(Some(PlayerTarget {
        position: Vec2::new(1.0, 0.0),
        radius: 0.5,
    }));
    assert!(enc.try_start_execution());
    assert_eq!(enc.state_kind(), StateKind::Execution);

    // Before the midpoint nothing lands
    enc.tick(0.4);
    assert!(enc.current_health_percent() > 0.0);

    // Midpoint: the guaranteed kill lands through permanent invulnerability
    enc.tick(0.2);
    assert!((enc.current_health_percent()).abs() < f32::EPSILON);
    assert!(!rec.contains(&EncounterSignal::Defeated));

    // Deferred defeat arrives at the next tick boundary
    enc.tick(0.1);
    assert_eq!(enc.state_kind(), StateKind::Death);
    assert_eq!(rec.count(|s| matches!(s, EncounterSignal::Defeated)), 1);

    // Death linger, then conclusion
    enc.tick(1.0);
    assert!(enc.is_concluded());
    assert!(rec.ended.get());
    assert_eq!(enc.summary().outcome, Some(EncounterOutcome::BossDefeated));
    assert_eq!(enc.summary().threads_broken, 3);
    assert_eq!(enc.summary().qte_successes, 3);
    assert!(enc.summary().duration_secs > 0.0);
    // Execution overkill does not inflate the damage total past max health
    assert!((enc.summary().damage_to_boss - 100.0).abs() < 0.01);

    // Ticking a concluded encounter is inert
    enc.tick(1.0);
    assert_eq!(rec.count(|s| matches!(s, EncounterSignal::Defeated)), 1);
}

#[test]
fn staggered_spawns_are_cancelled_by_death() {
    let mut file = fight_file();
    file.encounter.thresholds.clear();
    file.patterns = vec![AttackPattern {
        id: "fan".into(),
        projectile: "needle".into(),
        count: 3,
        spread_degrees: 30.0,
        stagger_secs: 0.1,
        aim_at_target: false,
        fixed_direction: [-1.0, 0.0],
    }];
    let (mut enc, _rec) = encounter_with_recorder(file);

    // Dwell expires: the first projectile spawns now, two are queued
    enc.tick(0.6);
    assert_eq!(enc.projectiles().len(), 1);

    // Boss dies 0.05s after firing; Death entry cancels the queue
    enc.on_damaged(200.0);
    enc.tick(0.05);
    assert_eq!(enc.state_kind(), StateKind::Death);

    // Well past both stagger deadlines: nothing else spawned
    enc.tick(0.5);
    assert_eq!(enc.projectiles().len(), 1);
}

#[test]
fn projectile_hits_player_and_reports_damage() {
    let (mut enc, rec) = encounter_with_recorder(fight_file());
    enc.set_player(Some(PlayerTarget {
        position: Vec2::new(-4.0, 0.0),
        radius: 0.5,
    }));

    enc.tick(0.4);
    enc.tick(0.1); // dwell expires, needle flies toward the player
    assert_eq!(enc.projectiles().len(), 1);

    for _ in 0..10 {
        enc.tick(0.05);
        if rec.contains(&EncounterSignal::PlayerHit { damage: 10.0 }) {
            break;
        }
    }
    assert!(rec.contains(&EncounterSignal::PlayerHit { damage: 10.0 }));
    assert!(enc.projectiles().is_empty());
    assert_eq!(enc.summary().player_hits, 1);
}

#[test]
fn reflected_projectile_damages_the_boss() {
    let mut file = fight_file();
    file.encounter.thresholds.clear();
    let (mut enc, rec) = encounter_with_recorder(file);

    enc.tick(0.5);
    enc.tick(0.1); // needle now at (-4.8, 0)
    assert_eq!(enc.projectiles().len(), 1);
    let id = enc.projectiles()[0].id;

    assert!(enc.reflect_projectile(id, Vec2::X));
    enc.tick(0.0); // flush
    assert!(rec.contains(&EncounterSignal::ProjectileReflected {
        projectile_id: id
    }));

    // A second reflect is rejected
    assert!(!enc.reflect_projectile(id, Vec2::NEG_X));

    // It flies back and lands on the boss's damage intake
    for _ in 0..6 {
        enc.tick(0.1);
    }
    assert!((enc.current_health_percent() - 85.0).abs() < 0.01);
    assert_eq!(enc.state_kind(), StateKind::Stunned);
    assert!(enc.projectiles().is_empty());
}

#[test]
fn reflecting_unknown_projectile_is_rejected() {
    let (mut enc, _rec) = encounter_with_recorder(fight_file());
    assert!(!enc.reflect_projectile(999, Vec2::X));
}

#[test]
fn enrage_is_one_way() {
    let mut file = fight_file();
    file.encounter.thresholds.clear();
    file.encounter.enrage_threshold = 50.0;
    let (mut enc, rec) = encounter_with_recorder(file);

    enc.tick(0.1);
    assert!(!enc.is_enraged());

    enc.on_damaged(60.0);
    enc.tick(0.1);
    assert!(enc.is_enraged());
    assert_eq!(rec.count(|s| matches!(s, EncounterSignal::Enraged)), 1);

    // Stays enraged forever after
    for _ in 0..10 {
        enc.tick(0.3);
    }
    assert_eq!(rec.count(|s| matches!(s, EncounterSignal::Enraged)), 1);
}

#[test]
fn degenerate_enraged_dwell_bounds_never_panic_mid_fight() {
    let mut file = fight_file();
    file.encounter.thresholds.clear();
    file.encounter.enrage_threshold = 50.0;
    file.encounter.enraged_dwell_secs = [1.0, 0.5];
    let (mut enc, _rec) = encounter_with_recorder(file);

    enc.tick(0.1);
    enc.on_damaged(60.0);

    // Every post-enrage dwell roll samples the inverted bounds
    for _ in 0..30 {
        enc.tick(0.3);
    }
    assert!(enc.is_enraged());
}

#[test]
fn absent_player_falls_back_to_fixed_direction() {
    let (mut enc, _rec) = encounter_with_recorder(fight_file());

    enc.tick(0.6); // aim_at_target with no player reference
    assert_eq!(enc.projectiles().len(), 1);
    let dir = enc.projectiles()[0].direction;
    assert!((dir - Vec2::NEG_X).length() < 1e-5);
}

#[test]
fn zero_listeners_is_valid() {
    let mut enc = Encounter::new(fight_file(), ProjectilePool::new(), 7);
    enc.tick(0.6);
    enc.on_damaged(200.0);
    enc.tick(0.1);
    enc.tick(1.0);
    assert!(enc.is_concluded());
}
