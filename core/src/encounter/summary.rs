//! Post-fight summary
//!
//! Accumulated from the signal stream as it is dispatched. Progression and
//! HUD layers read this after the encounter concludes.

use crate::events::EncounterSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterOutcome {
    BossDefeated,
}

#[derive(Debug, Clone, Default)]
pub struct EncounterSummary {
    /// Damage that actually landed on the boss
    pub damage_to_boss: f32,
    /// Projectile hits the player took
    pub player_hits: u32,
    pub player_damage: f32,
    pub thresholds_crossed: u32,
    pub threads_broken: u32,
    pub qte_successes: u32,
    pub qte_failures: u32,
    pub reflections: u32,
    /// Fight length in seconds, set when the encounter concludes
    pub duration_secs: f32,
    pub outcome: Option<EncounterOutcome>,
}

impl EncounterSummary {
    pub fn record(&mut self, signal: &EncounterSignal) {
        match signal {
            EncounterSignal::Damaged { amount } => self.damage_to_boss += amount,
            EncounterSignal::PlayerHit { damage } => {
                self.player_hits += 1;
                self.player_damage += damage;
            }
            EncounterSignal::ThresholdCrossed { .. } => self.thresholds_crossed += 1,
            EncounterSignal::ThreadBroken { .. } => self.threads_broken += 1,
            EncounterSignal::QteSucceeded { .. } => self.qte_successes += 1,
            EncounterSignal::QteFailed { .. } => self.qte_failures += 1,
            EncounterSignal::ProjectileReflected { .. } => self.reflections += 1,
            EncounterSignal::Defeated => self.outcome = Some(EncounterOutcome::BossDefeated),
            _ => {}
        }
    }
}
