//! Scripted player model
//!
//! Stands in for the real player during headless simulation: deals steady
//! damage, answers (or deliberately ignores) thread-break QTEs, and presses
//! execute as soon as the finisher unlocks.

use glam::Vec2;
use sever_core::{Encounter, PlayerTarget, StateKind};

/// Simulated player behavior for one fight.
#[derive(Debug, Clone)]
pub struct ScriptedPlayer {
    /// Damage per second poured into the boss
    pub dps: f32,
    /// Seconds between hits
    pub hit_interval: f32,
    /// Whether QTEs are answered in time
    pub pass_qtes: bool,
    /// Fixed standing position (inside default execution range)
    pub position: Vec2,
    pub radius: f32,

    time_since_hit: f32,
}

impl ScriptedPlayer {
    pub fn new(dps: f32, pass_qtes: bool) -> Self {
        Self {
            dps,
            hit_interval: 0.5,
            pass_qtes,
            position: Vec2::new(-2.0, 0.0),
            radius: 0.5,
            time_since_hit: 0.0,
        }
    }

    pub fn target(&self) -> PlayerTarget {
        PlayerTarget {
            position: self.position,
            radius: self.radius,
        }
    }

    /// One frame of scripted play, applied before the encounter tick.
    pub fn act(&mut self, encounter: &mut Encounter, dt: f32) {
        match encounter.state_kind() {
            StateKind::ThreadBreak => {
                if self.pass_qtes {
                    encounter.notify_qte_input();
                }
            }
            StateKind::Death => return,
            _ => {}
        }

        if encounter.is_ready_for_execution() {
            encounter.try_start_execution();
            return;
        }

        self.time_since_hit += dt;
        if self.time_since_hit >= self.hit_interval {
            self.time_since_hit = 0.0;
            encounter.on_damaged(self.dps * self.hit_interval);
        }
    }
}
