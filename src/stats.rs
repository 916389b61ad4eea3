//! Play statistics
//!
//! Telemetry is fire-and-forget: the simulation calls these hooks, logs any
//! error they return, and carries on.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::consts::TICK_MS;
use crate::error::CollaboratorError;

/// Telemetry hooks invoked by the simulation
pub trait StatsRecorder {
    /// Danger multiplier observed on an alive tick
    fn record_danger(&mut self, multiplier: u32) -> Result<(), CollaboratorError>;
    /// One tick survived with the HUD on screen
    fn record_survival_tick(&mut self) -> Result<(), CollaboratorError>;
    fn record_hit(&mut self) -> Result<(), CollaboratorError>;
    /// Missiles that ran out of bounces without touching the player
    fn record_missiles_avoided(&mut self, count: u32) -> Result<(), CollaboratorError>;
    fn record_level_reached(&mut self, level: u32) -> Result<(), CollaboratorError>;
    fn record_death(&mut self, score: u64, level: u32) -> Result<(), CollaboratorError>;
}

/// In-memory session totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub survival_ticks: u64,
    pub hits: u32,
    pub missiles_avoided: u32,
    pub highest_level: u32,
    pub deaths: u32,
    pub best_score: u64,
    pub peak_danger: u32,
    danger_sum: u64,
    danger_samples: u64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Survival time in seconds at the nominal tick rate
    pub fn survival_secs(&self) -> f64 {
        (self.survival_ticks * TICK_MS) as f64 / 1000.0
    }

    pub fn average_danger(&self) -> f64 {
        if self.danger_samples == 0 {
            0.0
        } else {
            self.danger_sum as f64 / self.danger_samples as f64
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), CollaboratorError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, CollaboratorError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl StatsRecorder for SessionStats {
    fn record_danger(&mut self, multiplier: u32) -> Result<(), CollaboratorError> {
        self.peak_danger = self.peak_danger.max(multiplier);
        self.danger_sum += multiplier as u64;
        self.danger_samples += 1;
        Ok(())
    }

    fn record_survival_tick(&mut self) -> Result<(), CollaboratorError> {
        self.survival_ticks += 1;
        Ok(())
    }

    fn record_hit(&mut self) -> Result<(), CollaboratorError> {
        self.hits += 1;
        Ok(())
    }

    fn record_missiles_avoided(&mut self, count: u32) -> Result<(), CollaboratorError> {
        self.missiles_avoided += count;
        Ok(())
    }

    fn record_level_reached(&mut self, level: u32) -> Result<(), CollaboratorError> {
        self.highest_level = self.highest_level.max(level);
        Ok(())
    }

    fn record_death(&mut self, score: u64, level: u32) -> Result<(), CollaboratorError> {
        self.deaths += 1;
        self.best_score = self.best_score.max(score);
        self.highest_level = self.highest_level.max(level);
        Ok(())
    }
}

/// Shared handle around [`SessionStats`]
///
/// The simulation owns one clone; the driver keeps another to read totals.
#[derive(Debug, Clone, Default)]
pub struct SharedStats(Rc<RefCell<SessionStats>>);

impl SharedStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> SessionStats {
        self.0.borrow().clone()
    }
}

impl StatsRecorder for SharedStats {
    fn record_danger(&mut self, multiplier: u32) -> Result<(), CollaboratorError> {
        self.0.borrow_mut().record_danger(multiplier)
    }

    fn record_survival_tick(&mut self) -> Result<(), CollaboratorError> {
        self.0.borrow_mut().record_survival_tick()
    }

    fn record_hit(&mut self) -> Result<(), CollaboratorError> {
        self.0.borrow_mut().record_hit()
    }

    fn record_missiles_avoided(&mut self, count: u32) -> Result<(), CollaboratorError> {
        self.0.borrow_mut().record_missiles_avoided(count)
    }

    fn record_level_reached(&mut self, level: u32) -> Result<(), CollaboratorError> {
        self.0.borrow_mut().record_level_reached(level)
    }

    fn record_death(&mut self, score: u64, level: u32) -> Result<(), CollaboratorError> {
        self.0.borrow_mut().record_death(score, level)
    }
}
