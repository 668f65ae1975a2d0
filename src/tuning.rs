//! Data-driven round balance
//!
//! Loaded from JSON; any field left out falls back to the default. Physics
//! constants that the trick system depends on stay fixed in `consts`.

use serde::{Deserialize, Serialize};

use crate::sim::ObstacleKind;

/// Relative spawn weight per obstacle type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnWeights {
    pub barrier: u32,
    pub low_barrier: u32,
    pub ramp: u32,
    pub rail: u32,
}

impl Default for SpawnWeights {
    fn default() -> Self {
        // Barriers and ramps twice as common as the rest
        Self {
            barrier: 2,
            low_barrier: 1,
            ramp: 2,
            rail: 1,
        }
    }
}

impl SpawnWeights {
    pub fn weight(&self, kind: ObstacleKind) -> u32 {
        match kind {
            ObstacleKind::Barrier => self.barrier,
            ObstacleKind::LowBarrier => self.low_barrier,
            ObstacleKind::Ramp => self.ramp,
            ObstacleKind::Rail => self.rail,
        }
    }

    pub fn total(&self) -> u32 {
        ObstacleKind::ALL.iter().map(|&k| self.weight(k)).sum()
    }

    /// Map a roll in `0..total()` to an obstacle type
    pub fn pick(&self, roll: u32) -> ObstacleKind {
        let mut remaining = roll;
        for kind in ObstacleKind::ALL {
            let w = self.weight(kind);
            if remaining < w {
                return kind;
            }
            remaining -= w;
        }
        ObstacleKind::Barrier
    }
}

/// Round balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// World scroll speed at round start (units/tick)
    pub start_speed: f32,
    pub max_speed: f32,
    /// Speed added per difficulty step
    pub speed_step: f32,

    /// Ticks between spawns at round start
    pub start_spawn_rate: u32,
    pub min_spawn_rate: u32,
    /// Ticks removed from the spawn interval per difficulty step
    pub spawn_rate_step: u32,

    /// Score interval between difficulty steps
    pub difficulty_interval: u64,
    /// Points for getting past an obstacle
    pub pass_bonus: u64,

    pub spawn_weights: SpawnWeights,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            start_speed: 5.0,
            max_speed: 12.0,
            speed_step: 0.1,

            start_spawn_rate: 90,
            min_spawn_rate: 60,
            spawn_rate_step: 1,

            difficulty_interval: 100,
            pass_bonus: 10,

            spawn_weights: SpawnWeights::default(),
        }
    }
}

impl Tuning {
    /// Parse a tuning file; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp values that would break the round loop, logging each fix
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if !(self.start_speed.is_finite() && self.start_speed > 0.0) {
            log::warn!("Invalid start_speed {}, using default", self.start_speed);
            self.start_speed = defaults.start_speed;
        }
        if !self.max_speed.is_finite() || self.max_speed < self.start_speed {
            log::warn!(
                "max_speed {} below start_speed {}, clamping",
                self.max_speed,
                self.start_speed
            );
            self.max_speed = self.start_speed;
        }
        if !self.speed_step.is_finite() || self.speed_step < 0.0 {
            log::warn!("Invalid speed_step {}, using default", self.speed_step);
            self.speed_step = defaults.speed_step;
        }
        if self.min_spawn_rate == 0 {
            log::warn!("min_spawn_rate must be at least 1 tick");
            self.min_spawn_rate = 1;
        }
        if self.start_spawn_rate < self.min_spawn_rate {
            log::warn!(
                "start_spawn_rate {} below min_spawn_rate {}, clamping",
                self.start_spawn_rate,
                self.min_spawn_rate
            );
            self.start_spawn_rate = self.min_spawn_rate;
        }
        if self.difficulty_interval == 0 {
            log::warn!("difficulty_interval must be positive, using default");
            self.difficulty_interval = defaults.difficulty_interval;
        }
        if self.spawn_weights.total() == 0 {
            log::warn!("All spawn weights are zero, using defaults");
            self.spawn_weights = SpawnWeights::default();
        }

        self
    }
}
