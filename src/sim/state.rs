//! Round state
//!
//! Everything a round needs to advance deterministically lives here: the
//! skater, the live obstacles, score, difficulty and the seeded RNG.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::{Obstacle, ObstacleKind};
use super::player::Player;
use crate::consts::WORLD_WIDTH;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated
    Menu,
    /// Active round
    Playing,
    /// Round ended by a crash
    GameOver,
}

/// Complete round state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    /// World scroll speed (units/tick)
    pub speed: f32,
    /// Ticks between obstacle spawns
    pub spawn_rate: u32,
    /// Ticks since the last spawn
    pub spawn_timer: u32,
    /// Simulation tick counter for the current round
    pub time_ticks: u64,
    /// Fastest speed reached this round
    pub top_speed: f32,
    pub player: Player,
    /// Live obstacles in spawn order (left to right on screen)
    pub obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl GameState {
    /// Create a round in the menu with default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.validated();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            score: 0,
            speed: tuning.start_speed,
            spawn_rate: tuning.start_spawn_rate,
            spawn_timer: 0,
            time_ticks: 0,
            top_speed: tuning.start_speed,
            player: Player::new(),
            obstacles: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Start a fresh round with a new seed; nothing carries over
    pub fn reset(&mut self, seed: u64) {
        let tuning = std::mem::take(&mut self.tuning);
        *self = Self::with_tuning(seed, tuning);
        self.phase = GamePhase::Playing;
        log::info!("Round reset with seed {}", seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Pick an obstacle type using the spawn weights
    pub fn roll_obstacle_kind(&mut self) -> ObstacleKind {
        let weights = self.tuning.spawn_weights;
        let roll = self.rng.random_range(0..weights.total());
        weights.pick(roll)
    }

    /// Spawn an obstacle at the right edge of the world
    pub fn spawn_obstacle(&mut self, kind: ObstacleKind) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle::new(id, kind, WORLD_WIDTH));
        log::debug!("Spawned {:?} (id {}) at tick {}", kind, id, self.time_ticks);
        id
    }

    /// Place an obstacle at an arbitrary x (scripted scenarios, tests)
    pub fn place_obstacle(&mut self, kind: ObstacleKind, x: f32) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle::new(id, kind, x));
        id
    }
}
