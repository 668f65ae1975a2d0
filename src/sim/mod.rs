//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod obstacle;
pub mod player;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod trick;

pub use collision::{Aabb, Contact, classify_contact};
pub use input::{KeyLatch, KeyState};
pub use obstacle::{Obstacle, ObstacleKind};
pub use player::{LandedTrick, Player, ramp_surface_y};
pub use snapshot::{ObstacleView, PlayerView, Snapshot};
pub use state::{GamePhase, GameState};
pub use tick::{Crash, FrameEvent, apply_difficulty, tick};
pub use trick::{Trick, TrickKind};
