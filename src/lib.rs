//! Skate Dash - A side-scrolling skateboard arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (skater state machine, obstacles, round tick)
//! - `game`: Menu / playing / game-over flow around a round
//! - `audio`: Background music collaborator
//! - `tuning`: Data-driven game balance
//! - `highscores`: In-memory session leaderboard

pub mod audio;
pub mod game;
pub mod highscores;
pub mod sim;
pub mod tuning;

pub use game::{Command, Game};
pub use highscores::HighScores;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (one tick per rendered frame)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 1000.0;
    pub const WORLD_HEIGHT: f32 = 600.0;
    /// Y of the ground line (screen coordinates, y grows downward)
    pub const GROUND_Y: f32 = WORLD_HEIGHT - 100.0;

    /// Skater defaults - x never changes, the world scrolls past
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;

    /// Gravity (units/tick²)
    pub const GRAVITY: f32 = 0.8;
    /// Initial vertical velocity of a jump (negative = up)
    pub const JUMP_POWER: f32 = -15.0;

    /// Ollie can be swapped for another trick while progress is below this
    pub const COMBO_WINDOW_TICKS: u32 = 15;
    /// Bonus multiplier for tricks performed off a ramp boost, as a ratio
    pub const RAMP_BONUS_NUM: u32 = 3;
    pub const RAMP_BONUS_DEN: u32 = 2;

    /// Grind snap tolerance around an obstacle top
    pub const GRIND_ABOVE_TOLERANCE: f32 = 5.0;
    pub const GRIND_BELOW_TOLERANCE: f32 = 10.0;
    /// Vertical speed must be below this to lock into a grind
    pub const GRIND_MAX_SPEED: f32 = 2.0;

    /// Ramp launch
    pub const RAMP_BOOST_VELOCITY: f32 = -22.0;
    /// No boost if already rising faster than this
    pub const RAMP_BOOST_MIN_VELOCITY: f32 = -8.0;
    /// Boost band as fractions of ramp width
    pub const RAMP_BOOST_BAND: (f32, f32) = (0.2, 0.6);
    /// How far past the apex the boost may still trigger
    pub const RAMP_APEX_SLACK: f32 = 10.0;
    /// Slowest downhill creep while riding a ramp
    pub const RAMP_MIN_DESCENT: f32 = 0.5;

    /// Landing-on-top tolerances used by the round collision pass
    pub const LAND_ABOVE_TOLERANCE: f32 = 15.0;
    pub const LAND_BELOW_TOLERANCE: f32 = 20.0;
    pub const LAND_HORIZONTAL_TOLERANCE: f32 = 15.0;
    /// Width of the side-impact band on either edge of an obstacle
    pub const SIDE_HIT_BAND: f32 = 5.0;

    /// Idle animation cycle
    pub const ANIMATION_SPEED: f32 = 0.2;
    pub const ANIMATION_FRAMES: f32 = 4.0;
}
