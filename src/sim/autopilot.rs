//! Demo autopilot
//!
//! Plays the game for the attract/demo mode: jumps hazards, queues a
//! kickflip on the approach and rides ramps without touching the keys.

use super::input::KeyState;
use super::state::GameState;

/// Start queueing a trick when a hazard is this many ticks away
const QUEUE_LEAD_TICKS: f32 = 14.0;
/// Take off when a hazard is this many ticks away
const JUMP_LEAD_TICKS: f32 = 10.0;

/// Keys to hold this tick
pub fn suggest(state: &GameState) -> KeyState {
    let player = &state.player;
    let mut keys = KeyState::NONE;

    if !player.on_ground {
        return keys;
    }

    // Nearest hazard still ahead of the skater's front edge
    let front = player.x + player.width;
    let Some(gap) = state
        .obstacles
        .iter()
        .filter(|o| o.kind.is_hazard() && o.x >= front)
        .map(|o| o.x - front)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    else {
        return keys;
    };

    let speed = state.speed.max(f32::EPSILON);
    let ticks_away = gap / speed;
    if ticks_away <= JUMP_LEAD_TICKS {
        keys.jump = true;
    } else if ticks_away <= QUEUE_LEAD_TICKS && player.queued_trick.is_none() {
        keys.left = true;
    }
    keys
}
