//! Fixed timestep round tick
//!
//! Order per tick: skater, spawning, obstacles (scroll, crash, pass, prune),
//! then difficulty.

use serde::{Deserialize, Serialize};

use super::collision::{Contact, classify_contact};
use super::input::KeyState;
use super::obstacle::ObstacleKind;
use super::player::LandedTrick;
use super::state::{GamePhase, GameState};

/// What happened during a tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameEvent {
    /// Points earned this tick (tricks + passes)
    pub score_delta: u64,
    /// The round ended this tick
    pub terminal: bool,
    pub landed: Option<LandedTrick>,
    /// Obstacles cleared this tick
    pub passed: u32,
    pub spawned: Option<ObstacleKind>,
    /// Difficulty steps applied this tick
    pub difficulty_steps: u32,
    /// The crash that ended the round
    pub crash: Option<Crash>,
}

/// Fatal contact details
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crash {
    pub obstacle_id: u32,
    pub kind: ObstacleKind,
    pub contact: Contact,
}

/// Advance the round by one tick.
///
/// Does nothing outside `GamePhase::Playing`.
pub fn tick(state: &mut GameState, keys: &KeyState) -> FrameEvent {
    let mut event = FrameEvent::default();
    if state.phase != GamePhase::Playing {
        return event;
    }

    state.time_ticks += 1;
    let score_before = state.score;

    if let Some(landed) = state.player.update(keys, &state.obstacles) {
        log::debug!(
            "Landed {:?} for {}{}",
            landed.kind,
            landed.bonus,
            if landed.boosted { " (ramp)" } else { "" }
        );
        state.score += u64::from(landed.bonus);
        event.landed = Some(landed);
    }

    state.spawn_timer += 1;
    if state.spawn_timer >= state.spawn_rate {
        state.spawn_timer = 0;
        let kind = state.roll_obstacle_kind();
        state.spawn_obstacle(kind);
        event.spawned = Some(kind);
    }

    let player_box = state.player.bounds();
    let player_x = state.player.x;
    let speed = state.speed;
    let pass_bonus = state.tuning.pass_bonus;
    for obstacle in &mut state.obstacles {
        obstacle.advance(speed);

        if event.crash.is_none() && obstacle.kind.is_hazard() {
            let contact = classify_contact(&player_box, obstacle);
            if contact.is_fatal() {
                event.crash = Some(Crash {
                    obstacle_id: obstacle.id,
                    kind: obstacle.kind,
                    contact,
                });
            }
        }

        if !obstacle.passed && obstacle.right() < player_x {
            obstacle.passed = true;
            state.score += pass_bonus;
            event.passed += 1;
        }
    }
    state.obstacles.retain(|o| !o.is_offscreen());

    event.difficulty_steps = apply_difficulty(state, score_before);
    event.score_delta = state.score - score_before;

    if let Some(crash) = event.crash {
        state.phase = GamePhase::GameOver;
        event.terminal = true;
        log::info!(
            "Game over: {:?} hit on {:?} (id {}), score {} after {} ticks",
            crash.contact,
            crash.kind,
            crash.obstacle_id,
            state.score,
            state.time_ticks
        );
    }

    event
}

/// Step speed and spawn rate once per difficulty threshold crossed since
/// `score_before`. Returns the number of steps applied.
pub fn apply_difficulty(state: &mut GameState, score_before: u64) -> u32 {
    let interval = state.tuning.difficulty_interval;
    let crossed = (state.score / interval).saturating_sub(score_before / interval);
    let steps = u32::try_from(crossed).unwrap_or(u32::MAX);

    for _ in 0..steps {
        state.speed = (state.speed + state.tuning.speed_step).min(state.tuning.max_speed);
        state.spawn_rate = state
            .spawn_rate
            .saturating_sub(state.tuning.spawn_rate_step)
            .max(state.tuning.min_spawn_rate);
    }

    if steps > 0 {
        state.top_speed = state.top_speed.max(state.speed);
        log::info!(
            "Difficulty up at score {}: speed {:.1}, spawn every {} ticks",
            state.score,
            state.speed,
            state.spawn_rate
        );
    }
    steps
}
