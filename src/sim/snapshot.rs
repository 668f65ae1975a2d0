//! Read-only view of a round for the presentation layer
//!
//! Renderers consume this instead of reaching into `GameState`, so the sim
//! stays free of drawing concerns.

use serde::{Deserialize, Serialize};

use super::obstacle::ObstacleKind;
use super::state::{GamePhase, GameState};
use super::trick::TrickKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub on_ground: bool,
    pub on_ramp: bool,
    pub ramp_boost: bool,
    pub trick: Option<TrickKind>,
    pub trick_progress: u32,
    pub trick_duration: u32,
    /// Body rotation in degrees
    pub rotation: f32,
    /// Board flip in degrees
    pub board_flip: f32,
    pub queued_trick: Option<TrickKind>,
    pub anim_frame: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub kind: ObstacleKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Everything needed to draw a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub speed: f32,
    pub time_ticks: u64,
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let p = &state.player;
        let trick = p.trick;
        Self {
            phase: state.phase,
            score: state.score,
            speed: state.speed,
            time_ticks: state.time_ticks,
            player: PlayerView {
                x: p.x,
                y: p.y,
                width: p.width,
                height: p.height,
                on_ground: p.on_ground,
                on_ramp: p.on_ramp,
                ramp_boost: p.ramp_boost,
                trick: trick.map(|t| t.kind),
                trick_progress: trick.map_or(0, |t| t.progress),
                trick_duration: trick.map_or(0, |t| t.duration),
                rotation: trick.map_or(0.0, |t| t.rotation()),
                board_flip: trick.map_or(0.0, |t| t.board_flip()),
                queued_trick: p.queued_trick,
                anim_frame: p.anim_frame,
            },
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    kind: o.kind,
                    x: o.x,
                    y: o.top(),
                    width: o.width(),
                    height: o.height(),
                })
                .collect(),
        }
    }

    /// HUD line for the active trick, e.g. "360° SPIN (RAMP!)"
    pub fn trick_label(&self) -> Option<String> {
        self.player.trick.map(|kind| {
            if self.player.ramp_boost {
                format!("{} (RAMP!)", kind.label())
            } else {
                kind.label().to_string()
            }
        })
    }

    /// HUD speed readout, one decimal
    pub fn speed_label(&self) -> String {
        format!("Speed: {:.1}", self.speed)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
