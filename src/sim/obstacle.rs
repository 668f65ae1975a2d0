//! Scrolling obstacles
//!
//! Obstacles only know their geometry and position. Grinding, ramp riding
//! and crash checks are handled by the player and the round tick.

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::GROUND_Y;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Barrier,
    LowBarrier,
    /// Triangular ramp, never fatal
    Ramp,
    /// Floating rail
    Rail,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Barrier,
        ObstacleKind::LowBarrier,
        ObstacleKind::Ramp,
        ObstacleKind::Rail,
    ];

    /// (width, height)
    pub fn size(self) -> (f32, f32) {
        match self {
            ObstacleKind::Barrier => (30.0, 60.0),
            ObstacleKind::LowBarrier => (30.0, 30.0),
            ObstacleKind::Ramp => (60.0, 50.0),
            ObstacleKind::Rail => (40.0, 10.0),
        }
    }

    /// Gap between the bottom of the obstacle and the ground
    pub fn clearance(self) -> f32 {
        match self {
            ObstacleKind::Rail => 20.0,
            _ => 0.0,
        }
    }

    /// Can be ground along the top edge
    pub fn is_grindable(self) -> bool {
        matches!(
            self,
            ObstacleKind::Barrier | ObstacleKind::LowBarrier | ObstacleKind::Rail
        )
    }

    /// Can end the round on impact
    pub fn is_hazard(self) -> bool {
        self != ObstacleKind::Ramp
    }
}

/// An obstacle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Left edge
    pub x: f32,
    /// Pass bonus already credited
    pub passed: bool,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, x: f32) -> Self {
        Self {
            id,
            kind,
            x,
            passed: false,
        }
    }

    /// Scroll left by the world speed
    pub fn advance(&mut self, speed: f32) {
        self.x -= speed;
    }

    pub fn width(&self) -> f32 {
        self.kind.size().0
    }

    pub fn height(&self) -> f32 {
        self.kind.size().1
    }

    /// Y of the top edge
    pub fn top(&self) -> f32 {
        GROUND_Y - self.height() - self.kind.clearance()
    }

    pub fn right(&self) -> f32 {
        self.x + self.width()
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.top(), self.width(), self.height())
    }

    /// Entirely scrolled off the left edge of the world
    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }
}
