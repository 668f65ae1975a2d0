//! Bounding boxes and crash classification
//!
//! Everything is an axis-aligned box in screen space (y grows downward).
//! A crash is only fatal when the skater meets an obstacle from the side or
//! passes underneath it; touching down on top is a landing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use crate::consts::{
    LAND_ABOVE_TOLERANCE, LAND_BELOW_TOLERANCE, LAND_HORIZONTAL_TOLERANCE, SIDE_HIT_BAND,
};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.min.x + self.size.x / 2.0
    }

    /// Strict overlap; boxes that only share an edge do not touch
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// How the skater met an obstacle this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    /// Boxes do not overlap
    Clear,
    /// Riding or landing on the top edge
    OnTop,
    /// Overlapping, but neither a side hit nor passing underneath
    Graze,
    /// Ran into the left or right face
    Side,
    /// Passing underneath (e.g. below a rail)
    Underneath,
}

impl Contact {
    /// Ends the round
    pub fn is_fatal(self) -> bool {
        matches!(self, Contact::Side | Contact::Underneath)
    }
}

/// Classify the contact between the skater's box and a hazard.
///
/// Ramps never collide; callers skip them, and they report `Clear` here.
pub fn classify_contact(player: &Aabb, obstacle: &Obstacle) -> Contact {
    if !obstacle.kind.is_hazard() {
        return Contact::Clear;
    }

    let ob = obstacle.bounds();
    if !player.overlaps(&ob) {
        return Contact::Clear;
    }

    if obstacle.kind.is_grindable() && is_on_top(player, &ob) {
        return Contact::OnTop;
    }

    let hits_left_face = player.right() > ob.left() && player.left() < ob.left() + SIDE_HIT_BAND;
    let hits_right_face =
        player.left() < ob.right() && player.right() > ob.right() - SIDE_HIT_BAND;
    if hits_left_face || hits_right_face {
        return Contact::Side;
    }

    if player.top() < ob.bottom() && player.bottom() < ob.top() {
        return Contact::Underneath;
    }

    Contact::Graze
}

/// Skater's feet are near the obstacle top and roughly above it
fn is_on_top(player: &Aabb, ob: &Aabb) -> bool {
    let feet = player.bottom();
    let center = player.center_x();
    feet >= ob.top() - LAND_ABOVE_TOLERANCE
        && feet <= ob.top() + LAND_BELOW_TOLERANCE
        && center >= ob.left() - LAND_HORIZONTAL_TOLERANCE
        && center <= ob.right() + LAND_HORIZONTAL_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::obstacle::ObstacleKind;

    fn player_box(y: f32) -> Aabb {
        Aabb::new(PLAYER_X, y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        let c = Aabb::new(9.5, 9.5, 10.0, 10.0);
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_running_into_barrier_is_fatal() {
        // Grounded skater, barrier's left face just inside the skater's right edge
        let barrier = Obstacle::new(1, ObstacleKind::Barrier, PLAYER_X + PLAYER_WIDTH - 3.0);
        let contact = classify_contact(&player_box(GROUND_Y - PLAYER_HEIGHT), &barrier);
        assert_eq!(contact, Contact::Side);
        assert!(contact.is_fatal());
    }

    #[test]
    fn test_landing_on_top_is_safe() {
        let barrier = Obstacle::new(1, ObstacleKind::Barrier, PLAYER_X + 20.0);
        // Feet 5 units into the barrier top
        let y = barrier.top() + 5.0 - PLAYER_HEIGHT;
        let contact = classify_contact(&player_box(y), &barrier);
        assert_eq!(contact, Contact::OnTop);
        assert!(!contact.is_fatal());
    }

    #[test]
    fn test_ramp_never_collides() {
        let ramp = Obstacle::new(1, ObstacleKind::Ramp, PLAYER_X);
        assert_eq!(
            classify_contact(&player_box(GROUND_Y - PLAYER_HEIGHT), &ramp),
            Contact::Clear
        );
    }

    #[test]
    fn test_no_overlap_is_clear() {
        let rail = Obstacle::new(1, ObstacleKind::Rail, 600.0);
        assert_eq!(
            classify_contact(&player_box(GROUND_Y - PLAYER_HEIGHT), &rail),
            Contact::Clear
        );
    }
}
