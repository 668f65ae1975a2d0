//! The skater: jump physics and the trick state machine
//!
//! The skater never moves horizontally. Each tick it reads the held keys and
//! the live obstacle list, integrates its vertical motion, then lets grinds,
//! ramps and the ground override the integrated position. A finished trick
//! pays out only on landing; touching down mid-trick forfeits it.

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::input::{KeyLatch, KeyState};
use super::obstacle::{Obstacle, ObstacleKind};
use super::trick::{Trick, TrickKind};
use crate::consts::*;

/// A trick that paid out on landing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandedTrick {
    pub kind: TrickKind,
    pub bonus: u32,
    /// Performed off a ramp boost
    pub boosted: bool,
}

/// The player's skater
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Vertical velocity, negative is up
    pub vel_y: f32,
    pub on_ground: bool,
    pub on_ramp: bool,
    /// A ramp launch happened during the current trick
    pub ramp_boost: bool,
    pub trick: Option<Trick>,
    /// Trick picked while rolling, performed on the next jump
    pub queued_trick: Option<TrickKind>,
    keys: KeyLatch,
    /// Idle animation cycle, 0..4
    #[serde(default)]
    pub anim_frame: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// A skater standing on the ground
    pub fn new() -> Self {
        Self {
            x: PLAYER_X,
            y: GROUND_Y - PLAYER_HEIGHT,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            vel_y: 0.0,
            on_ground: true,
            on_ramp: false,
            ramp_boost: false,
            trick: None,
            queued_trick: None,
            keys: KeyLatch::default(),
            anim_frame: 0.0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Y of the top edge when standing on the ground
    fn ground_y(&self) -> f32 {
        GROUND_Y - self.height
    }

    pub fn current_trick(&self) -> Option<TrickKind> {
        self.trick.map(|t| t.kind)
    }

    /// Advance one tick. Returns the trick that paid out this tick, if any.
    pub fn update(&mut self, held: &KeyState, obstacles: &[Obstacle]) -> Option<LandedTrick> {
        let pressed = self.keys.update(held);

        if !self.on_ground {
            // Held keys count in the air, so a key pressed on the ground and
            // kept down still fires after takeoff
            match self.trick {
                None => {
                    if let Some(kind) = TrickKind::from_keys(held) {
                        self.start_trick(kind);
                    }
                }
                Some(t) if t.kind == TrickKind::Ollie && t.progress < COMBO_WINDOW_TICKS => {
                    if let Some(kind) = TrickKind::from_keys(held) {
                        self.start_trick(kind);
                    }
                }
                Some(_) => {}
            }
        } else if let Some(kind) = TrickKind::from_keys(&pressed) {
            self.queued_trick = Some(kind);
        }

        if held.wants_jump() && self.on_ground {
            self.vel_y = JUMP_POWER;
            self.on_ground = false;
            let kind = self.queued_trick.take().unwrap_or(TrickKind::Ollie);
            self.start_trick(kind);
        }

        let ramp_boost = self.ramp_boost;
        if let Some(trick) = self.trick.as_mut() {
            trick.advance(ramp_boost);
            if trick.completed && self.on_ground {
                return self.finish_trick();
            }
        }

        self.vel_y += GRAVITY;
        self.y += self.vel_y;

        self.check_grind(obstacles);
        self.check_ramp(obstacles);

        let mut landed = None;
        let ground_y = self.ground_y();
        if self.y >= ground_y {
            self.y = ground_y;
            self.vel_y = 0.0;
            self.on_ground = true;
            self.on_ramp = false;
            match self.trick {
                Some(t) if t.completed => landed = self.finish_trick(),
                Some(t) => {
                    log::debug!("Bailed {:?} at {}/{}", t.kind, t.progress, t.duration);
                    self.reset_trick();
                }
                None => {}
            }
        }

        self.anim_frame += ANIMATION_SPEED;
        if self.anim_frame >= ANIMATION_FRAMES {
            self.anim_frame = 0.0;
        }

        landed
    }

    /// Begin a trick, replacing whatever was in progress
    pub fn start_trick(&mut self, kind: TrickKind) {
        self.trick = Some(Trick::new(kind));
    }

    /// Pay out the latched bonus and clear trick state
    fn finish_trick(&mut self) -> Option<LandedTrick> {
        let trick = self.trick?;
        let landed = LandedTrick {
            kind: trick.kind,
            bonus: trick.bonus,
            boosted: self.ramp_boost,
        };
        self.reset_trick();
        Some(landed)
    }

    /// Drop the active trick, the queue and the ramp boost latch
    pub fn reset_trick(&mut self) {
        self.trick = None;
        self.queued_trick = None;
        self.ramp_boost = false;
    }

    /// Lock onto the top of a rail or barrier when drifting onto it slowly
    fn check_grind(&mut self, obstacles: &[Obstacle]) {
        let feet = self.bottom();
        let center = self.center_x();

        let target = obstacles.iter().find(|o| {
            let top = o.top();
            o.kind.is_grindable()
                && feet >= top - GRIND_ABOVE_TOLERANCE
                && feet <= top + GRIND_BELOW_TOLERANCE
                && center >= o.x
                && center <= o.right()
                && self.vel_y.abs() < GRIND_MAX_SPEED
        });

        if let Some(obstacle) = target {
            if self.current_trick() != Some(TrickKind::Grind) {
                self.start_trick(TrickKind::Grind);
            }
            self.y = obstacle.top() - self.height;
            self.vel_y = 0.0;
            self.on_ground = false;
        }
    }

    /// Follow the ramp surface and hand out the launch boost
    fn check_ramp(&mut self, obstacles: &[Obstacle]) {
        self.on_ramp = false;

        let me = self.bounds();
        let Some(ramp) = obstacles
            .iter()
            .find(|o| o.kind == ObstacleKind::Ramp && me.overlaps(&o.bounds()))
        else {
            return;
        };
        self.on_ramp = true;

        let rb = ramp.bounds();
        let center = me.center_x();
        let half = rb.width() / 2.0;
        let apex_x = rb.left() + half;
        let along = (center - rb.left()) / rb.width();

        let (band_lo, band_hi) = RAMP_BOOST_BAND;
        if along > band_lo
            && along < band_hi
            && !self.ramp_boost
            && center < apex_x + RAMP_APEX_SLACK
            && self.vel_y > RAMP_BOOST_MIN_VELOCITY
        {
            self.vel_y = RAMP_BOOST_VELOCITY;
            self.ramp_boost = true;
            self.on_ground = false;
            if self.trick.is_none() {
                self.start_trick(TrickKind::Ollie);
            }
            log::debug!("Ramp boost on obstacle {}", ramp.id);
        }

        let surface_y = ramp_surface_y(&rb, center);
        if self.bottom() > surface_y {
            self.y = surface_y - self.height;
            self.on_ground = false;
            if self.vel_y > 0.0 {
                self.vel_y = (self.vel_y * 0.5).max(RAMP_MIN_DESCENT);
            }
        }
    }
}

/// Height of a triangular ramp's surface at `x` (apex at the horizontal center)
pub fn ramp_surface_y(ramp: &Aabb, x: f32) -> f32 {
    let half = ramp.width() / 2.0;
    if half <= 0.0 {
        return ramp.bottom();
    }
    let rise_per_unit = (ramp.bottom() - ramp.top()) / half;
    let apex_x = ramp.left() + half;
    if x < apex_x {
        ramp.bottom() - (x - ramp.left()) * rise_per_unit
    } else {
        ramp.top() + (x - apex_x) * rise_per_unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOLD_DOWN_JUMP: KeyState = KeyState {
        left: false,
        right: false,
        down: true,
        up: false,
        jump: true,
    };

    fn hold(f: impl FnOnce(&mut KeyState)) -> KeyState {
        let mut keys = KeyState::default();
        f(&mut keys);
        keys
    }

    /// Skater in the air, well above the ground, not moving vertically
    fn airborne() -> Player {
        let mut p = Player::new();
        p.on_ground = false;
        p.y = 200.0;
        p.vel_y = -10.0;
        p
    }

    #[test]
    fn test_queued_trick_consumed_by_jump() {
        let mut p = Player::new();
        assert!(p.on_ground);

        // Down and Space go down on the same tick
        p.update(&HOLD_DOWN_JUMP, &[]);

        let trick = p.trick.expect("jump starts a trick");
        assert_eq!(trick.kind, TrickKind::Spin360);
        assert_eq!(trick.duration, 40);
        assert_eq!(p.queued_trick, None);
        assert!(!p.on_ground);
        assert!(p.vel_y < 0.0);
    }

    #[test]
    fn test_plain_jump_is_ollie() {
        let mut p = Player::new();
        p.update(&hold(|k| k.up = true), &[]);
        assert_eq!(p.current_trick(), Some(TrickKind::Ollie));
        assert!((p.vel_y - (JUMP_POWER + GRAVITY)).abs() < 1e-4);
    }

    #[test]
    fn test_queue_needs_fresh_press_and_last_press_wins() {
        let mut p = Player::new();
        let left = hold(|k| k.left = true);

        p.update(&left, &[]);
        assert_eq!(p.queued_trick, Some(TrickKind::Kickflip));

        // Holding does nothing new; pressing Right overwrites the queue
        p.update(&left, &[]);
        assert_eq!(p.queued_trick, Some(TrickKind::Kickflip));
        p.update(&hold(|k| k.right = true), &[]);
        assert_eq!(p.queued_trick, Some(TrickKind::Heelflip));

        p.update(&hold(|k| k.jump = true), &[]);
        assert_eq!(p.current_trick(), Some(TrickKind::Heelflip));
        assert_eq!(p.queued_trick, None);
    }

    #[test]
    fn test_held_key_starts_trick_in_air() {
        let mut p = airborne();
        p.update(&hold(|k| k.right = true), &[]);
        assert_eq!(p.current_trick(), Some(TrickKind::Heelflip));
    }

    #[test]
    fn test_combo_window_open_before_15() {
        let mut p = airborne();
        p.start_trick(TrickKind::Ollie);
        if let Some(t) = p.trick.as_mut() {
            t.progress = 14;
        }
        p.update(&hold(|k| k.left = true), &[]);
        let trick = p.trick.expect("trick active");
        assert_eq!(trick.kind, TrickKind::Kickflip);
        // Fresh trick, advanced once this tick
        assert_eq!(trick.progress, 1);
    }

    #[test]
    fn test_combo_window_closed_at_15() {
        let mut p = airborne();
        p.start_trick(TrickKind::Ollie);
        if let Some(t) = p.trick.as_mut() {
            t.progress = 15;
        }
        p.update(&hold(|k| k.left = true), &[]);
        let trick = p.trick.expect("trick active");
        assert_eq!(trick.kind, TrickKind::Ollie);
        assert_eq!(trick.progress, 16);
    }

    #[test]
    fn test_early_landing_forfeits_trick() {
        let mut p = Player::new();
        p.update(&hold(|k| k.left = true), &[]);
        p.update(&hold(|k| k.jump = true), &[]);
        assert_eq!(p.current_trick(), Some(TrickKind::Kickflip));

        // Slam back to the ground long before 30 ticks have passed
        p.vel_y = 50.0;
        let landed = p.update(&KeyState::NONE, &[]);
        assert_eq!(landed, None);
        assert!(p.on_ground);
        assert_eq!(p.trick, None);
        assert_eq!(p.queued_trick, None);
        assert!(!p.ramp_boost);
    }

    #[test]
    fn test_completed_ollie_pays_on_landing() {
        let mut p = Player::new();
        p.update(&hold(|k| k.jump = true), &[]);

        let mut paid = Vec::new();
        for _ in 0..60 {
            if let Some(landed) = p.update(&KeyState::NONE, &[]) {
                paid.push(landed);
            }
        }
        // -15 takeoff at 0.8 gravity stays up well past 20 ticks
        assert_eq!(paid.len(), 1);
        assert_eq!(paid[0].kind, TrickKind::Ollie);
        assert_eq!(paid[0].bonus, 10);
        assert!(p.on_ground);
        assert_eq!(p.trick, None);
    }

    #[test]
    fn test_completion_while_grounded_pays_immediately() {
        let mut p = Player::new();
        p.start_trick(TrickKind::Kickflip);
        p.ramp_boost = true;
        if let Some(t) = p.trick.as_mut() {
            t.progress = 29;
        }
        let landed = p.update(&KeyState::NONE, &[]).expect("paid out");
        assert_eq!(landed.bonus, 45);
        assert!(landed.boosted);
        assert_eq!(p.trick, None);
        assert!(!p.ramp_boost);
    }

    #[test]
    fn test_boosted_spin_pays_75() {
        let mut p = airborne();
        p.start_trick(TrickKind::Spin360);
        p.ramp_boost = true;
        if let Some(t) = p.trick.as_mut() {
            t.progress = 39;
        }
        assert_eq!(p.update(&KeyState::NONE, &[]), None);
        assert_eq!(p.trick.map(|t| t.bonus), Some(75));

        p.vel_y = 250.0;
        let landed = p.update(&KeyState::NONE, &[]).expect("paid out");
        assert_eq!(landed.kind, TrickKind::Spin360);
        assert_eq!(landed.bonus, 75);
    }

    #[test]
    fn test_grind_engages_on_barrier_top() {
        let mut p = airborne();
        let barrier = Obstacle::new(1, ObstacleKind::Barrier, p.center_x() - 20.0);
        // Feet 5 below the barrier top after this tick's gravity step
        p.vel_y = -GRAVITY;
        p.y = barrier.top() + 5.0 - p.height;

        p.update(&KeyState::NONE, std::slice::from_ref(&barrier));

        assert_eq!(p.current_trick(), Some(TrickKind::Grind));
        assert_eq!(p.bottom(), barrier.top());
        assert_eq!(p.vel_y, 0.0);
        assert!(!p.on_ground);
    }

    #[test]
    fn test_grind_needs_slow_vertical_speed() {
        let mut p = airborne();
        let rail = Obstacle::new(1, ObstacleKind::Rail, p.center_x() - 20.0);
        p.y = rail.top() - 3.0 - p.height;
        p.vel_y = 2.5;
        p.update(&KeyState::NONE, std::slice::from_ref(&rail));
        assert_ne!(p.current_trick(), Some(TrickKind::Grind));
    }

    #[test]
    fn test_grind_is_sustained_without_restarting() {
        let mut p = airborne();
        let rail = Obstacle::new(1, ObstacleKind::Rail, p.center_x() - 20.0);
        p.vel_y = 0.0;
        p.y = rail.top() - p.height;

        let obstacles = [rail];
        p.update(&KeyState::NONE, &obstacles);
        p.update(&KeyState::NONE, &obstacles);
        p.update(&KeyState::NONE, &obstacles);
        let trick = p.trick.expect("grinding");
        assert_eq!(trick.kind, TrickKind::Grind);
        assert_eq!(trick.progress, 2);
    }

    #[test]
    fn test_ramp_boost_in_band() {
        let mut p = airborne();
        // Skater center at 30% of the ramp width
        let ramp = Obstacle::new(1, ObstacleKind::Ramp, p.center_x() - 18.0);
        // Low enough to overlap the ramp box, already rising
        p.y = ramp.top() - p.height + 10.0;
        p.vel_y = -5.0 - GRAVITY;

        p.update(&KeyState::NONE, std::slice::from_ref(&ramp));

        assert!(p.ramp_boost);
        assert!(p.on_ramp);
        assert_eq!(p.vel_y, RAMP_BOOST_VELOCITY);
        assert_eq!(p.current_trick(), Some(TrickKind::Ollie));
    }

    #[test]
    fn test_ramp_boost_skipped_when_rising_fast() {
        let mut p = airborne();
        let ramp = Obstacle::new(1, ObstacleKind::Ramp, p.center_x() - 18.0);
        p.y = ramp.top() - p.height + 20.0;
        p.vel_y = -12.0;
        p.update(&KeyState::NONE, std::slice::from_ref(&ramp));
        assert!(!p.ramp_boost);
    }

    #[test]
    fn test_ramp_boost_granted_once() {
        let mut p = airborne();
        let ramp = Obstacle::new(1, ObstacleKind::Ramp, p.center_x() - 18.0);
        let obstacles = [ramp];
        p.y = obstacles[0].top() - p.height + 10.0;
        p.vel_y = 0.0;

        p.update(&KeyState::NONE, &obstacles);
        assert!(p.ramp_boost);

        // Drag the skater back into the band on later ticks while still airborne
        for _ in 0..5 {
            p.y = obstacles[0].top() - p.height + 10.0;
            p.vel_y = 0.0;
            p.update(&KeyState::NONE, &obstacles);
            assert!(p.vel_y > RAMP_BOOST_VELOCITY);
        }
    }

    #[test]
    fn test_boost_from_rolling_launches_skater() {
        let mut p = Player::new();
        let ramp = Obstacle::new(1, ObstacleKind::Ramp, p.center_x() - 18.0);
        p.update(&KeyState::NONE, std::slice::from_ref(&ramp));
        assert!(p.ramp_boost);
        assert!(!p.on_ground);
        assert!(p.bottom() < GROUND_Y);
    }

    #[test]
    fn test_ramp_surface_shape() {
        let ramp = Obstacle::new(1, ObstacleKind::Ramp, 100.0).bounds();
        assert_eq!(ramp_surface_y(&ramp, 100.0), GROUND_Y);
        assert_eq!(ramp_surface_y(&ramp, 130.0), GROUND_Y - 50.0);
        assert_eq!(ramp_surface_y(&ramp, 160.0), GROUND_Y);
        assert!((ramp_surface_y(&ramp, 115.0) - (GROUND_Y - 25.0)).abs() < 1e-4);
    }

    #[test]
    fn test_descending_ramp_damps_fall() {
        let mut p = airborne();
        // Center on the falling half, 3/4 across
        let ramp = Obstacle::new(1, ObstacleKind::Ramp, p.center_x() - 45.0);
        p.ramp_boost = true;
        p.y = ramp.top() - p.height + 20.0;
        p.vel_y = 6.0;
        p.update(&KeyState::NONE, std::slice::from_ref(&ramp));
        assert!(p.on_ramp);
        assert!(!p.on_ground);
        assert!((p.vel_y - (6.0 + GRAVITY) * 0.5).abs() < 1e-4);
        let surface = ramp_surface_y(&ramp.bounds(), p.center_x());
        assert!((p.bottom() - surface).abs() < 1e-4);
    }
}
