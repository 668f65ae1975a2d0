//! Trick catalogue and the in-progress trick record

use serde::{Deserialize, Serialize};

use super::input::KeyState;
use crate::consts::{RAMP_BONUS_DEN, RAMP_BONUS_NUM};

/// Every trick the skater can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrickKind {
    /// Plain jump
    Ollie,
    Kickflip,
    Heelflip,
    Spin360,
    /// Sliding along the top of a rail or barrier
    Grind,
}

impl TrickKind {
    /// Length of the trick in ticks
    pub fn duration(self) -> u32 {
        match self {
            TrickKind::Ollie => 20,
            TrickKind::Kickflip | TrickKind::Heelflip => 30,
            TrickKind::Spin360 => 40,
            TrickKind::Grind => 60,
        }
    }

    /// Points awarded for landing the trick
    pub fn base_bonus(self) -> u32 {
        match self {
            TrickKind::Ollie => 10,
            TrickKind::Kickflip | TrickKind::Heelflip => 30,
            TrickKind::Spin360 => 50,
            TrickKind::Grind => 40,
        }
    }

    /// Bonus with the ramp multiplier applied (x1.5, rounded down)
    pub fn bonus(self, ramp_boost: bool) -> u32 {
        let base = self.base_bonus();
        if ramp_boost {
            base * RAMP_BONUS_NUM / RAMP_BONUS_DEN
        } else {
            base
        }
    }

    /// HUD name
    pub fn label(self) -> &'static str {
        match self {
            TrickKind::Ollie => "OLLIE",
            TrickKind::Kickflip => "KICKFLIP",
            TrickKind::Heelflip => "HEELFLIP",
            TrickKind::Spin360 => "360° SPIN",
            TrickKind::Grind => "GRIND",
        }
    }

    /// Flip trick selected by the directional keys, Left > Right > Down
    pub fn from_keys(keys: &KeyState) -> Option<TrickKind> {
        if keys.left {
            Some(TrickKind::Kickflip)
        } else if keys.right {
            Some(TrickKind::Heelflip)
        } else if keys.down {
            Some(TrickKind::Spin360)
        } else {
            None
        }
    }
}

/// A trick in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    pub kind: TrickKind,
    /// Ticks since the trick started
    pub progress: u32,
    pub duration: u32,
    /// Set once progress reaches duration; the bonus is latched at that point
    pub completed: bool,
    pub bonus: u32,
}

impl Trick {
    pub fn new(kind: TrickKind) -> Self {
        Self {
            kind,
            progress: 0,
            duration: kind.duration(),
            completed: false,
            bonus: 0,
        }
    }

    /// Advance one tick. Returns true on the tick the trick completes.
    pub fn advance(&mut self, ramp_boost: bool) -> bool {
        self.progress += 1;
        if self.progress >= self.duration && !self.completed {
            self.completed = true;
            self.bonus = self.kind.bonus(ramp_boost);
            return true;
        }
        false
    }

    /// Fraction of the trick done, 0..=1
    pub fn fraction(&self) -> f32 {
        if self.duration == 0 {
            return 1.0;
        }
        (self.progress as f32 / self.duration as f32).min(1.0)
    }

    /// Body rotation in degrees (360 spin only)
    pub fn rotation(&self) -> f32 {
        match self.kind {
            TrickKind::Spin360 => self.fraction() * 360.0,
            _ => 0.0,
        }
    }

    /// Board flip angle in degrees; heelflips turn the other way
    pub fn board_flip(&self) -> f32 {
        match self.kind {
            TrickKind::Kickflip => self.fraction() * 360.0,
            TrickKind::Heelflip => -self.fraction() * 360.0,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_bonus_rounds_down() {
        assert_eq!(TrickKind::Spin360.bonus(true), 75);
        assert_eq!(TrickKind::Kickflip.bonus(true), 45);
        assert_eq!(TrickKind::Ollie.bonus(true), 15);
        assert_eq!(TrickKind::Grind.bonus(true), 60);
        assert_eq!(TrickKind::Heelflip.bonus(false), 30);
    }

    #[test]
    fn test_bonus_latched_once() {
        let mut trick = Trick::new(TrickKind::Ollie);
        for _ in 0..19 {
            assert!(!trick.advance(false));
        }
        assert!(trick.advance(false));
        assert_eq!(trick.bonus, 10);

        // A boost arriving after completion must not change the latched bonus
        assert!(!trick.advance(true));
        assert_eq!(trick.bonus, 10);
    }

    #[test]
    fn test_key_priority() {
        let all = KeyState {
            left: true,
            right: true,
            down: true,
            ..Default::default()
        };
        assert_eq!(TrickKind::from_keys(&all), Some(TrickKind::Kickflip));
        let right_down = KeyState {
            right: true,
            down: true,
            ..Default::default()
        };
        assert_eq!(TrickKind::from_keys(&right_down), Some(TrickKind::Heelflip));
        assert_eq!(TrickKind::from_keys(&KeyState::NONE), None);
    }

    #[test]
    fn test_angles_follow_progress() {
        let mut spin = Trick::new(TrickKind::Spin360);
        for _ in 0..20 {
            spin.advance(false);
        }
        assert!((spin.rotation() - 180.0).abs() < 1e-4);
        assert_eq!(spin.board_flip(), 0.0);

        let mut heel = Trick::new(TrickKind::Heelflip);
        for _ in 0..15 {
            heel.advance(false);
        }
        assert!((heel.board_flip() + 180.0).abs() < 1e-4);
    }
}
