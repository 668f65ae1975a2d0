//! Per-tick key snapshots and edge detection
//!
//! The input source only reports which keys are held. Fresh presses are
//! derived here by comparing against the previous tick.

use serde::{Deserialize, Serialize};

/// Which controls are held down during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub down: bool,
    pub up: bool,
    /// Space bar
    pub jump: bool,
}

impl KeyState {
    /// Nothing held
    pub const NONE: KeyState = KeyState {
        left: false,
        right: false,
        down: false,
        up: false,
        jump: false,
    };

    /// Either jump key (Space or Up) is held
    pub fn wants_jump(&self) -> bool {
        self.jump || self.up
    }
}

/// Remembers last tick's keys so held keys can be told apart from new presses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyLatch {
    previous: KeyState,
}

impl KeyLatch {
    /// Feed this tick's held keys; returns the keys that went down this tick.
    ///
    /// Must be called exactly once per tick.
    pub fn update(&mut self, held: &KeyState) -> KeyState {
        let prev = self.previous;
        self.previous = *held;
        KeyState {
            left: held.left && !prev.left,
            right: held.right && !prev.right,
            down: held.down && !prev.down,
            up: held.up && !prev.up,
            jump: held.jump && !prev.jump,
        }
    }

    /// Keys seen on the previous tick
    pub fn previous(&self) -> KeyState {
        self.previous
    }
}
