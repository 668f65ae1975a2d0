//! Game flow: title menu, rounds and the game-over screen
//!
//! Wraps a `GameState` with the pieces that live outside the simulation:
//! background music and the session leaderboard.

use crate::audio::{MusicController, Soundtrack};
use crate::highscores::HighScores;
use crate::sim::{FrameEvent, GamePhase, GameState, KeyState, Snapshot, tick};
use crate::tuning::Tuning;

/// Menu-level commands (one-shot, not held keys)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Space / Enter: start from the menu, restart after game over
    Confirm,
    /// Escape: back to the menu from the game-over screen
    Back,
}

/// The game session
#[derive(Debug)]
pub struct Game {
    state: GameState,
    music: MusicController,
    high_scores: HighScores,
    /// Seed the session was created with; later rounds derive from it
    session_seed: u64,
    rounds_started: u64,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::with_tuning(seed, tuning),
            music: MusicController::silent(),
            high_scores: HighScores::new(),
            session_seed: seed,
            rounds_started: 0,
        }
    }

    /// Attach a background track
    pub fn with_soundtrack(mut self, track: Box<dyn Soundtrack>) -> Self {
        self.music = MusicController::new(track);
        self
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn music_playing(&self) -> bool {
        self.music.is_playing()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Handle a menu command
    pub fn command(&mut self, command: Command) {
        match (self.state.phase, command) {
            (GamePhase::Menu, Command::Confirm) => {
                // The menu already holds a fresh round after startup or Back
                if self.rounds_started > 0 {
                    self.reset();
                } else {
                    self.state.phase = GamePhase::Playing;
                    self.rounds_started = 1;
                    log::info!("Round started with seed {}", self.state.seed);
                }
                self.music.start();
            }
            (GamePhase::GameOver, Command::Confirm) => {
                self.reset();
                self.music.start();
            }
            (GamePhase::GameOver, Command::Back) => {
                self.state.phase = GamePhase::Menu;
                self.music.stop();
            }
            _ => {}
        }
    }

    /// Throw away the current round and start another one
    pub fn reset(&mut self) {
        let seed = self.round_seed(self.rounds_started);
        self.rounds_started += 1;
        self.state.reset(seed);
    }

    /// Seed for the nth round of this session; round 0 uses the session seed
    fn round_seed(&self, round: u64) -> u64 {
        if round == 0 {
            return self.session_seed;
        }
        // Golden-ratio stride keeps consecutive rounds decorrelated
        self.session_seed
            .wrapping_add(round.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Advance one fixed tick with the currently held keys
    pub fn frame(&mut self, keys: &KeyState) -> FrameEvent {
        let event = tick(&mut self.state, keys);
        if event.terminal {
            self.music.stop();
            let rank = self.high_scores.add_score(
                self.state.score,
                self.state.time_ticks,
                self.state.top_speed,
            );
            if let Some(rank) = rank {
                log::info!("New high score #{}: {}", rank, self.state.score);
            }
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::tests::RecordingTrack;
    use crate::consts::*;
    use crate::sim::ObstacleKind;

    fn crash_now(game: &mut Game) -> FrameEvent {
        game.state.place_obstacle(ObstacleKind::Barrier, PLAYER_X + PLAYER_WIDTH);
        game.frame(&KeyState::NONE)
    }

    #[test]
    fn test_menu_to_playing_starts_music() {
        let track = RecordingTrack::default();
        let log = track.log.clone();
        let mut game = Game::new(3, Tuning::default()).with_soundtrack(Box::new(track));

        assert_eq!(game.phase(), GamePhase::Menu);
        // Ticks in the menu do nothing
        assert_eq!(game.frame(&KeyState::NONE), FrameEvent::default());

        game.command(Command::Confirm);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert!(game.music_playing());
        assert_eq!(*log.borrow(), vec!["volume", "play"]);
    }

    #[test]
    fn test_crash_stops_music_and_records_score() {
        let mut game =
            Game::new(3, Tuning::default()).with_soundtrack(Box::new(RecordingTrack::default()));
        game.command(Command::Confirm);
        game.state.score = 120;

        let event = crash_now(&mut game);
        assert!(event.terminal);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert!(!game.music_playing());
        assert_eq!(game.high_scores().top_score(), Some(120));
    }

    #[test]
    fn test_restart_resets_round() {
        let mut game = Game::new(3, Tuning::default());
        game.command(Command::Confirm);
        game.state.score = 40;
        crash_now(&mut game);

        game.command(Command::Confirm);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.state().score, 0);
        assert!(game.state().obstacles.is_empty());
        assert_ne!(game.state().seed, 3);
    }

    #[test]
    fn test_back_to_menu_then_new_round() {
        let mut game =
            Game::new(3, Tuning::default()).with_soundtrack(Box::new(RecordingTrack::default()));
        game.command(Command::Confirm);
        crash_now(&mut game);

        game.command(Command::Back);
        assert_eq!(game.phase(), GamePhase::Menu);
        assert!(!game.music_playing());

        // Back is ignored while playing
        game.command(Command::Confirm);
        game.command(Command::Back);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.state().score, 0);
        assert_eq!(game.state().time_ticks, 0);
    }
}
