//! Background music
//!
//! The game only needs to start a looping track when a round begins and stop
//! it when the round ends. Backends may fail (missing file, no device); the
//! controller logs and carries on so the simulation is never affected.

use anyhow::Result;

/// Default music volume (0.0 - 1.0)
pub const DEFAULT_MUSIC_VOLUME: f32 = 0.5;

/// A backend that can loop a single background track.
/// Implementations: platform audio players, `Silence` (headless/testing).
pub trait Soundtrack {
    /// Start looping from the beginning
    fn play_looping(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
    /// Set volume (0.0..=1.0)
    fn set_volume(&mut self, volume: f32) -> Result<()>;
}

/// Backend that plays nothing
#[derive(Debug, Default)]
pub struct Silence;

impl Soundtrack for Silence {
    fn play_looping(&mut self) -> Result<()> {
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        Ok(())
    }

    fn set_volume(&mut self, _volume: f32) -> Result<()> {
        Ok(())
    }
}

/// Tracks whether music is playing and shields the game from backend errors
pub struct MusicController {
    track: Option<Box<dyn Soundtrack>>,
    playing: bool,
}

impl Default for MusicController {
    fn default() -> Self {
        Self::silent()
    }
}

impl std::fmt::Debug for MusicController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MusicController")
            .field("has_track", &self.track.is_some())
            .field("playing", &self.playing)
            .finish()
    }
}

impl MusicController {
    pub fn new(mut track: Box<dyn Soundtrack>) -> Self {
        if let Err(e) = track.set_volume(DEFAULT_MUSIC_VOLUME) {
            log::warn!("Failed to set music volume: {e:#}");
        }
        Self {
            track: Some(track),
            playing: false,
        }
    }

    /// No background track configured
    pub fn silent() -> Self {
        Self {
            track: None,
            playing: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Start the loop unless it is already running
    pub fn start(&mut self) {
        if self.playing {
            return;
        }
        let Some(track) = self.track.as_mut() else {
            log::debug!("No background track configured");
            return;
        };
        match track.play_looping() {
            Ok(()) => {
                self.playing = true;
                log::info!("Background music started");
            }
            Err(e) => log::warn!("Failed to start background music: {e:#}"),
        }
    }

    pub fn stop(&mut self) {
        if !self.playing {
            return;
        }
        self.playing = false;
        if let Some(track) = self.track.as_mut() {
            match track.stop() {
                Ok(()) => log::info!("Background music stopped"),
                Err(e) => log::warn!("Failed to stop background music: {e:#}"),
            }
        }
    }
}
