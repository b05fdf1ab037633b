//! Audio dispatch
//!
//! The simulation only emits `GameEvent`s. `AudioManager` turns the sound and
//! music ones into backend calls, applying volume and mute.

use thiserror::Error;

use crate::settings::Settings;
use crate::sim::GameEvent;
pub use crate::sim::{MusicCommand, SoundEffect};

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("missing audio asset: {0}")]
    MissingAsset(String),
    #[error("audio backend error: {0}")]
    Backend(String),
}

/// Something that can actually make noise
pub trait AudioBackend {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
    fn start_music(&mut self, volume: f32) -> Result<(), AudioError>;
    fn stop_music(&mut self) -> Result<(), AudioError>;
}

/// Silent backend for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

impl AudioBackend for NullBackend {
    fn play_effect(&mut self, _effect: SoundEffect, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }

    fn start_music(&mut self, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop_music(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
            music_playing: false,
        }
    }

    /// Create with volumes taken from settings
    pub fn with_settings(backend: B, settings: &Settings) -> Self {
        let mut audio = Self::new(backend);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.muted = !settings.sound_enabled;
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute sound effects. Music is driven by explicit commands.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_sfx_volume();
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = self.backend.play_effect(effect, vol) {
            log::warn!("Failed to play {}: {}", effect.name(), e);
        }
    }

    /// Apply a music command; repeated starts do not restart the track
    pub fn music(&mut self, command: MusicCommand) {
        let result = match command {
            MusicCommand::Start if self.music_playing => return,
            MusicCommand::Stop if !self.music_playing => return,
            MusicCommand::Start => self
                .backend
                .start_music(self.master_volume * self.music_volume),
            MusicCommand::Stop => self.backend.stop_music(),
        };
        match result {
            Ok(()) => self.music_playing = command == MusicCommand::Start,
            Err(e) => log::warn!("Music {:?} failed: {}", command, e),
        }
    }

    /// Act on the audio events of one tick, in order
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::Sound(effect) => self.play(effect),
                GameEvent::Music(command) => self.music(command),
                _ => {}
            }
        }
    }
}
