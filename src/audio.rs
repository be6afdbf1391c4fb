//! Sound cue selection
//!
//! Turns simulation notifications into playback commands for whatever audio
//! backend the platform provides. Playback itself happens outside the crate;
//! a backend that fails to play a cue has no effect on the game.

use serde::Serialize;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundEffect {
    /// Snake ran into itself
    Collision,
    /// Food eaten
    Eat,
    /// Power-up collected
    PowerUp,
    /// Run ended
    Death,
    LevelUp,
    Achievement,
}

impl SoundEffect {
    /// Cue for a notification, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Collision { .. } => Some(SoundEffect::Collision),
            GameEvent::Ate { .. } => Some(SoundEffect::Eat),
            GameEvent::PowerUpCollected { .. } => Some(SoundEffect::PowerUp),
            GameEvent::GameOver { .. } => Some(SoundEffect::Death),
            GameEvent::LevelUp { .. } => Some(SoundEffect::LevelUp),
            GameEvent::AchievementUnlocked { .. } => Some(SoundEffect::Achievement),
            GameEvent::PowerUpExpired { .. }
            | GameEvent::Paused
            | GameEvent::Resumed
            | GameEvent::Restarted => None,
        }
    }
}

/// What the audio backend should do
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AudioCommand {
    /// Restart a one-shot effect from the beginning
    Play { effect: SoundEffect, volume: f32 },
    /// Start or resume the looping background track
    StartMusic { volume: f32 },
    /// Pause the background track
    StopMusic,
}

/// Audio state for the game
#[derive(Debug, Clone)]
pub struct AudioMixer {
    sound_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
}

impl AudioMixer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            sound_volume: settings.sound_volume,
            music_volume: settings.music_volume,
            muted: false,
            music_playing: false,
        }
    }

    /// Pick up changed volumes. Returns a command to re-level playing music.
    pub fn apply_settings(&mut self, settings: &Settings) -> Option<AudioCommand> {
        self.sound_volume = settings.sound_volume;
        self.music_volume = settings.music_volume;
        self.music_command()
    }

    pub fn set_muted(&mut self, muted: bool) -> Option<AudioCommand> {
        self.muted = muted;
        if muted {
            Some(AudioCommand::StopMusic)
        } else {
            self.music_command()
        }
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    /// Start the ambient track (session start)
    pub fn start_music(&mut self) -> Option<AudioCommand> {
        self.music_playing = true;
        self.music_command()
    }

    fn music_command(&self) -> Option<AudioCommand> {
        (self.music_playing && !self.muted).then_some(AudioCommand::StartMusic {
            volume: self.music_volume,
        })
    }

    /// Commands for one notification
    pub fn handle(&mut self, event: &GameEvent) -> Option<AudioCommand> {
        match event {
            GameEvent::Paused => {
                self.music_playing = false;
                Some(AudioCommand::StopMusic)
            }
            GameEvent::Resumed | GameEvent::Restarted => self.start_music(),
            _ => {
                let effect = SoundEffect::for_event(event)?;
                if self.muted {
                    return None;
                }
                Some(AudioCommand::Play {
                    effect,
                    volume: self.sound_volume,
                })
            }
        }
    }

    /// Commands for a drained batch of notifications, in order
    pub fn handle_all(&mut self, events: &[GameEvent]) -> Vec<AudioCommand> {
        events.iter().filter_map(|e| self.handle(e)).collect()
    }
}
