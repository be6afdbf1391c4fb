//! Game settings and preferences
//!
//! Persisted separately from high scores.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Graphics quality levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    Low,
    Medium,
    #[default]
    High,
}

impl QualityPreset {
    /// Parse a preset name from the settings menu
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }
}

/// Input method the HUD advertises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ControlScheme {
    #[default]
    Keyboard,
    Touch,
}

impl ControlScheme {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "keyboard" => Some(ControlScheme::Keyboard),
            "touch" => Some(ControlScheme::Touch),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sound effects volume (0.0 - 1.0)
    pub sound_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Graphics quality preset
    pub graphics: QualityPreset,
    pub controls: ControlScheme,
    pub fullscreen: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_volume: 0.5,
            music_volume: 0.5,
            graphics: QualityPreset::High,
            controls: ControlScheme::Keyboard,
            fullscreen: false,
        }
    }
}

impl Settings {
    /// Set sound effects volume, clamped to 0.0 - 1.0
    pub fn set_sound_volume(&mut self, volume: f32) {
        self.sound_volume = volume.clamp(0.0, 1.0);
    }

    /// Set music volume, clamped to 0.0 - 1.0
    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
    }

    /// Volumes as whole percentages, as the settings menu shows them
    pub fn volume_percentages(&self) -> (u32, u32) {
        (
            (self.sound_volume * 100.0).round() as u32,
            (self.music_volume * 100.0).round() as u32,
        )
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "snakeSettings";

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable settings at {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Write settings to a JSON file
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.volume_percentages(), (50, 50));
        assert_eq!(settings.graphics, QualityPreset::High);
        assert!(!settings.fullscreen);
    }

    #[test]
    fn test_volume_clamped() {
        let mut settings = Settings::default();
        settings.set_sound_volume(1.7);
        settings.set_music_volume(-0.2);
        assert_eq!(settings.volume_percentages(), (100, 0));
    }

    #[test]
    fn test_parse_presets() {
        assert_eq!(QualityPreset::from_str("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(ControlScheme::from_str("Touch"), Some(ControlScheme::Touch));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"graphics":"low"}"#).unwrap();
        assert_eq!(settings.graphics, QualityPreset::Low);
        assert_eq!(settings.sound_volume, 0.5);
        assert_eq!(settings.controls, ControlScheme::Keyboard);
    }
}
