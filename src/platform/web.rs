//! Browser binding
//!
//! JS owns the canvas, DOM HUD and audio elements; it forwards input and
//! `requestAnimationFrame` timestamps here and reads back JSON snapshots and
//! notifications.

use std::collections::VecDeque;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::audio::{AudioCommand, AudioMixer};
use crate::highscores::HighScores;
use crate::hud::{HudView, StatusLine};
use crate::platform::input::{SwipeTracker, action_for_key, apply_action};
use crate::settings::{ControlScheme, QualityPreset, Settings};
use crate::sim::{Cell, Collectible, Direction, GameEvent, GamePhase, Session};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    log::info!("Snake Arcade starting...");
}

/// What the renderer needs for one frame
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameSnapshot<'a> {
    head: Cell,
    heading: Direction,
    body: &'a VecDeque<Cell>,
    collectibles: &'a [Collectible],
    phase: GamePhase,
    score: u64,
    level: u32,
    lives: u32,
    timer: String,
    power_ups: String,
    status: Option<String>,
    best_score: Option<u64>,
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session,
    high_scores: HighScores,
    settings: Settings,
    mixer: AudioMixer,
    status: StatusLine,
    swipe: SwipeTracker,
    /// Notifications drained from the session but not yet read by JS
    events: Vec<GameEvent>,
    /// Audio commands not yet read by JS
    audio: Vec<AudioCommand>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64) -> WebGame {
        let settings = Settings::load();
        let mut mixer = AudioMixer::new(&settings);
        let audio = mixer.start_music().into_iter().collect();
        WebGame {
            session: Session::new(seed as u64),
            high_scores: HighScores::load(),
            settings,
            mixer,
            status: StatusLine::default(),
            swipe: SwipeTracker::default(),
            events: Vec::new(),
            audio,
        }
    }

    /// Handle a keydown; returns true if the key was consumed
    pub fn key_down(&mut self, key: &str) -> bool {
        match action_for_key(key) {
            Some(action) => apply_action(&mut self.session, action),
            None => false,
        }
    }

    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.swipe.touch_start(x, y);
    }

    pub fn touch_end(&mut self, x: f32, y: f32) {
        if let Some(direction) = self.swipe.touch_end(x, y) {
            self.session.enqueue_direction(direction);
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.session.set_paused(paused);
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    /// Drive the simulation from a `requestAnimationFrame` timestamp
    pub fn advance_frame(&mut self, timestamp_ms: f64) -> u32 {
        let ticks = self.session.advance_frame(timestamp_ms);
        let drained = self.session.drain_events();
        self.status.update(&drained, timestamp_ms);
        self.audio.extend(self.mixer.handle_all(&drained));
        self.events.extend(drained);
        ticks
    }

    /// Notifications since the last call, as a JSON array
    pub fn take_events_json(&mut self) -> String {
        let events = std::mem::take(&mut self.events);
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    /// Audio commands since the last call, as a JSON array
    pub fn take_audio_json(&mut self) -> String {
        let audio = std::mem::take(&mut self.audio);
        serde_json::to_string(&audio).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn set_sound_volume(&mut self, volume: f32) {
        self.settings.set_sound_volume(volume);
        self.apply_settings();
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.settings.set_music_volume(volume);
        self.apply_settings();
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.audio.extend(self.mixer.set_muted(muted));
    }

    /// Select a quality preset by name; returns false for unknown names
    pub fn set_graphics(&mut self, name: &str) -> bool {
        let Some(preset) = QualityPreset::from_str(name) else {
            log::warn!("Unknown quality preset {:?}", name);
            return false;
        };
        self.settings.graphics = preset;
        self.apply_settings();
        true
    }

    /// Select a control scheme by name; returns false for unknown names
    pub fn set_controls(&mut self, name: &str) -> bool {
        let Some(controls) = ControlScheme::from_str(name) else {
            log::warn!("Unknown control scheme {:?}", name);
            return false;
        };
        self.settings.controls = controls;
        self.apply_settings();
        true
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.settings.fullscreen = fullscreen;
        self.apply_settings();
    }

    pub fn settings_json(&self) -> String {
        serde_json::to_string(&self.settings).unwrap_or_default()
    }

    /// Current frame state as JSON
    pub fn snapshot_json(&self) -> String {
        let hud = HudView::from_session(&self.session, &self.status);
        let state = &self.session.state;
        let snapshot = FrameSnapshot {
            head: state.snake.head,
            heading: state.snake.heading,
            body: &state.snake.body,
            collectibles: &state.collectibles,
            phase: state.phase,
            score: hud.score,
            level: hud.level,
            lives: hud.lives,
            timer: hud.timer.clone(),
            power_ups: hud.power_up_summary(),
            status: hud.status,
            best_score: self.high_scores.top_score(),
        };
        serde_json::to_string(&snapshot).unwrap_or_default()
    }

    /// Record the finished run; returns the rank (1-based) or 0 if it didn't place
    pub fn save_high_score(&mut self, name: &str) -> u32 {
        let rank = self
            .high_scores
            .record(name, &self.session, js_sys::Date::now());
        if rank.is_some() {
            self.high_scores.save();
        }
        rank.map(|r| r as u32).unwrap_or(0)
    }

    /// Rank the current score would take (1-based), or 0 if it wouldn't place
    pub fn high_score_rank(&self) -> u32 {
        self.high_scores
            .potential_rank(self.session.state.score)
            .map(|r| r as u32)
            .unwrap_or(0)
    }

    pub fn high_scores_json(&self) -> String {
        serde_json::to_string(&self.high_scores.entries).unwrap_or_else(|_| "[]".to_string())
    }
}

impl WebGame {
    /// Persist the settings and hand new volumes to the mixer
    fn apply_settings(&mut self) {
        self.settings.save();
        self.audio.extend(self.mixer.apply_settings(&self.settings));
    }
}
