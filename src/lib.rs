//! Snake Arcade - A grid-based arcade snake
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, snake, collectibles, clock, achievements)
//! - `platform`: Input adapters and the browser binding
//! - `highscores`: Top-10 leaderboard
//! - `settings`: Player preferences
//! - `audio`: Sound cue selection for simulation notifications
//! - `hud`: Read-only HUD view model

pub mod audio;
pub mod highscores;
pub mod hud;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{ControlScheme, QualityPreset, Settings};
pub use sim::Session;

/// Game configuration constants
pub mod consts {
    /// Grid dimensions (cells)
    pub const GRID_WIDTH: i32 = 20;
    pub const GRID_HEIGHT: i32 = 16;

    /// Lives at the start of a run
    pub const START_LIVES: u32 = 3;
    /// Snake length target at the start of a run (also the floor after a crash)
    pub const START_LENGTH: usize = 5;
    /// Length lost on a self-collision
    pub const CRASH_LENGTH_PENALTY: usize = 3;

    /// Baseline snake speed (ticks per second)
    pub const BASE_SPEED: u32 = 5;
    /// Snake speed while the Speed power-up is active
    pub const BOOSTED_SPEED: u32 = 10;

    /// Power-up window (ms); reapplying refreshes to this value
    pub const POWER_UP_DURATION_MS: f32 = 10_000.0;
    /// Nominal frame duration (60 Hz) used to decay power-up timers each tick
    pub const FRAME_DURATION_MS: f32 = 1000.0 / 60.0;

    /// Score value of a food item
    pub const FOOD_VALUE: u64 = 10;
    /// A level-up happens whenever eating food lands the score on a multiple of this
    pub const LEVEL_UP_SCORE_STEP: u64 = 50;
    /// Difficulty added per level
    pub const DIFFICULTY_STEP: f32 = 0.1;

    /// Replenish collectibles while fewer than this many are on the grid
    pub const MAX_COLLECTIBLES: usize = 3;
    /// Probability a replenished collectible is food (otherwise a power-up)
    pub const FOOD_SPAWN_CHANCE: f64 = 0.8;

    /// Maximum buffered direction inputs
    pub const MAX_QUEUED_DIRECTIONS: usize = 3;

    /// How long HUD status messages stay visible (ms)
    pub const STATUS_MESSAGE_MS: f64 = 5000.0;
}
