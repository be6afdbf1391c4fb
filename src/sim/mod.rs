//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Ticks are driven by the frame clock, never scheduled here
//! - Seeded RNG only
//! - Stable iteration order (collectibles in spawn order)
//! - No rendering or platform dependencies; side effects leave as `GameEvent`s

pub mod achievements;
pub mod clock;
pub mod grid;
pub mod session;
pub mod state;
pub mod tick;

pub use achievements::{Achievement, AchievementId, Achievements};
pub use clock::SimClock;
pub use grid::{Cell, Grid};
pub use session::Session;
pub use state::{
    ActivePowerUp, Collectible, CollectibleKind, Direction, GameEvent, GamePhase, GameState,
    PowerUpKind, Snake,
};
pub use tick::{TickOutcome, activate_power_up, tick};
