//! Session controller
//!
//! Owns the current run, the frame clock and the achievement set, and is the
//! only entry point the presentation layer drives: direction input, pause,
//! restart and frame timestamps in; drained notifications out.

use rand::Rng;

use super::achievements::Achievements;
use super::clock::SimClock;
use super::state::{Direction, GameEvent, GamePhase, GameState};
use super::tick::{TickOutcome, tick};
use crate::consts::FRAME_DURATION_MS;

#[derive(Debug, Clone)]
pub struct Session {
    pub state: GameState,
    /// Survives restarts
    pub achievements: Achievements,
    clock: SimClock,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        log::info!("New session with seed {}", seed);
        Self::from_state(GameState::new(seed))
    }

    /// Wrap an already built run (custom grid, scripted collectibles)
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            achievements: Achievements::new(),
            clock: SimClock::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Time spent playing this run (ms)
    pub fn elapsed_game_time(&self) -> f64 {
        self.clock.elapsed_game_time()
    }

    /// Buffer a direction change. Ignored while paused, after game over, or
    /// when the input buffer is full.
    pub fn enqueue_direction(&mut self, direction: Direction) -> bool {
        if self.state.phase != GamePhase::Playing {
            return false;
        }
        self.state.snake.enqueue_direction(direction)
    }

    /// Suspend or resume ticking. No effect after game over or when already
    /// in the requested state.
    pub fn set_paused(&mut self, paused: bool) {
        match (self.state.phase, paused) {
            (GamePhase::Playing, true) => {
                self.state.phase = GamePhase::Paused;
                log::info!("Paused");
                self.state.emit(GameEvent::Paused);
            }
            (GamePhase::Paused, false) => {
                self.state.phase = GamePhase::Playing;
                log::info!("Resumed");
                self.state.emit(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    pub fn toggle_pause(&mut self) {
        let paused = self.state.phase == GamePhase::Paused;
        self.set_paused(!paused);
    }

    /// Start a fresh run seeded from the current run's generator
    pub fn restart(&mut self) {
        let seed = self.state.rng.random();
        self.restart_with_seed(seed);
    }

    /// Start a fresh run. Achievements are kept; everything else resets.
    pub fn restart_with_seed(&mut self, seed: u64) {
        let pending = self.state.drain_events();
        let grid = self.state.grid;
        self.state = GameState::with_grid(seed, grid);
        self.clock = SimClock::new();
        for event in pending {
            self.state.emit(event);
        }
        self.state.emit(GameEvent::Restarted);
        log::info!("Game restarted with seed: {}", seed);
    }

    /// Feed one frame timestamp (ms) and run the ticks the elapsed time pays for.
    ///
    /// The move interval is taken from the snake's speed at the start of the
    /// frame. Timestamps are always recorded, so resuming after a pause does
    /// not replay the paused time. Returns the number of ticks run.
    pub fn advance_frame(&mut self, timestamp_ms: f64) -> u32 {
        let delta = self.clock.observe(timestamp_ms);
        if self.state.phase != GamePhase::Playing {
            return 0;
        }
        self.clock.accumulate(delta);

        let interval = self.state.snake.move_interval_ms();
        let mut ticks = 0;
        while self.clock.try_consume(interval) {
            ticks += 1;
            let outcome = tick(&mut self.state, &mut self.achievements, FRAME_DURATION_MS);
            if outcome == TickOutcome::GameOver {
                break;
            }
        }
        ticks
    }

    /// Take all notifications emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}
