//! Game state and core simulation types
//!
//! Everything a run mutates lives in `GameState`; a restart replaces it wholesale.

use std::collections::VecDeque;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::achievements::AchievementId;
use super::grid::{Cell, Grid};
use crate::consts::*;

/// Heading of the snake on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in grid coordinates (y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Check if this direction is the exact reverse of another
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// The player's snake
#[derive(Debug, Clone)]
pub struct Snake {
    pub head: Cell,
    /// Heading used by the last committed move
    pub heading: Direction,
    /// Heading chosen for the next move
    pub pending_heading: Direction,
    /// Buffered direction inputs, oldest first
    pub direction_queue: VecDeque<Direction>,
    /// Body segments from tail to neck (head excluded)
    pub body: VecDeque<Cell>,
    /// Length the body grows (or shrinks) toward
    pub target_length: usize,
    /// Moves per second
    pub speed: u32,
}

impl Snake {
    /// A snake centered on the grid, heading right, body trailing to the left
    pub fn new(grid: &Grid, target_length: usize, speed: u32) -> Self {
        let mut snake = Self {
            head: grid.center(),
            heading: Direction::Right,
            pending_heading: Direction::Right,
            direction_queue: VecDeque::with_capacity(MAX_QUEUED_DIRECTIONS),
            body: VecDeque::with_capacity(target_length),
            target_length,
            speed,
        };
        snake.reset(grid);
        snake
    }

    /// Re-center the snake, keeping its target length and speed.
    ///
    /// The initial body never exceeds `width - 1` segments so it cannot wrap
    /// into the head; longer targets regrow through normal movement.
    pub fn reset(&mut self, grid: &Grid) {
        self.head = grid.center();
        self.heading = Direction::Right;
        self.pending_heading = Direction::Right;
        self.direction_queue.clear();

        let segments = self.target_length.min((grid.width - 1) as usize);
        self.body.clear();
        for i in (1..=segments as i32).rev() {
            self.body.push_back(grid.wrap(self.head - IVec2::new(i, 0)));
        }
    }

    /// Buffer a direction input. Returns false (and drops it) when the queue is full.
    pub fn enqueue_direction(&mut self, direction: Direction) -> bool {
        if self.direction_queue.len() >= MAX_QUEUED_DIRECTIONS {
            return false;
        }
        self.direction_queue.push_back(direction);
        true
    }

    /// Pop queued inputs until one is not a reversal of the current heading,
    /// then commit the pending heading. Reversals are discarded.
    pub fn commit_heading(&mut self) -> Direction {
        while let Some(next) = self.direction_queue.pop_front() {
            if !next.is_opposite(self.heading) {
                self.pending_heading = next;
                break;
            }
        }
        self.heading = self.pending_heading;
        self.heading
    }

    /// Whether a body segment (not the head) sits on `cell`
    pub fn body_contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Whether any part of the snake, head included, sits on `cell`
    pub fn occupies(&self, cell: Cell) -> bool {
        self.head == cell || self.body_contains(cell)
    }

    /// Move the head to `new_head`: the old head joins the body and the
    /// oldest segments are dropped while the body exceeds the target length.
    pub fn advance(&mut self, new_head: Cell) {
        self.body.push_back(self.head);
        while self.body.len() > self.target_length {
            self.body.pop_front();
        }
        self.head = new_head;
        assert!(self.body.len() <= self.target_length);
    }

    /// Milliseconds per move at the current speed
    pub fn move_interval_ms(&self) -> f64 {
        1000.0 / self.speed as f64
    }
}

/// Power-up subtypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerUpKind {
    /// Boosts snake speed for the duration
    Speed,
    /// Tracked as active; grants no immunity
    Shield,
    /// Tracked as active; does not multiply score
    DoublePoints,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Speed,
        PowerUpKind::Shield,
        PowerUpKind::DoublePoints,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::Speed => "Speed",
            PowerUpKind::Shield => "Shield",
            PowerUpKind::DoublePoints => "DoublePoints",
        }
    }
}

/// What a collectible gives when the head reaches it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    Food { value: u64 },
    PowerUp(PowerUpKind),
}

/// A grid-resident item consumed on head overlap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub pos: Cell,
}

/// A time-limited modifier currently in effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub remaining_ms: f32,
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Paused,
    /// Run ended; only a restart leaves this phase
    GameOver,
}

/// Notification for the presentation layer (sound, particles, HUD).
///
/// Emitted during a tick or lifecycle change and drained afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// Snake ran into itself and lost a life
    Collision { cell: Cell },
    Ate { cell: Cell, value: u64 },
    PowerUpCollected { cell: Cell, kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    LevelUp { level: u32 },
    AchievementUnlocked { id: AchievementId, reward: u64 },
    GameOver { final_score: u64 },
    Paused,
    Resumed,
    Restarted,
}

/// Complete per-run state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub grid: Grid,
    pub phase: GamePhase,
    pub level: u32,
    pub score: u64,
    pub lives: u32,
    pub difficulty: f32,
    pub snake: Snake,
    /// Collectibles in spawn order
    pub collectibles: Vec<Collectible>,
    /// At most one entry per kind
    pub power_ups: Vec<ActivePowerUp>,
    /// Food eaten this run
    pub food_eaten: u32,
    /// Completed-or-aborted ticks this run
    pub time_ticks: u64,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new run with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_grid(seed, Grid::default())
    }

    pub fn with_grid(seed: u64, grid: Grid) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            grid,
            phase: GamePhase::Playing,
            level: 1,
            score: 0,
            lives: START_LIVES,
            difficulty: 1.0,
            snake: Snake::new(&grid, START_LENGTH, BASE_SPEED),
            collectibles: Vec::new(),
            power_ups: Vec::new(),
            food_eaten: 0,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        };
        state.init_collectibles();
        state
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace the collectible set with three food items, plus a power-up from level 2 on
    pub fn init_collectibles(&mut self) {
        self.collectibles.clear();
        for _ in 0..MAX_COLLECTIBLES {
            self.spawn_food();
        }
        if self.level >= 2 {
            self.spawn_power_up();
        }
    }

    /// Whether `cell` is blocked for spawning (snake or another collectible)
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.snake.occupies(cell) || self.collectibles.iter().any(|c| c.pos == cell)
    }

    /// Spawn a collectible on a random free cell. Returns false if the grid is full.
    pub fn spawn_collectible(&mut self, kind: CollectibleKind) -> bool {
        let grid = self.grid;
        let mut rng = self.rng.clone();
        let cell = grid.random_free_cell(&mut rng, |cell| self.is_occupied(cell));
        self.rng = rng;

        let Some(pos) = cell else {
            log::warn!("No free cell to spawn {:?}", kind);
            return false;
        };
        let id = self.next_entity_id();
        self.collectibles.push(Collectible { id, kind, pos });
        true
    }

    pub fn spawn_food(&mut self) -> bool {
        self.spawn_collectible(CollectibleKind::Food { value: FOOD_VALUE })
    }

    /// Spawn a power-up of a uniformly random kind
    pub fn spawn_power_up(&mut self) -> bool {
        let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::ALL.len())];
        self.spawn_collectible(CollectibleKind::PowerUp(kind))
    }

    /// Active power-up of the given kind, if any
    pub fn power_up(&self, kind: PowerUpKind) -> Option<&ActivePowerUp> {
        self.power_ups.iter().find(|p| p.kind == kind)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        log::debug!("event: {:?}", event);
        self.events.push(event);
    }

    /// Notifications emitted since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
