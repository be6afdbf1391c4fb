//! Fixed timestep simulation tick
//!
//! One tick moves the snake one cell and resolves everything that move causes.

use rand::Rng;

use super::achievements::Achievements;
use super::grid::Cell;
use super::state::{ActivePowerUp, CollectibleKind, GameEvent, GamePhase, GameState, PowerUpKind};
use crate::consts::*;

/// How a tick ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Full tick ran
    Moved,
    /// Snake hit itself and lost a life; rest of the tick skipped
    Crashed,
    /// Snake hit itself on its last life
    GameOver,
    /// Not in the playing phase, nothing happened
    Idle,
}

/// Advance the run by one move.
///
/// `decay_ms` is subtracted from every active power-up timer.
pub fn tick(state: &mut GameState, achievements: &mut Achievements, decay_ms: f32) -> TickOutcome {
    if state.phase != GamePhase::Playing {
        return TickOutcome::Idle;
    }
    state.time_ticks += 1;

    let heading = state.snake.commit_heading();
    let new_head = state.grid.step(state.snake.head, heading);

    if state.snake.body_contains(new_head) {
        return crash(state, new_head);
    }

    state.snake.advance(new_head);

    let ate_food = collect_at(state, new_head);

    if ate_food && state.score % LEVEL_UP_SCORE_STEP == 0 {
        level_up(state);
    }

    if state.collectibles.len() < MAX_COLLECTIBLES {
        if state.rng.random_bool(FOOD_SPAWN_CHANCE) {
            state.spawn_food();
        } else {
            state.spawn_power_up();
        }
    }

    decay_power_ups(state, decay_ms);

    achievements.evaluate(state);

    TickOutcome::Moved
}

/// Self-collision: lose a life and re-center, or end the run
fn crash(state: &mut GameState, cell: Cell) -> TickOutcome {
    if state.lives > 1 {
        state.lives -= 1;
        state.snake.target_length = state
            .snake
            .target_length
            .saturating_sub(CRASH_LENGTH_PENALTY)
            .max(START_LENGTH);
        let grid = state.grid;
        state.snake.reset(&grid);
        log::info!(
            "Crashed at {cell}; {} lives left, length {}",
            state.lives,
            state.snake.target_length
        );
        state.emit(GameEvent::Collision { cell });
        TickOutcome::Crashed
    } else {
        state.phase = GamePhase::GameOver;
        log::info!("Game over with score {}", state.score);
        state.emit(GameEvent::GameOver {
            final_score: state.score,
        });
        TickOutcome::GameOver
    }
}

/// Consume every collectible on `cell`, in list order. Returns true if food was eaten.
fn collect_at(state: &mut GameState, cell: Cell) -> bool {
    let (hits, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut state.collectibles)
        .into_iter()
        .partition(|c| c.pos == cell);
    state.collectibles = rest;

    let mut ate_food = false;
    for collectible in hits {
        match collectible.kind {
            CollectibleKind::Food { value } => {
                ate_food = true;
                state.snake.target_length += 1;
                state.score += value;
                state.food_eaten += 1;
                state.emit(GameEvent::Ate { cell, value });
            }
            CollectibleKind::PowerUp(kind) => {
                activate_power_up(state, kind);
                state.emit(GameEvent::PowerUpCollected { cell, kind });
            }
        }
    }
    ate_food
}

/// Start (or refresh) a power-up. Refreshing resets the timer; effects never stack.
pub fn activate_power_up(state: &mut GameState, kind: PowerUpKind) {
    match state.power_ups.iter_mut().find(|p| p.kind == kind) {
        Some(active) => active.remaining_ms = POWER_UP_DURATION_MS,
        None => state.power_ups.push(ActivePowerUp {
            kind,
            remaining_ms: POWER_UP_DURATION_MS,
        }),
    }

    match kind {
        PowerUpKind::Speed => state.snake.speed = BOOSTED_SPEED,
        // Registered as active only
        PowerUpKind::Shield | PowerUpKind::DoublePoints => {}
    }
}

/// Count down active power-ups and revert the ones that run out
fn decay_power_ups(state: &mut GameState, decay_ms: f32) {
    let mut expired = Vec::new();
    state.power_ups.retain_mut(|p| {
        p.remaining_ms -= decay_ms;
        if p.remaining_ms <= 0.0 {
            expired.push(p.kind);
            false
        } else {
            true
        }
    });

    for kind in expired {
        if kind == PowerUpKind::Speed {
            state.snake.speed = BASE_SPEED;
        }
        state.emit(GameEvent::PowerUpExpired { kind });
    }
}

fn level_up(state: &mut GameState) {
    state.level += 1;
    state.difficulty += DIFFICULTY_STEP;
    state.snake.speed += 1;
    log::info!(
        "Level up! Level {} (speed {})",
        state.level,
        state.snake.speed
    );
    state.emit(GameEvent::LevelUp { level: state.level });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Grid;
    use crate::sim::state::{Collectible, Direction};
    use glam::IVec2;

    /// A run with no collectibles, so ticks only spawn what tests expect
    fn bare_state() -> GameState {
        let mut state = GameState::new(12345);
        state.collectibles.clear();
        state
    }

    fn place(state: &mut GameState, kind: CollectibleKind, pos: Cell) {
        let id = state.next_entity_id();
        state.collectibles.push(Collectible { id, kind, pos });
    }

    fn food(value: u64) -> CollectibleKind {
        CollectibleKind::Food { value }
    }

    /// Park three food items on row 0, away from the snake's row
    fn fill_off_path(state: &mut GameState) {
        for x in 0..3 {
            place(state, food(10), IVec2::new(x, 0));
        }
    }

    /// Bend the snake so its next move (up) runs into its own body
    fn coil(state: &mut GameState) {
        state.snake.heading = Direction::Up;
        state.snake.pending_heading = Direction::Up;
        state.snake.head = IVec2::new(9, 9);
        state.snake.body = [(7, 8), (8, 8), (9, 8), (10, 8), (10, 9)]
            .into_iter()
            .map(|(x, y)| IVec2::new(x, y))
            .collect();
        state.snake.target_length = 8;
    }

    #[test]
    fn test_move_advances_head() {
        let mut state = bare_state();
        let mut achievements = Achievements::new();
        assert_eq!(
            tick(&mut state, &mut achievements, FRAME_DURATION_MS),
            TickOutcome::Moved
        );
        assert_eq!(state.snake.head, IVec2::new(11, 8));
        assert_eq!(state.snake.body.len(), 5);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_eat_food_grows_and_scores() {
        let mut state = bare_state();
        let mut achievements = Achievements::new();
        place(&mut state, food(10), IVec2::new(11, 8));

        tick(&mut state, &mut achievements, FRAME_DURATION_MS);
        assert_eq!(state.score, 10);
        assert_eq!(state.snake.target_length, 6);
        assert_eq!(state.food_eaten, 1);
        // Growth shows up on the following move
        assert_eq!(state.snake.body.len(), 5);
        assert!(state.events().contains(&GameEvent::Ate {
            cell: IVec2::new(11, 8),
            value: 10
        }));

        tick(&mut state, &mut achievements, FRAME_DURATION_MS);
        assert_eq!(state.snake.body.len(), 6);
    }

    #[test]
    fn test_collectibles_replenished_one_per_tick() {
        let mut state = bare_state();
        let mut achievements = Achievements::new();
        tick(&mut state, &mut achievements, FRAME_DURATION_MS);
        assert_eq!(state.collectibles.len(), 1);
        assert!(!state.snake.occupies(state.collectibles[0].pos));
    }

    #[test]
    fn test_no_spawn_when_full() {
        let mut state = bare_state();
        let mut achievements = Achievements::new();
        fill_off_path(&mut state);
        tick(&mut state, &mut achievements, FRAME_DURATION_MS);
        assert_eq!(state.collectibles.len(), 3);
    }

    #[test]
    fn test_multiple_collectibles_same_cell() {
        let mut state = bare_state();
        let mut achievements = Achievements::new();
        let cell = IVec2::new(11, 8);
        place(&mut state, food(10), cell);
        place(&mut state, CollectibleKind::PowerUp(PowerUpKind::Shield), cell);

        tick(&mut state, &mut achievements, FRAME_DURATION_MS);
        assert_eq!(state.score, 10);
        assert!(state.power_up(PowerUpKind::Shield).is_some());
        assert!(state.collectibles.iter().all(|c| c.pos != cell));
        let events = state.drain_events();
        assert!(matches!(events[0], GameEvent::Ate { .. }));
        assert!(matches!(events[1], GameEvent::PowerUpCollected { .. }));
    }

    #[test]
    fn test_five_food_levels_up() {
        let mut state = bare_state();
        let mut achievements = Achievements::new();
        for x in 11..=15 {
            place(&mut state, food(10), IVec2::new(x, 8));
        }

        for step in 1..=5 {
            tick(&mut state, &mut achievements, FRAME_DURATION_MS);
            assert_eq!(state.score, step * 10);
            if step < 5 {
                assert_eq!(state.level, 1);
            }
        }
        assert_eq!(state.level, 2);
        assert_eq!(state.snake.speed, 6);
        assert!((state.difficulty - 1.1).abs() < 1e-6);
        assert!(state.events().contains(&GameEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn test_power_up_does_not_score() {
        let mut state = bare_state();
        let mut achievements = Achievements::new();
        place(
            &mut state,
            CollectibleKind::PowerUp(PowerUpKind::DoublePoints),
            IVec2::new(11, 8),
        );
        tick(&mut state, &mut achievements, FRAME_DURATION_MS);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.target_length, 5);
        assert!(state.power_up(PowerUpKind::DoublePoints).is_some());
    }

    #[test]
    fn test_speed_power_up_expires() {
        let mut state = bare_state();
        let mut achievements = Achievements::new();
        place(
            &mut state,
            CollectibleKind::PowerUp(PowerUpKind::Speed),
            IVec2::new(11, 8),
        );
        fill_off_path(&mut state);
        tick(&mut state, &mut achievements, 0.0);
        assert_eq!(state.snake.speed, BOOSTED_SPEED);

        // 10,000 ms of decay across ticks
        for _ in 0..9 {
            tick(&mut state, &mut achievements, 1000.0);
            assert_eq!(state.snake.speed, BOOSTED_SPEED);
        }
        tick(&mut state, &mut achievements, 1000.0);
        assert_eq!(state.snake.speed, BASE_SPEED);
        assert!(state.power_ups.is_empty());
        assert!(state.events().contains(&GameEvent::PowerUpExpired {
            kind: PowerUpKind::Speed
        }));
    }

    #[test]
    fn test_reapply_refreshes_without_stacking() {
        let mut state = bare_state();
        activate_power_up(&mut state, PowerUpKind::Speed);
        state.power_ups[0].remaining_ms = 1.0;
        activate_power_up(&mut state, PowerUpKind::Speed);
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.power_ups[0].remaining_ms, POWER_UP_DURATION_MS);
        assert_eq!(state.snake.speed, BOOSTED_SPEED);
    }

    #[test]
    fn test_speed_expiry_overrides_level_speed() {
        let mut state = bare_state();
        activate_power_up(&mut state, PowerUpKind::Speed);
        level_up(&mut state);
        assert_eq!(state.snake.speed, BOOSTED_SPEED + 1);
        decay_power_ups(&mut state, POWER_UP_DURATION_MS);
        assert_eq!(state.snake.speed, BASE_SPEED);
    }

    #[test]
    fn test_self_collision_loses_life() {
        let mut state = bare_state();
        let mut achievements = Achievements::new();
        coil(&mut state);
        let score = state.score;

        assert_eq!(
            tick(&mut state, &mut achievements, FRAME_DURATION_MS),
            TickOutcome::Crashed
        );
        assert_eq!(state.lives, START_LIVES - 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.snake.target_length, 5);
        assert_eq!(state.snake.body.len(), 5);
        assert_eq!(state.snake.head, Grid::default().center());
        assert_eq!(state.score, score);
        // Aborted: nothing spawned
        assert!(state.collectibles.is_empty());
        assert_eq!(
            state.events(),
            &[GameEvent::Collision {
                cell: IVec2::new(9, 8)
            }]
        );
    }

    #[test]
    fn test_self_collision_on_last_life_ends_run() {
        let mut state = bare_state();
        let mut achievements = Achievements::new();
        state.lives = 1;
        state.score = 40;
        coil(&mut state);

        assert_eq!(
            tick(&mut state, &mut achievements, FRAME_DURATION_MS),
            TickOutcome::GameOver
        );
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 1);
        assert_eq!(
            state.events(),
            &[GameEvent::GameOver { final_score: 40 }]
        );

        // Terminal: further ticks do nothing
        assert_eq!(
            tick(&mut state, &mut achievements, FRAME_DURATION_MS),
            TickOutcome::Idle
        );
    }

    #[test]
    fn test_crash_penalty_floor() {
        let mut state = bare_state();
        let mut achievements = Achievements::new();
        coil(&mut state);
        state.snake.target_length = 12;
        tick(&mut state, &mut achievements, FRAME_DURATION_MS);
        assert_eq!(state.snake.target_length, 9);
        assert_eq!(state.snake.body.len(), 9);
    }

    #[test]
    fn test_reversal_ignored() {
        let mut state = bare_state();
        let mut achievements = Achievements::new();
        state.snake.enqueue_direction(Direction::Left);
        tick(&mut state, &mut achievements, FRAME_DURATION_MS);
        assert_eq!(state.snake.heading, Direction::Right);
        assert_eq!(state.snake.head, IVec2::new(11, 8));
    }

    #[test]
    fn test_achievement_evaluated_after_tick() {
        let mut state = bare_state();
        let mut achievements = Achievements::new();
        state.score = 90;
        place(&mut state, food(10), IVec2::new(11, 8));
        tick(&mut state, &mut achievements, FRAME_DURATION_MS);
        // 100 from food, then the 50 point reward
        assert_eq!(state.score, 150);
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        let mut ach_a = Achievements::new();
        let mut ach_b = Achievements::new();
        let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];

        for i in 0..200 {
            if i % 7 == 0 {
                let dir = turns[(i / 7) % turns.len()];
                a.snake.enqueue_direction(dir);
                b.snake.enqueue_direction(dir);
            }
            tick(&mut a, &mut ach_a, FRAME_DURATION_MS);
            tick(&mut b, &mut ach_b, FRAME_DURATION_MS);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.snake.head, b.snake.head);
        assert_eq!(a.collectibles, b.collectibles);
        assert_eq!(a.phase, b.phase);
    }
}
