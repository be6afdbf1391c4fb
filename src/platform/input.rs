//! Keyboard and touch input mapping

use crate::sim::{Direction, Session};

/// Minimum swipe distance (px) that counts as a turn
pub const SWIPE_THRESHOLD: f32 = 30.0;

/// A player action decoded from raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Turn(Direction),
    TogglePause,
}

/// Map a `KeyboardEvent.key` value to an action (arrows, WASD, space / P)
pub fn action_for_key(key: &str) -> Option<InputAction> {
    let action = match key.to_lowercase().as_str() {
        "arrowup" | "w" => InputAction::Turn(Direction::Up),
        "arrowdown" | "s" => InputAction::Turn(Direction::Down),
        "arrowleft" | "a" => InputAction::Turn(Direction::Left),
        "arrowright" | "d" => InputAction::Turn(Direction::Right),
        " " | "p" => InputAction::TogglePause,
        _ => return None,
    };
    Some(action)
}

/// Feed an action to the session. Returns true if it was accepted.
pub fn apply_action(session: &mut Session, action: InputAction) -> bool {
    match action {
        InputAction::Turn(direction) => session.enqueue_direction(direction),
        InputAction::TogglePause => {
            let before = session.phase();
            session.toggle_pause();
            session.phase() != before
        }
    }
}

/// Single-finger swipe detection
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start: Option<(f32, f32)>,
}

impl SwipeTracker {
    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    /// Finish a swipe. The dominant axis decides; short swipes are ignored.
    pub fn touch_end(&mut self, x: f32, y: f32) -> Option<Direction> {
        let (sx, sy) = self.start.take()?;
        let (dx, dy) = (x - sx, y - sy);
        if dx.abs() > dy.abs() {
            if dx > SWIPE_THRESHOLD {
                Some(Direction::Right)
            } else if dx < -SWIPE_THRESHOLD {
                Some(Direction::Left)
            } else {
                None
            }
        } else if dy > SWIPE_THRESHOLD {
            Some(Direction::Down)
        } else if dy < -SWIPE_THRESHOLD {
            Some(Direction::Up)
        } else {
            None
        }
    }
}
