//! HUD view model
//!
//! A read-only snapshot of what the side panel shows. Built after all ticks of
//! a frame have run.

use crate::consts::STATUS_MESSAGE_MS;
use crate::sim::{AchievementId, GameEvent, GamePhase, Session};

/// One active power-up line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerUpLine {
    pub label: &'static str,
    /// Whole seconds left, rounded up
    pub seconds_left: u32,
}

/// One achievement line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementLine {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub unlocked: bool,
}

/// Everything the HUD displays for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    /// Play time as `MM:SS`
    pub timer: String,
    pub power_ups: Vec<PowerUpLine>,
    pub achievements: Vec<AchievementLine>,
    pub status: Option<String>,
    /// Overlay title for paused / game over
    pub overlay: Option<String>,
}

impl HudView {
    pub fn from_session(session: &Session, status: &StatusLine) -> Self {
        let state = &session.state;
        let overlay = match state.phase {
            GamePhase::Playing => None,
            GamePhase::Paused => Some("Paused".to_string()),
            GamePhase::GameOver => Some(format!(
                "Game Over - your final score was {}.",
                state.score
            )),
        };

        Self {
            score: state.score,
            level: state.level,
            lives: state.lives,
            timer: format_timer(session.elapsed_game_time()),
            power_ups: state
                .power_ups
                .iter()
                .map(|p| PowerUpLine {
                    label: p.kind.label(),
                    seconds_left: (p.remaining_ms / 1000.0).ceil().max(0.0) as u32,
                })
                .collect(),
            achievements: session
                .achievements
                .entries
                .iter()
                .map(|a| AchievementLine {
                    name: a.id.name(),
                    description: a.id.description(),
                    icon: a.id.icon(),
                    unlocked: a.unlocked,
                })
                .collect(),
            status: status.current().map(str::to_string),
            overlay,
        }
    }

    /// Text for the power-up panel
    pub fn power_up_summary(&self) -> String {
        if self.power_ups.is_empty() {
            return "No active power-ups".to_string();
        }
        self.power_ups
            .iter()
            .map(|p| format!("{} {}", p.label, p.seconds_left))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Format milliseconds as `MM:SS`
pub fn format_timer(elapsed_ms: f64) -> String {
    let seconds = (elapsed_ms / 1000.0).floor() as u64;
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Transient status message ("Level Up! Level 3") that clears itself
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    message: Option<(String, f64)>,
}

impl StatusLine {
    /// Update from a frame's notifications at time `now_ms`, then expire old text
    pub fn update(&mut self, events: &[GameEvent], now_ms: f64) {
        for event in events {
            let text = match event {
                GameEvent::LevelUp { level } => format!("Level Up! Level {level}"),
                GameEvent::AchievementUnlocked { id, .. } => achievement_message(*id),
                GameEvent::Restarted => {
                    self.message = None;
                    continue;
                }
                _ => continue,
            };
            self.message = Some((text, now_ms + STATUS_MESSAGE_MS));
        }
        if self.message.as_ref().is_some_and(|(_, until)| now_ms >= *until) {
            self.message = None;
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.message.as_ref().map(|(text, _)| text.as_str())
    }
}

fn achievement_message(id: AchievementId) -> String {
    format!("Achievement Unlocked: {}", id.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{PowerUpKind, activate_power_up};

    #[test]
    fn test_format_timer() {
        assert_eq!(format_timer(0.0), "00:00");
        assert_eq!(format_timer(61_999.0), "01:01");
        assert_eq!(format_timer(3_600_000.0), "60:00");
    }

    #[test]
    fn test_power_up_seconds_round_up() {
        let mut session = Session::new(4);
        activate_power_up(&mut session.state, PowerUpKind::Shield);
        session.state.power_ups[0].remaining_ms = 4001.0;
        let hud = HudView::from_session(&session, &StatusLine::default());
        assert_eq!(
            hud.power_ups,
            vec![PowerUpLine {
                label: "Shield",
                seconds_left: 5
            }]
        );
        assert_eq!(hud.power_up_summary(), "Shield 5");
    }

    #[test]
    fn test_empty_power_ups_and_overlay() {
        let mut session = Session::new(4);
        let hud = HudView::from_session(&session, &StatusLine::default());
        assert_eq!(hud.power_up_summary(), "No active power-ups");
        assert_eq!(hud.overlay, None);
        assert_eq!(hud.achievements.len(), 3);
        assert_eq!(hud.achievements[0].description, "Reach 100 points.");
        assert!(!hud.achievements[0].unlocked);

        session.set_paused(true);
        let hud = HudView::from_session(&session, &StatusLine::default());
        assert_eq!(hud.overlay.as_deref(), Some("Paused"));
    }

    #[test]
    fn test_status_line_expires() {
        let mut status = StatusLine::default();
        status.update(&[GameEvent::LevelUp { level: 3 }], 1000.0);
        assert_eq!(status.current(), Some("Level Up! Level 3"));
        status.update(&[], 5999.0);
        assert!(status.current().is_some());
        status.update(&[], 6000.0);
        assert_eq!(status.current(), None);
    }

    #[test]
    fn test_status_line_latest_wins() {
        let mut status = StatusLine::default();
        status.update(
            &[
                GameEvent::LevelUp { level: 5 },
                GameEvent::AchievementUnlocked {
                    id: AchievementId::Level5,
                    reward: 100,
                },
            ],
            0.0,
        );
        assert_eq!(status.current(), Some("Achievement Unlocked: Reach Level 5"));
    }
}
