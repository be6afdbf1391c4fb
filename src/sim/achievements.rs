//! Session achievements
//!
//! Unlocks are monotonic for the life of a `Session`: a restart clears the run
//! but keeps whatever has been unlocked.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};

/// Achievement identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    Score100,
    Level5,
    Eat50Food,
}

impl AchievementId {
    pub const ALL: [AchievementId; 3] = [
        AchievementId::Score100,
        AchievementId::Level5,
        AchievementId::Eat50Food,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AchievementId::Score100 => "Score 100 Points",
            AchievementId::Level5 => "Reach Level 5",
            AchievementId::Eat50Food => "Eat 50 Food",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AchievementId::Score100 => "Reach 100 points.",
            AchievementId::Level5 => "Advance to level 5.",
            AchievementId::Eat50Food => "Consume 50 food items.",
        }
    }

    /// Material icon name for the HUD
    pub fn icon(self) -> &'static str {
        match self {
            AchievementId::Score100 => "star",
            AchievementId::Level5 => "rocket_launch",
            AchievementId::Eat50Food => "restaurant",
        }
    }

    /// Score granted on unlock
    pub fn reward(self) -> u64 {
        match self {
            AchievementId::Score100 => 50,
            AchievementId::Level5 => 100,
            AchievementId::Eat50Food => 80,
        }
    }

    /// Unlock condition over the current run
    pub fn is_met(self, state: &GameState) -> bool {
        match self {
            AchievementId::Score100 => state.score >= 100,
            AchievementId::Level5 => state.level >= 5,
            AchievementId::Eat50Food => state.food_eaten >= 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub unlocked: bool,
}

/// The session's achievement set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievements {
    pub entries: Vec<Achievement>,
}

impl Default for Achievements {
    fn default() -> Self {
        Self::new()
    }
}

impl Achievements {
    pub fn new() -> Self {
        Self {
            entries: AchievementId::ALL
                .iter()
                .map(|&id| Achievement {
                    id,
                    unlocked: false,
                })
                .collect(),
        }
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.entries.iter().any(|a| a.id == id && a.unlocked)
    }

    /// Names of unlocked achievements, in declaration order
    pub fn unlocked_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|a| a.unlocked)
            .map(|a| a.id.name().to_string())
            .collect()
    }

    /// Unlock every achievement whose condition now holds.
    ///
    /// Each unlock adds its reward to the score and emits one notification.
    /// Passes repeat until nothing new unlocks, so a reward that satisfies
    /// another condition is honoured regardless of declaration order.
    /// Returns the number of new unlocks.
    pub fn evaluate(&mut self, state: &mut GameState) -> usize {
        let mut unlocked = 0;
        loop {
            let mut changed = false;
            for achievement in self.entries.iter_mut().filter(|a| !a.unlocked) {
                if achievement.id.is_met(state) {
                    achievement.unlocked = true;
                    let reward = achievement.id.reward();
                    state.score += reward;
                    log::info!("Achievement unlocked: {}", achievement.id.name());
                    state.emit(GameEvent::AchievementUnlocked {
                        id: achievement.id,
                        reward,
                    });
                    unlocked += 1;
                    changed = true;
                }
            }
            if !changed {
                return unlocked;
            }
        }
    }
}
