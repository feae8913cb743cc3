//! Named difficulty profiles for the scripted opponent.

use serde::{Deserialize, Serialize};

/// Difficulty levels selectable at match creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }

    /// Exact lookup, case-insensitive
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "expert" => Some(Difficulty::Expert),
            _ => None,
        }
    }

    /// Lookup that substitutes `Normal` for unknown names
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            log::debug!("Unknown difficulty {name:?}, using normal");
            Difficulty::Normal
        })
    }

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                difficulty: *self,
                reaction_probability: 0.3,
                ball_speed: 3.0,
                opponent_paddle_speed: 4.0,
            },
            Difficulty::Normal => DifficultyProfile {
                difficulty: *self,
                reaction_probability: 0.6,
                ball_speed: 5.0,
                opponent_paddle_speed: 6.0,
            },
            Difficulty::Hard => DifficultyProfile {
                difficulty: *self,
                reaction_probability: 0.8,
                ball_speed: 7.0,
                opponent_paddle_speed: 8.0,
            },
            Difficulty::Expert => DifficultyProfile {
                difficulty: *self,
                reaction_probability: 0.95,
                ball_speed: 9.0,
                opponent_paddle_speed: 10.0,
            },
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opponent tuning bundle for one difficulty
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    pub difficulty: Difficulty,
    /// Chance (0..=1) that the opponent reacts on a given tick
    pub reaction_probability: f32,
    pub ball_speed: f32,
    pub opponent_paddle_speed: f32,
}

impl DifficultyProfile {
    pub fn from_name(name: &str) -> Self {
        Difficulty::from_name(name).profile()
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Difficulty::default().profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_name_falls_back_to_normal() {
        let profile = DifficultyProfile::from_name("insane");
        assert_eq!(profile, Difficulty::Normal.profile());
        assert_eq!(profile.reaction_probability, 0.6);
        assert_eq!(profile.ball_speed, 5.0);
        assert_eq!(profile.opponent_paddle_speed, 6.0);
    }

    #[test]
    fn test_names_are_case_insensitive() {
        assert_eq!(Difficulty::from_name("  EXPERT "), Difficulty::Expert);
        assert_eq!(Difficulty::from_name("Hard"), Difficulty::Hard);
        assert_eq!(Difficulty::parse("medium"), None);
    }

    #[test]
    fn test_profiles_get_harder() {
        let profiles: Vec<_> = Difficulty::ALL.iter().map(|d| d.profile()).collect();
        for pair in profiles.windows(2) {
            assert!(pair[0].reaction_probability < pair[1].reaction_probability);
            assert!(pair[0].ball_speed < pair[1].ball_speed);
            assert!(pair[0].opponent_paddle_speed < pair[1].opponent_paddle_speed);
        }
    }

    #[test]
    fn test_round_trips_through_name() {
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_name(difficulty.as_str()), difficulty);
        }
    }
}
