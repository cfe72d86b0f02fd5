use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Selectable difficulty; drives both tick rate and score multiplier.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulties in menu order.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Built-in base tick rate in ticks per second.
    #[must_use]
    pub fn default_tick_rate(self) -> u32 {
        match self {
            Self::Easy => 8,
            Self::Medium => 12,
            Self::Hard => 18,
        }
    }

    /// Built-in score multiplier applied to each food eaten.
    #[must_use]
    pub fn default_multiplier(self) -> u32 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One value per difficulty, used for the configurable lookup tables.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerDifficulty<T> {
    pub easy: T,
    pub medium: T,
    pub hard: T,
}

impl<T: Copy> PerDifficulty<T> {
    /// Builds a table by evaluating `f` for every difficulty.
    pub fn from_fn(f: impl Fn(Difficulty) -> T) -> Self {
        Self {
            easy: f(Difficulty::Easy),
            medium: f(Difficulty::Medium),
            hard: f(Difficulty::Hard),
        }
    }

    #[must_use]
    pub fn get(&self, difficulty: Difficulty) -> T {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Difficulty, PerDifficulty};

    #[test]
    fn built_in_tables_match_classic_values() {
        let rates = PerDifficulty::from_fn(Difficulty::default_tick_rate);
        let multipliers = PerDifficulty::from_fn(Difficulty::default_multiplier);

        assert_eq!(
            rates,
            PerDifficulty {
                easy: 8,
                medium: 12,
                hard: 18
            }
        );
        assert_eq!(multipliers.get(Difficulty::Easy), 1);
        assert_eq!(multipliers.get(Difficulty::Medium), 2);
        assert_eq!(multipliers.get(Difficulty::Hard), 3);
    }

    #[test]
    fn difficulty_deserializes_from_lowercase_names() {
        let parsed: Difficulty = serde_json::from_str("\"hard\"").expect("valid difficulty");
        assert_eq!(parsed, Difficulty::Hard);
        assert!(serde_json::from_str::<Difficulty>("\"Impossible\"").is_err());
    }

    #[test]
    fn default_difficulty_is_medium() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }
}
