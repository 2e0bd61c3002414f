use serde::{Deserialize, Serialize};

// ============================================================================
// Modes
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Preparing,
    Rolling,
    Resting,
    HellRounds,
    Stopwatch,
}

impl Mode {
    pub fn header(&self) -> &'static str {
        match self {
            Self::Preparing => "Get Ready",
            Self::Rolling => "Combat",
            Self::Resting => "Rest",
            Self::HellRounds => "Hell Rounds",
            Self::Stopwatch => "Stopwatch",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Preparing => "⏳",
            Self::Rolling => "🥋",
            Self::Resting => "💧",
            Self::HellRounds => "🔥",
            Self::Stopwatch => "⏱",
        }
    }

    pub fn counts_up(&self) -> bool {
        matches!(self, Self::Stopwatch)
    }
}

/// Entries of the mode-selection menu. Roll and HellRounds route through
/// a preparation countdown first.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MenuChoice {
    Roll,
    HellRounds,
    Stopwatch,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 3] = [Self::Roll, Self::HellRounds, Self::Stopwatch];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Roll => "Roll",
            Self::HellRounds => "Hell Rounds",
            Self::Stopwatch => "Stopwatch",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Roll => "Prepare, one timed round, then rest",
            Self::HellRounds => "Prepare, then back-to-back rounds",
            Self::Stopwatch => "Free-running clock counting up",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Roll => Self::HellRounds,
            Self::HellRounds => Self::Stopwatch,
            Self::Stopwatch => Self::Roll,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Roll => Self::Stopwatch,
            Self::HellRounds => Self::Roll,
            Self::Stopwatch => Self::HellRounds,
        }
    }
}

// ============================================================================
// Durations
// ============================================================================

/// Canonical starting values, in seconds, for each countdown mode.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(default)]
pub struct Durations {
    pub prepare: u64,
    pub round: u64,
    pub rest: u64,
    pub hell_round: u64,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            prepare: 5,
            round: 6 * 60,
            rest: 60,
            hell_round: 2 * 60,
        }
    }
}

impl Durations {
    pub fn starting_seconds(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Preparing => self.prepare,
            Mode::Rolling => self.round,
            Mode::Resting => self.rest,
            Mode::HellRounds => self.hell_round,
            Mode::Stopwatch => 0,
        }
    }

    /// Replaces zero-length countdowns with their defaults, returning the
    /// names of the fields that were replaced.
    pub fn replace_zeros(&mut self) -> Vec<&'static str> {
        let defaults = Self::default();
        let mut replaced = Vec::new();
        for (name, value, default) in [
            ("prepare", &mut self.prepare, defaults.prepare),
            ("round", &mut self.round, defaults.round),
            ("rest", &mut self.rest, defaults.rest),
            ("hell_round", &mut self.hell_round, defaults.hell_round),
        ] {
            if *value == 0 {
                *value = default;
                replaced.push(name);
            }
        }
        replaced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_durations_match_training_plan() {
        let d = Durations::default();
        assert_eq!(d.starting_seconds(Mode::Preparing), 5);
        assert_eq!(d.starting_seconds(Mode::Rolling), 360);
        assert_eq!(d.starting_seconds(Mode::Resting), 60);
        assert_eq!(d.starting_seconds(Mode::HellRounds), 120);
        assert_eq!(d.starting_seconds(Mode::Stopwatch), 0);
    }

    #[test]
    fn menu_cycles_both_ways() {
        for choice in MenuChoice::ALL {
            assert_eq!(choice.next().prev(), choice);
        }
        assert_eq!(MenuChoice::Stopwatch.next(), MenuChoice::Roll);
    }

    #[test]
    fn only_stopwatch_counts_up() {
        assert!(Mode::Stopwatch.counts_up());
        assert!(!Mode::Resting.counts_up());
        assert_eq!(Mode::Rolling.header(), "Combat");
        assert_eq!(Mode::Resting.header(), "Rest");
    }

    #[test]
    fn zero_durations_fall_back_to_defaults() {
        let mut d = Durations { prepare: 0, round: 0, rest: 45, hell_round: 90 };
        assert_eq!(d.replace_zeros(), vec!["prepare", "round"]);
        assert_eq!(d, Durations { prepare: 5, round: 360, rest: 45, hell_round: 90 });
        assert!(d.replace_zeros().is_empty());
    }

    #[test]
    fn partial_durations_fill_from_defaults() {
        let d: Durations = serde_json::from_str(r#"{"round": 300}"#).unwrap();
        assert_eq!(d.round, 300);
        assert_eq!(d.prepare, 5);
        assert_eq!(d.hell_round, 120);
    }
}
