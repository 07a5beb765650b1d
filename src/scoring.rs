//! Time-weighted scoring and game variants.

use core::fmt;
use core::str::FromStr;

/// Points for a correct guess before time deductions.
pub const BASE_POINTS: u32 = 5;
/// Flat deduction for a wrong guess.
pub const WRONG_PENALTY: u32 = 5;
/// Score every session starts from.
pub const STARTING_SCORE: u32 = 10;

// (seconds threshold, deduction) applied cumulatively when exceeded
const SLOW_DEDUCTIONS: [(f64, u32); 2] = [(5.0, 2), (10.0, 4)];

/// The two rule sets the game ships with. They differ in round length,
/// the minimum award for a slow correct guess, and how game over is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Variant {
    #[default]
    Classic,
    Blitz,
}

impl Variant {
    /// Countdown start value in seconds.
    pub fn round_seconds(self) -> u32 {
        match self {
            Variant::Classic => 30,
            Variant::Blitz => 15,
        }
    }

    pub fn min_points(self) -> u32 {
        match self {
            Variant::Classic => 1,
            Variant::Blitz => 0,
        }
    }

    /// Classic shows a modal dialog on game over; Blitz reports it inline.
    pub fn game_over_dialog(self) -> bool {
        matches!(self, Variant::Classic)
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Blitz => "blitz",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown game variant {0:?} (expected \"classic\" or \"blitz\")")]
pub struct VariantParseError(pub String);

impl FromStr for Variant {
    type Err = VariantParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Variant::Classic),
            "blitz" => Ok(Variant::Blitz),
            other => Err(VariantParseError(other.to_string())),
        }
    }
}

/// Points awarded for a correct guess after `time_taken` seconds.
pub fn points_for_correct(time_taken: f64, variant: Variant) -> u32 {
    let deducted: u32 = SLOW_DEDUCTIONS
        .iter()
        .filter(|(after, _)| time_taken > *after)
        .map(|(_, d)| d)
        .sum();
    BASE_POINTS.saturating_sub(deducted).max(variant.min_points())
}

/// Result of applying one guess to a score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreChange {
    Gained { points: u32, score: u32 },
    Lost { score: u32, game_over: bool },
}

impl ScoreChange {
    pub fn score(self) -> u32 {
        match self {
            ScoreChange::Gained { score, .. } | ScoreChange::Lost { score, .. } => score,
        }
    }
}

/// Apply a guess to `score`. A wrong guess that would leave the score at or
/// below zero pins it to 0 and ends the game.
pub fn apply_guess(score: u32, time_taken: f64, is_correct: bool, variant: Variant) -> ScoreChange {
    if is_correct {
        let points = points_for_correct(time_taken, variant);
        ScoreChange::Gained { points, score: score.saturating_add(points) }
    } else {
        let score = score.saturating_sub(WRONG_PENALTY);
        ScoreChange::Lost { score, game_over: score == 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_guess_earns_base_points() {
        assert_eq!(points_for_correct(0.0, Variant::Classic), 5);
        assert_eq!(points_for_correct(5.0, Variant::Classic), 5);
        assert_eq!(points_for_correct(5.01, Variant::Blitz), 3);
    }

    #[test]
    fn seven_seconds_costs_two() {
        assert_eq!(points_for_correct(7.0, Variant::Classic), 3);
        assert_eq!(points_for_correct(7.0, Variant::Blitz), 3);
        assert_eq!(points_for_correct(10.0, Variant::Classic), 3);
    }

    #[test]
    fn slow_guess_hits_variant_minimum() {
        assert_eq!(points_for_correct(12.0, Variant::Classic), 1);
        assert_eq!(points_for_correct(12.0, Variant::Blitz), 0);
        assert_eq!(points_for_correct(600.0, Variant::Classic), 1);
    }

    #[test]
    fn wrong_guess_clamps_at_zero() {
        assert_eq!(apply_guess(10, 1.0, false, Variant::Classic), ScoreChange::Lost { score: 5, game_over: false });
        assert_eq!(apply_guess(5, 1.0, false, Variant::Classic), ScoreChange::Lost { score: 0, game_over: true });
        assert_eq!(apply_guess(3, 1.0, false, Variant::Blitz), ScoreChange::Lost { score: 0, game_over: true });
    }

    #[test]
    fn correct_guess_adds_points() {
        let change = apply_guess(10, 3.0, true, Variant::Classic);
        assert_eq!(change, ScoreChange::Gained { points: 5, score: 15 });
        assert_eq!(change.score(), 15);
    }

    #[test]
    fn variant_settings_and_names() {
        assert_eq!(Variant::default(), Variant::Classic);
        assert_eq!(Variant::Classic.round_seconds(), 30);
        assert_eq!(Variant::Blitz.round_seconds(), 15);
        assert!(Variant::Classic.game_over_dialog());
        assert!(!Variant::Blitz.game_over_dialog());
        assert_eq!("Blitz".parse::<Variant>(), Ok(Variant::Blitz));
        assert_eq!(Variant::Classic.to_string(), "classic");
        assert!("turbo".parse::<Variant>().is_err());
    }
}
