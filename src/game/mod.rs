//! Game session: score, high score, countdown and the current round.
//!
//! `Game` is a plain state machine. It never reads a clock or schedules
//! anything itself; callers pass `now_ms` in and drive [`Game::tick`] once per
//! second. The browser layer in `ui.rs` does both.

mod config;
mod countdown;

pub use config::GameConfig;
pub use countdown::{Countdown, TickOutcome};

use rand::Rng;

use crate::color::{HslColor, SHADE_COUNT, generate_main_color, generate_shades, pick_target};
use crate::scoring::{ScoreChange, WRONG_PENALTY, apply_guess};
use crate::storage::HighScoreStore;

pub const TIME_UP_STATUS: &str = "Time's up! Start a new game.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    Playing,
    TimeUp,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct { points: u32, new_high_score: bool },
    Wrong { game_over: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("no shade at index {0}")]
    NoSuchShade(usize),
    #[error("round is not accepting guesses ({0:?})")]
    NotAcceptingGuesses(Phase),
}

/// Render-ready copy of everything the page shows.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameSnapshot {
    pub variant: crate::scoring::Variant,
    pub target: String,
    pub shades: Vec<String>,
    pub score: u32,
    pub high_score: u32,
    pub seconds_left: u32,
    pub status: String,
    pub phase: Phase,
}

pub struct Game<R: Rng, S: HighScoreStore> {
    config: GameConfig,
    rng: R,
    store: S,
    score: u32,
    high_score: u32,
    countdown: Countdown,
    shades: [HslColor; SHADE_COUNT],
    target: HslColor,
    shown_at_ms: f64,
    status: String,
    phase: Phase,
}

impl<R: Rng, S: HighScoreStore> Game<R, S> {
    /// Start a session: load the high score and deal the first round.
    pub fn new(config: GameConfig, mut rng: R, store: S, now_ms: f64) -> Self {
        let high_score = store.load();
        let base = generate_main_color(&mut rng);
        let shades = generate_shades(base, &mut rng);
        let target = pick_target(&shades, &mut rng);
        Self {
            score: config.starting_score,
            countdown: Countdown::new(config.variant.round_seconds()),
            config,
            rng,
            store,
            high_score,
            shades,
            target,
            shown_at_ms: now_ms,
            status: String::new(),
            phase: Phase::Playing,
        }
    }

    /// "New Game": fresh colors and a full countdown. After a game over this
    /// also restores the starting score.
    pub fn new_round(&mut self, now_ms: f64) {
        if self.phase == Phase::GameOver {
            self.score = self.config.starting_score;
        }
        self.status.clear();
        self.deal(now_ms);
    }

    fn deal(&mut self, now_ms: f64) {
        let base = generate_main_color(&mut self.rng);
        self.shades = generate_shades(base, &mut self.rng);
        self.target = pick_target(&self.shades, &mut self.rng);
        self.countdown = Countdown::new(self.config.variant.round_seconds());
        self.shown_at_ms = now_ms;
        self.phase = Phase::Playing;
    }

    /// Guess the shade at `index` (0-based, in display order).
    pub fn guess(&mut self, index: usize, now_ms: f64) -> Result<GuessOutcome, GameError> {
        if self.phase != Phase::Playing {
            return Err(GameError::NotAcceptingGuesses(self.phase));
        }
        let picked = *self.shades.get(index).ok_or(GameError::NoSuchShade(index))?;
        let time_taken = ((now_ms - self.shown_at_ms) / 1000.0).max(0.0);

        match apply_guess(self.score, time_taken, picked == self.target, self.config.variant) {
            ScoreChange::Gained { points, score } => {
                self.score = score;
                let new_high_score = self.raise_high_score();
                self.deal(now_ms);
                self.status = format!("Correct! (+{points} points)");
                Ok(GuessOutcome::Correct { points, new_high_score })
            }
            ScoreChange::Lost { score, game_over } => {
                self.score = score;
                if game_over {
                    self.phase = Phase::GameOver;
                    self.status = if self.config.variant.game_over_dialog() {
                        format!("Wrong! -{WRONG_PENALTY} points.")
                    } else {
                        "Game over! You ran out of points.".to_string()
                    };
                } else {
                    self.status = format!("Wrong! -{WRONG_PENALTY} points.");
                }
                Ok(GuessOutcome::Wrong { game_over })
            }
        }
    }

    fn raise_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            self.store.save(self.high_score);
            true
        } else {
            false
        }
    }

    /// Advance the countdown by one second. Only a playing round counts down.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Playing {
            return TickOutcome::Idle;
        }
        let outcome = self.countdown.tick();
        if outcome == TickOutcome::Expired {
            self.phase = Phase::TimeUp;
            self.status = TIME_UP_STATUS.to_string();
        }
        outcome
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            variant: self.config.variant,
            target: self.target.to_string(),
            shades: self.shades.iter().map(ToString::to_string).collect(),
            score: self.score,
            high_score: self.high_score,
            seconds_left: self.countdown.remaining(),
            status: self.status.clone(),
            phase: self.phase,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
    pub fn score(&self) -> u32 {
        self.score
    }
    pub fn high_score(&self) -> u32 {
        self.high_score
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn shades(&self) -> &[HslColor; SHADE_COUNT] {
        &self.shades
    }
    pub fn target(&self) -> HslColor {
        self.target
    }
    /// Display index of the target within the shade set.
    pub fn target_index(&self) -> usize {
        self.shades.iter().position(|s| *s == self.target).unwrap_or(0)
    }
    pub fn seconds_left(&self) -> u32 {
        self.countdown.remaining()
    }
    pub fn status(&self) -> &str {
        &self.status
    }
    pub fn store(&self) -> &S {
        &self.store
    }
}
