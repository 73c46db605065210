#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Score, move budget and end-of-game bookkeeping driven by world events.

use tile_blast_core::{Command, Event, GameConfig};

/// Points awarded for every destroyed tile, regardless of what destroyed it.
pub const POINTS_PER_TILE: u32 = 10;

/// Moves granted when an exhausted budget is refreshed by a shuffle.
pub const MOVES_PER_SHUFFLE: u32 = 5;

/// Result of the current playthrough.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The playthrough is still running.
    Playing,
    /// The target score was reached.
    Won,
    /// Moves and shuffle attempts ran out first.
    Lost,
}

/// Tracks score, moves and shuffle attempts for one playthrough.
#[derive(Clone, Debug)]
pub struct Progress {
    target_score: u32,
    score: u32,
    moves: u32,
    shuffles_left: u32,
    outcome: Outcome,
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl Progress {
    /// Creates bookkeeping for a fresh playthrough of `config`.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            target_score: config.target_score,
            score: 0,
            moves: config.max_moves,
            shuffles_left: config.shuffle_attempts,
            outcome: Outcome::Playing,
        }
    }

    /// Accumulated score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Score that wins the playthrough.
    #[must_use]
    pub const fn target_score(&self) -> u32 {
        self.target_score
    }

    /// Moves left before the budget runs out.
    #[must_use]
    pub const fn moves(&self) -> u32 {
        self.moves
    }

    /// Shuffle attempts left to refresh an exhausted budget.
    #[must_use]
    pub const fn shuffles_left(&self) -> u32 {
        self.shuffles_left
    }

    /// Result of the playthrough so far.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Reports whether player moves should still be accepted.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.outcome == Outcome::Playing && self.moves > 0
    }

    /// Consumes world events, updating the tallies and requesting shuffles.
    pub fn handle(
        &mut self,
        events: &[Event],
        out_commands: &mut Vec<Command>,
        out_events: &mut Vec<Event>,
    ) {
        for event in events {
            match event {
                Event::GameStarted { config } => {
                    *self = Self::new(config);
                    out_events.push(Event::ScoreChanged { score: self.score });
                    out_events.push(Event::MovesChanged {
                        remaining: self.moves,
                    });
                }
                Event::TilesDestroyed { positions, .. } if self.outcome == Outcome::Playing => {
                    let tiles = u32::try_from(positions.len()).unwrap_or(u32::MAX);
                    self.score = self
                        .score
                        .saturating_add(tiles.saturating_mul(POINTS_PER_TILE));
                    out_events.push(Event::ScoreChanged { score: self.score });
                    self.check_end(out_commands, out_events);
                }
                Event::MoveConsumed if self.outcome == Outcome::Playing => {
                    self.moves = self.moves.saturating_sub(1);
                    out_events.push(Event::MovesChanged {
                        remaining: self.moves,
                    });
                    self.check_end(out_commands, out_events);
                }
                _ => {}
            }
        }
    }

    fn check_end(&mut self, out_commands: &mut Vec<Command>, out_events: &mut Vec<Event>) {
        if self.score >= self.target_score {
            self.outcome = Outcome::Won;
            out_events.push(Event::GameWon);
            return;
        }
        if self.moves > 0 {
            return;
        }

        match self.shuffles_left.checked_sub(1) {
            Some(left) => {
                self.shuffles_left = left;
                self.moves = self.moves.saturating_add(MOVES_PER_SHUFFLE);
                out_events.push(Event::MovesChanged {
                    remaining: self.moves,
                });
                out_events.push(Event::ShuffleGranted {
                    shuffles_left: self.shuffles_left,
                    moves: self.moves,
                });
                out_commands.push(Command::Shuffle);
            }
            None => {
                self.outcome = Outcome::Lost;
                out_events.push(Event::GameLost);
            }
        }
    }
}
