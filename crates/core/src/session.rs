//! Session tracker - score, move budget, selection and the busy/terminal flags
//!
//! `busy` is the only synchronisation primitive in the engine. It is raised
//! while a swap and its cascade are being resolved and gates player input.
//! Once the move budget is spent the session becomes terminal and stays busy
//! until the game is restarted.

use serde::Serialize;

use crate::scoring::ScoreResult;
use crate::types::Coord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    score: u32,
    moves_remaining: u32,
    selected: Option<Coord>,
    busy: bool,
    game_over: bool,
    /// Set once the game-over report has been handed out.
    game_over_reported: bool,
}

impl Session {
    pub fn new(initial_moves: u32) -> Self {
        Self {
            score: 0,
            moves_remaining: initial_moves,
            selected: None,
            busy: false,
            game_over: false,
            game_over_reported: false,
        }
    }

    /// Back to the starting configuration: score 0, full budget, no selection.
    pub fn reset(&mut self, initial_moves: u32) {
        *self = Self::new(initial_moves);
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Whether player input should be considered at all.
    pub fn accepts_input(&self) -> bool {
        !self.busy && self.moves_remaining > 0
    }

    pub fn select(&mut self, coord: Coord) {
        self.selected = Some(coord);
    }

    pub fn clear_selection(&mut self) -> Option<Coord> {
        self.selected.take()
    }

    /// Enter the busy state and pay for a committed swap.
    ///
    /// The move is spent whether or not the swap ends up matching.
    pub fn commit_swap(&mut self) {
        self.busy = true;
        self.selected = None;
        self.moves_remaining = self.moves_remaining.saturating_sub(1);
    }

    /// Add the points of one resolver pass. Returns the new score.
    pub fn apply_pass(&mut self, result: &ScoreResult) -> u32 {
        self.score = self.score.saturating_add(result.points);
        self.score
    }

    /// Leave the busy state after resolution settled.
    ///
    /// A terminal session stays busy.
    pub fn settle(&mut self) {
        if !self.game_over {
            self.busy = false;
        }
    }

    /// Enter the terminal state when the budget is spent.
    ///
    /// Returns the final score the first time the session turns terminal and
    /// None on every later call, so game over is reported exactly once.
    pub fn check_terminal(&mut self) -> Option<u32> {
        if self.moves_remaining > 0 {
            return None;
        }
        self.game_over = true;
        self.busy = true;
        if self.game_over_reported {
            return None;
        }
        self.game_over_reported = true;
        Some(self.score)
    }
}
