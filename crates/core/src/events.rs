//! Transitions reported to the presentation layer.
//!
//! Every call into the engine returns the ordered list of transitions it
//! caused. Each one names the event, lists the cells that changed and carries
//! the session counters after the change, so a renderer can apply them one by
//! one without reading engine internals.

use serde::Serialize;

use crate::board::{Spawn, TileMove};
use crate::matcher::Match;
use crate::types::{Cell, Coord};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GameEvent {
    /// A new board is ready (new game or restart).
    GameStarted { episode_id: u32 },
    TileSelected { coord: Coord },
    TileDeselected { coord: Coord },
    /// Two tiles were exchanged and a move was spent.
    SwapCommitted { from: Coord, to: Coord },
    /// The swap produced no match and was undone. The move stays spent.
    SwapReverted { from: Coord, to: Coord },
    /// One resolver pass cleared these matches.
    TilesMatched {
        pass: u32,
        matches: Vec<Match>,
        points: u32,
        combo: bool,
    },
    /// Gravity compacted the columns and new tiles entered from the top.
    /// `drop_ms` is the suggested per-tile fall duration.
    TilesRefilled {
        pass: u32,
        moved: Vec<TileMove>,
        spawned: Vec<Spawn>,
        drop_ms: u32,
    },
    GameOver { final_score: u32 },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::GameStarted { .. } => "gameStarted",
            GameEvent::TileSelected { .. } => "tileSelected",
            GameEvent::TileDeselected { .. } => "tileDeselected",
            GameEvent::SwapCommitted { .. } => "swapCommitted",
            GameEvent::SwapReverted { .. } => "swapReverted",
            GameEvent::TilesMatched { .. } => "tilesMatched",
            GameEvent::TilesRefilled { .. } => "tilesRefilled",
            GameEvent::GameOver { .. } => "gameOver",
        }
    }
}

/// New content of one cell. `cell: None` means the tile was cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellChange {
    pub coord: Coord,
    pub cell: Cell,
}

/// One observable step of the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub event: GameEvent,
    pub changes: Vec<CellChange>,
    pub score: u32,
    pub moves_remaining: u32,
    pub selected: Option<Coord>,
    pub terminal: bool,
    /// Suggested pause before presenting the next transition.
    pub hint_ms: u32,
}
