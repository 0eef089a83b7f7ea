use serde::Serialize;

use crate::events::{GameEvent, Transition};
use crate::types::{Cell, Coord};

/// Read-only projection of the whole game, for renderers and observers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub size: u8,
    /// Symbol per tile kind, indexed by `TileKind::index`.
    pub tile_types: Vec<String>,
    /// Rows top to bottom.
    pub board: Vec<Vec<Cell>>,
    pub score: u32,
    pub moves_remaining: u32,
    pub selected: Option<Coord>,
    pub busy: bool,
    pub game_over: bool,
    pub episode_id: u32,
    pub seed: u64,
}

impl GameSnapshot {
    pub fn cell(&self, coord: Coord) -> Option<Cell> {
        self.board
            .get(coord.row as usize)
            .and_then(|row| row.get(coord.col as usize))
            .copied()
    }

    /// Symbol for the tile at `coord`, if any.
    pub fn symbol_at(&self, coord: Coord) -> Option<&str> {
        let kind = self.cell(coord).flatten()?;
        self.tile_types.get(kind.index() as usize).map(String::as_str)
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.busy
    }

    /// Replay one transition onto this projection.
    ///
    /// Lets a presentation layer step through the transitions of a move one
    /// at a time. After the last transition of a call the projection matches
    /// the engine's own snapshot in everything but `busy`, which only the
    /// engine knows for sure.
    pub fn apply(&mut self, t: &Transition) {
        for change in &t.changes {
            if let Some(cell) = self
                .board
                .get_mut(change.coord.row as usize)
                .and_then(|row| row.get_mut(change.coord.col as usize))
            {
                *cell = change.cell;
            }
        }
        self.score = t.score;
        self.moves_remaining = t.moves_remaining;
        self.selected = t.selected;
        self.game_over = t.terminal;
        match t.event {
            GameEvent::GameStarted { episode_id } => {
                self.episode_id = episode_id;
                self.busy = false;
            }
            GameEvent::SwapCommitted { .. }
            | GameEvent::TilesMatched { .. }
            | GameEvent::TilesRefilled { .. } => self.busy = true,
            GameEvent::GameOver { .. } => self.busy = true,
            GameEvent::TileSelected { .. }
            | GameEvent::TileDeselected { .. }
            | GameEvent::SwapReverted { .. } => {}
        }
    }
}
