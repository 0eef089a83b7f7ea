//! Keyboard cursor over the board.

use crate::types::{Coord, GameAction};

/// A board position moved by the arrow keys, clamped to the board edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    coord: Coord,
    size: u8,
}

impl Cursor {
    /// Start in the top-left corner of a `size x size` board.
    pub fn new(size: u8) -> Self {
        Self {
            coord: Coord::new(0, 0),
            size,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Jump to `coord` (e.g. after a mouse click). Out-of-range values clamp.
    pub fn set(&mut self, coord: Coord) {
        let max = self.size.saturating_sub(1);
        self.coord = Coord::new(coord.row.min(max), coord.col.min(max));
    }

    /// Change the board size, keeping the cursor inside it.
    pub fn resize(&mut self, size: u8) {
        self.size = size;
        self.set(self.coord);
    }

    /// Apply a cursor action. Returns true if the position changed; other
    /// actions are not handled here and return false.
    pub fn apply(&mut self, action: GameAction) -> bool {
        let Coord { row, col } = self.coord;
        let max = self.size.saturating_sub(1);
        let next = match action {
            GameAction::CursorUp => Coord::new(row.saturating_sub(1), col),
            GameAction::CursorDown => Coord::new((row + 1).min(max), col),
            GameAction::CursorLeft => Coord::new(row, col.saturating_sub(1)),
            GameAction::CursorRight => Coord::new(row, (col + 1).min(max)),
            _ => return false,
        };
        let moved = next != self.coord;
        self.coord = next;
        moved
    }
}
