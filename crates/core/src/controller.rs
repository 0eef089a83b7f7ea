//! Selection & swap controller.
//!
//! Turns a tile activation into one of a handful of outcomes given the
//! current selection. Busy and terminal gating happen before this is asked.

use crate::types::Coord;

/// What a tile activation means for the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Nothing was selected; select the tile.
    Select(Coord),
    /// The selected tile was activated again; drop the selection.
    Deselect(Coord),
    /// A non-adjacent tile was activated; move the selection there.
    Reselect { from: Coord, to: Coord },
    /// An orthogonal neighbour was activated; swap the two tiles.
    Swap { from: Coord, to: Coord },
}

/// Decide what activating `coord` does given the current `selected` tile.
pub fn decide(selected: Option<Coord>, coord: Coord) -> SelectionOutcome {
    match selected {
        None => SelectionOutcome::Select(coord),
        Some(current) if current == coord => SelectionOutcome::Deselect(coord),
        Some(current) if current.is_adjacent(coord) => SelectionOutcome::Swap {
            from: current,
            to: coord,
        },
        Some(current) => SelectionOutcome::Reselect {
            from: current,
            to: coord,
        },
    }
}
