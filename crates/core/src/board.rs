//! Board module - manages the game grid
//!
//! The board is an `N x N` grid where each cell holds a tile kind, or is empty
//! while a cascade is in flight. Cells live in a flat row-major vector.
//! Coordinates: `(row, col)`, row 0 at the top. Gravity pulls toward higher rows.
//!
//! The board is the single source of truth for tile state. Presentation layers
//! only ever see copies (see [`crate::snapshot`]).

use serde::Serialize;
use tracing::debug;

use crate::error::{ConfigError, EngineError};
use crate::matcher;
use crate::rng::TileRng;
use crate::types::{
    Cell, Coord, TileKind, MAX_BOARD_SIZE, MAX_SETTLE_PASSES, MAX_TILE_KINDS, MIN_BOARD_SIZE,
    MIN_TILE_KINDS,
};

/// A surviving tile pulled down by gravity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileMove {
    pub from: Coord,
    pub to: Coord,
    pub kind: TileKind,
}

/// A freshly generated tile entering at the top of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Spawn {
    pub coord: Coord,
    pub kind: TileKind,
}

/// What one gravity refill did to the board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefillReport {
    pub moved: Vec<TileMove>,
    pub spawned: Vec<Spawn>,
}

impl RefillReport {
    /// Every coordinate whose tile changed, with its new kind.
    ///
    /// Once a refill completes no cell is empty, so the destinations of moved
    /// tiles plus the spawned cells cover every change.
    pub fn changed_cells(&self) -> impl Iterator<Item = (Coord, TileKind)> + '_ {
        self.moved
            .iter()
            .map(|m| (m.to, m.kind))
            .chain(self.spawned.iter().map(|s| (s.coord, s.kind)))
    }

    pub fn is_empty(&self) -> bool {
        self.moved.is_empty() && self.spawned.is_empty()
    }
}

/// The game board - `size x size` cells using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: u8,
    /// Number of distinct kinds random generation draws from
    kinds: u8,
    /// Row-major cells (row * size + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board.
    ///
    /// Returns None unless `1 <= size <= MAX_BOARD_SIZE` and `kinds > 0`.
    pub fn new(size: u8, kinds: u8) -> Option<Self> {
        if size == 0 || size as usize > MAX_BOARD_SIZE || kinds == 0 {
            return None;
        }
        let len = (size as usize) * (size as usize);
        Some(Self {
            size,
            kinds,
            cells: vec![None; len],
        })
    }

    /// Build a playable board: random fill, then settle any accidental runs.
    ///
    /// Settling goes through the same detect/clear/refill step used during
    /// play, so the result has no run of three or more anywhere.
    pub fn initialize(size: u8, kinds: u8, rng: &mut TileRng) -> Result<Self, EngineError> {
        if kinds == 0 {
            return Err(ConfigError::TileTypeCount {
                count: 0,
                min: MIN_TILE_KINDS,
                max: MAX_TILE_KINDS,
            }
            .into());
        }
        let mut board = Self::new(size, kinds).ok_or(ConfigError::BoardSize {
            size,
            min: MIN_BOARD_SIZE,
            max: MAX_BOARD_SIZE,
        })?;
        board.fill_random(rng);
        let passes = matcher::settle(&mut board, rng, MAX_SETTLE_PASSES)?;
        debug!(size, kinds, passes, "board initialized");
        Ok(board)
    }

    #[inline(always)]
    fn index(&self, coord: Coord) -> Option<usize> {
        if coord.row >= self.size || coord.col >= self.size {
            return None;
        }
        Some((coord.row as usize) * (self.size as usize) + (coord.col as usize))
    }

    /// Side length
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Number of distinct tile kinds
    pub fn kinds(&self) -> u8 {
        self.kinds
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.index(coord).is_some()
    }

    /// Get cell at `coord`
    /// Returns None if out of bounds
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index(coord).map(|idx| self.cells[idx])
    }

    /// Kind at `coord`, or None when empty or out of bounds
    pub fn kind_at(&self, coord: Coord) -> Option<TileKind> {
        self.get(coord).flatten()
    }

    /// Set cell at `coord`
    /// Returns false if out of bounds
    pub fn set(&mut self, coord: Coord, cell: Cell) -> bool {
        match self.index(coord) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Exchange the contents of two cells.
    ///
    /// No adjacency check; the controller decides whether a swap is legal.
    /// Returns false (and changes nothing) if either cell is out of bounds.
    pub fn swap(&mut self, a: Coord, b: Coord) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// Fill every cell with a fresh random kind
    pub fn fill_random(&mut self, rng: &mut TileRng) {
        let kinds = self.kinds;
        for cell in &mut self.cells {
            *cell = Some(rng.next_kind(kinds));
        }
    }

    /// Compact each column toward the bottom and top it up with new tiles.
    ///
    /// Per column, scanning bottom-up: every empty cell bumps a running count,
    /// every tile found above at least one empty drops by that count. The top
    /// `count` cells then receive freshly generated kinds. Columns never
    /// exchange tiles and surviving tiles keep their relative order.
    pub fn apply_gravity(&mut self, rng: &mut TileRng) -> RefillReport {
        let mut report = RefillReport::default();
        let size = self.size;
        let width = size as usize;

        for col in 0..size {
            let mut empty_count: u8 = 0;

            for row in (0..size).rev() {
                let idx = row as usize * width + col as usize;
                match self.cells[idx] {
                    None => empty_count += 1,
                    Some(kind) if empty_count > 0 => {
                        let to_row = row + empty_count;
                        self.cells[to_row as usize * width + col as usize] = Some(kind);
                        self.cells[idx] = None;
                        report.moved.push(TileMove {
                            from: Coord::new(row, col),
                            to: Coord::new(to_row, col),
                            kind,
                        });
                    }
                    Some(_) => {}
                }
            }

            for row in (0..empty_count).rev() {
                let kind = rng.next_kind(self.kinds);
                self.cells[row as usize * width + col as usize] = Some(kind);
                report.spawned.push(Spawn {
                    coord: Coord::new(row, col),
                    kind,
                });
            }
        }

        report
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, col: u8) -> impl Iterator<Item = Cell> + '_ {
        let width = self.size as usize;
        (0..width)
            .filter(move |_| col < self.size)
            .map(move |row| self.cells[row * width + col as usize])
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Every coordinate, row-major
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Coord::new(row, col)))
    }

    /// Create from rows of cells.
    ///
    /// Returns None unless the rows form a square grid no wider than
    /// `MAX_BOARD_SIZE`.
    pub fn from_rows(kinds: u8, rows: Vec<Vec<Cell>>) -> Option<Self> {
        let size = rows.len();
        if size == 0 || size > MAX_BOARD_SIZE || rows.iter().any(|r| r.len() != size) {
            return None;
        }
        Some(Self {
            size: size as u8,
            kinds,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Build a board from a compact text grid, one string per row.
    ///
    /// `A` is kind 0, `B` kind 1, and so on; `.` is an empty cell.
    ///
    /// ```
    /// use tui_match3_core::Board;
    /// use tui_match3_types::{Coord, TileKind};
    ///
    /// let board = Board::parse(3, &["ABC", "CAB", "BC."]).unwrap();
    /// assert_eq!(board.kind_at(Coord::new(1, 2)), Some(TileKind::new(1)));
    /// assert_eq!(board.get(Coord::new(2, 2)), Some(None));
    /// ```
    pub fn parse(kinds: u8, rows: &[&str]) -> Option<Self> {
        let parsed = rows
            .iter()
            .map(|line| {
                line.chars()
                    .map(|ch| match ch {
                        '.' => Some(None),
                        'A'..='Z' => {
                            let k = ch as u8 - b'A';
                            (k < kinds).then_some(Some(TileKind::new(k)))
                        }
                        _ => None,
                    })
                    .collect::<Option<Vec<Cell>>>()
            })
            .collect::<Option<Vec<Vec<Cell>>>>()?;
        Self::from_rows(kinds, parsed)
    }

    /// Convert to rows of cells (top to bottom)
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.size as usize)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Render as the text grid accepted by [`Board::parse`]
    pub fn to_text(&self) -> Vec<String> {
        self.to_rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Some(kind) => (b'A' + kind.index()) as char,
                        None => '.',
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k(i: u8) -> Cell {
        Some(TileKind::new(i))
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(8, 6).unwrap();
        assert_eq!(board.index(Coord::new(0, 0)), Some(0));
        assert_eq!(board.index(Coord::new(0, 7)), Some(7));
        assert_eq!(board.index(Coord::new(1, 0)), Some(8));
        assert_eq!(board.index(Coord::new(7, 7)), Some(63));
        assert_eq!(board.index(Coord::new(8, 0)), None);
        assert_eq!(board.index(Coord::new(0, 8)), None);
    }

    #[test]
    fn test_new_rejects_sizes_past_run_capacity() {
        assert!(Board::new(MAX_BOARD_SIZE as u8, 6).is_some());
        assert!(Board::new(MAX_BOARD_SIZE as u8 + 1, 6).is_none());
        assert!(Board::new(0, 6).is_none());
        assert!(Board::new(4, 0).is_none());
    }

    #[test]
    fn test_initialize_rejects_oversized_board() {
        let mut rng = TileRng::new(1);
        let err = Board::initialize(40, 6, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidConfig(ConfigError::BoardSize { size: 40, .. })
        ));
        assert!(Board::initialize(4, 0, &mut rng).is_err());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_swap_exchanges_only_two_cells() {
        let mut board = Board::parse(3, &["ABC", "CAB", "BCA"]).unwrap();
        assert!(board.swap(Coord::new(0, 0), Coord::new(2, 2)));
        assert_eq!(board.to_text(), vec!["ABC", "CAB", "BCA"]);

        assert!(board.swap(Coord::new(0, 0), Coord::new(0, 1)));
        assert_eq!(board.to_text(), vec!["BAC", "CAB", "BCA"]);

        // No adjacency requirement at this level.
        assert!(board.swap(Coord::new(0, 0), Coord::new(2, 1)));
        assert_eq!(board.to_text(), vec!["CAC", "CAB", "BBA"]);
    }

    #[test]
    fn test_swap_out_of_bounds_is_noop() {
        let mut board = Board::parse(3, &["ABC", "CAB", "BCA"]).unwrap();
        assert!(!board.swap(Coord::new(0, 0), Coord::new(3, 0)));
        assert_eq!(board.to_text(), vec!["ABC", "CAB", "BCA"]);
    }

    #[test]
    fn test_gravity_compacts_and_spawns() {
        let mut board = Board::parse(3, &["AB.", "..C", "C.."]).unwrap();
        let mut rng = TileRng::new(5);
        let report = board.apply_gravity(&mut rng);

        assert_eq!(board.empty_count(), 0);
        // Column 0: A above a gap falls one row; C stays.
        assert_eq!(board.get(Coord::new(1, 0)), Some(k(0)));
        assert_eq!(board.get(Coord::new(2, 0)), Some(k(2)));
        // Column 1: B falls to the bottom.
        assert_eq!(board.get(Coord::new(2, 1)), Some(k(1)));
        // Column 2: C falls one row.
        assert_eq!(board.get(Coord::new(2, 2)), Some(k(2)));

        assert_eq!(report.moved.len(), 3);
        assert_eq!(report.spawned.len(), 5);
        assert!(report.moved.contains(&TileMove {
            from: Coord::new(0, 1),
            to: Coord::new(2, 1),
            kind: TileKind::new(1),
        }));
    }

    #[test]
    fn test_gravity_on_full_board_changes_nothing() {
        let mut board = Board::parse(3, &["ABC", "CAB", "BCA"]).unwrap();
        let before = board.clone();
        let mut rng = TileRng::new(1);
        let report = board.apply_gravity(&mut rng);
        assert!(report.is_empty());
        assert_eq!(board, before);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_changed_cells_match_board() {
        let mut board = Board::parse(4, &["ABCD", "A.CD", "..CD", "AB.."]).unwrap();
        let mut rng = TileRng::new(9);
        let report = board.apply_gravity(&mut rng);
        for (coord, kind) in report.changed_cells() {
            assert_eq!(board.kind_at(coord), Some(kind));
        }
    }

    #[test]
    fn test_parse_rejects_bad_grids() {
        assert!(Board::parse(3, &["AB", "AB", "AB"]).is_none());
        assert!(Board::parse(3, &["ABD", "ABC", "ABC"]).is_none());
        assert!(Board::parse(3, &["AB?", "ABC", "ABC"]).is_none());
        assert!(Board::parse(3, &[]).is_none());
    }

    #[test]
    fn test_column_reads_top_to_bottom() {
        let board = Board::parse(3, &["ABC", "CAB", "BCA"]).unwrap();
        let col: Vec<Cell> = board.column(1).collect();
        assert_eq!(col, vec![k(1), k(0), k(2)]);
        assert_eq!(board.column(3).count(), 0);
    }
}
