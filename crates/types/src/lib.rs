//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data with no engine behaviour attached, making them
//! usable in any context (core logic, terminal rendering, observers).
//!
//! # Board Dimensions
//!
//! The board is a square `N x N` grid addressed as `(row, col)`:
//!
//! - **Default size**: 8 x 8
//! - **Row 0** is the top of the board; gravity pulls tiles toward higher rows
//! - **Bounds**: `3 <= N <= MAX_BOARD_SIZE`
//!
//! # Animation Hints
//!
//! The engine resolves everything synchronously. Each transition it reports
//! carries a pacing hint (milliseconds) that a presentation layer may wait
//! before showing the next one:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SWAP_CHECK_MS` | 300 | Pause after a swap is shown, before it is judged |
//! | `CLEAR_PAUSE_MS` | 500 | Matched tiles stay visible before gravity |
//! | `REFILL_PAUSE_MS` | 500 | Refilled board shown before the next detection |
//! | `DROP_ANIMATION_MS` | 300 | Duration of a single tile drop |
//! | `INITIAL_SETTLE_MS` | 500 | Fresh board settle delay |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{Coord, GameAction, TileKind, DEFAULT_BOARD_SIZE};
//!
//! let a = Coord::new(2, 2);
//! assert!(a.is_adjacent(Coord::new(2, 3)));
//! assert!(!a.is_adjacent(Coord::new(3, 3)));
//!
//! assert_eq!(TileKind::new(4).index(), 4);
//! assert_eq!(GameAction::from_str("restart"), Some(GameAction::Restart));
//! assert_eq!(DEFAULT_BOARD_SIZE, 8);
//! ```

use serde::{Deserialize, Serialize};

/// Default board side length (8 x 8)
pub const DEFAULT_BOARD_SIZE: u8 = 8;

/// Smallest playable board side
pub const MIN_BOARD_SIZE: u8 = 3;

/// Largest supported board side (bounds the capacity of a single match run)
pub const MAX_BOARD_SIZE: usize = 32;

/// Fewest distinct tile kinds that still allow a match-free board
pub const MIN_TILE_KINDS: usize = 3;

/// Most distinct tile kinds a board may use
pub const MAX_TILE_KINDS: usize = 16;

/// Default tile symbols, in kind-index order.
pub const DEFAULT_TILE_TYPES: [&str; 6] = ["red", "blue", "green", "yellow", "purple", "orange"];

/// Default move budget per game
pub const DEFAULT_INITIAL_MOVES: u32 = 20;

/// Default points per matched tile
pub const DEFAULT_MATCH_POINTS: f64 = 10.0;

/// Default multiplier applied when one pass resolves two or more matches
pub const DEFAULT_COMBO_MULTIPLIER: f64 = 1.5;

/// Minimum run length that counts as a match
pub const MIN_RUN: usize = 3;

/// Pause after a swap is shown, before matches are evaluated
pub const SWAP_CHECK_MS: u32 = 300;

/// How long cleared tiles stay visible before gravity runs
pub const CLEAR_PAUSE_MS: u32 = 500;

/// How long a refilled board is shown before the next detection pass
pub const REFILL_PAUSE_MS: u32 = 500;

/// Duration of a single tile drop animation
pub const DROP_ANIMATION_MS: u32 = 300;

/// Delay before a freshly generated board settles
pub const INITIAL_SETTLE_MS: u32 = 500;

/// Safety bound on detect/clear/refill passes while settling a fresh board
pub const MAX_SETTLE_PASSES: usize = 10_000;

/// Safety bound on passes within a single in-game cascade
pub const MAX_CASCADE_PASSES: usize = 10_000;

/// A tile type: an index into the configured symbol list.
///
/// The engine never looks at symbol names; it only compares kinds.
/// Presentation layers map the index back to a symbol or glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileKind(u8);

impl TileKind {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u8 {
        self.0
    }
}

/// A cell on the game board
///
/// - `None`: Empty (only ever seen mid-cascade)
/// - `Some(TileKind)`: Cell holding a tile of that kind
pub type Cell = Option<TileKind>;

/// A board position. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// True when `other` is exactly one step away along a row or column.
    ///
    /// Diagonal neighbours and the cell itself are not adjacent.
    pub fn is_adjacent(self, other: Coord) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr + dc == 1
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Player commands produced by presentation-side input.
///
/// Cursor actions never reach the engine; the front-end resolves them into
/// a coordinate and sends `Activate` for the cell under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move cursor one row up
    CursorUp,
    /// Move cursor one row down
    CursorDown,
    /// Move cursor one column left
    CursorLeft,
    /// Move cursor one column right
    CursorRight,
    /// Activate (select / swap) the tile under the cursor
    Activate,
    /// Restart the game with the current configuration
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("cursorLeft"), Some(GameAction::CursorLeft));
    /// assert_eq!(GameAction::from_str("ACTIVATE"), Some(GameAction::Activate));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorup" => Some(GameAction::CursorUp),
            "cursordown" => Some(GameAction::CursorDown),
            "cursorleft" => Some(GameAction::CursorLeft),
            "cursorright" => Some(GameAction::CursorRight),
            "activate" => Some(GameAction::Activate),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::CursorUp => "cursorUp",
            GameAction::CursorDown => "cursorDown",
            GameAction::CursorLeft => "cursorLeft",
            GameAction::CursorRight => "cursorRight",
            GameAction::Activate => "activate",
            GameAction::Restart => "restart",
        }
    }
}
