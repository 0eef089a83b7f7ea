//! Core game logic - the tile-matching board engine, pure and deterministic
//!
//! Everything here is plain data plus the rules that act on it. There is no
//! I/O, no clock and no render handle anywhere in this crate, so the same
//! seed always produces the same game.
//!
//! # Module Structure
//!
//! - [`board`]: `N x N` grid, random fill and gravity refill
//! - [`matcher`]: run detection, clearing, settle and the scored cascade loop
//! - [`controller`]: what a tile activation means given the current selection
//! - [`session`]: score, move budget, selection and the busy/terminal flags
//! - [`scoring`]: per-pass points with the combo multiplier
//! - [`game_state`]: ties the pieces together behind `activate_tile`
//! - [`events`] / [`snapshot`]: what the presentation layer gets to see
//! - [`config`] / [`error`] / [`rng`]: configuration, failures, randomness
//!
//! # Game Rules
//!
//! - Swapping two orthogonally adjacent tiles always costs one move.
//! - A swap that forms no run of three or more is undone.
//! - Every run is cleared, surviving tiles fall, new tiles enter from the top,
//!   and the board is checked again until it is stable.
//! - Each pass scores `floor(tiles * match_points * multiplier)`, where the
//!   multiplier is the combo multiplier when a pass resolves two or more runs.
//! - When the budget hits zero the game is over and input is locked until
//!   restart.
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{GameConfig, GameState};
//! use tui_match3_core::types::Coord;
//!
//! let mut game = GameState::new(GameConfig::default(), 12345).unwrap();
//! assert_eq!(game.moves_remaining(), 20);
//!
//! // Select a tile, then activate it again to drop the selection.
//! game.activate_tile(Coord::new(0, 0)).unwrap();
//! assert_eq!(game.selected(), Some(Coord::new(0, 0)));
//! game.activate_tile(Coord::new(0, 0)).unwrap();
//! assert_eq!(game.selected(), None);
//! ```

pub mod board;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod game_state;
pub mod matcher;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, RefillReport, Spawn, TileMove};
pub use config::GameConfig;
pub use controller::{decide, SelectionOutcome};
pub use error::{ConfigError, EngineError};
pub use events::{CellChange, GameEvent, Transition};
pub use game_state::GameState;
pub use matcher::{
    cascade, clear_matches, find_all_matches, settle, CascadePass, Match, Orientation,
};
pub use rng::TileRng;
pub use scoring::{calculate_pass_score, score_matches, ScoreResult, ScoreRules};
pub use session::Session;
pub use snapshot::GameSnapshot;
