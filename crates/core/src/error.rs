//! Error types for the board engine.
//!
//! Only structural problems surface as errors. Input that arrives while the
//! engine is busy, non-adjacent picks and self-swaps are absorbed as no-ops
//! by the controller and never show up here.

use derive_more::{Display, Error, From};

use crate::types::Coord;

/// Why a [`GameConfig`](crate::GameConfig) was rejected.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum ConfigError {
    #[display("board size {size} is outside {min}..={max}")]
    BoardSize { size: u8, min: u8, max: usize },
    #[display("{count} tile types configured, need {min}..={max}")]
    TileTypeCount { count: usize, min: usize, max: usize },
    #[display("tile type {name:?} is listed more than once")]
    DuplicateTileType {
        #[error(not(source))]
        name: String,
    },
    #[display("initial moves must be greater than zero")]
    NoMoves,
    #[display("match points must be a positive finite number, got {_0}")]
    MatchPoints(#[error(not(source))] f64),
    #[display("combo multiplier must be finite and at least 1, got {_0}")]
    ComboMultiplier(#[error(not(source))] f64),
    #[display("board is {actual}x{actual} but the config says {expected}x{expected}")]
    BoardSizeMismatch { expected: u8, actual: u8 },
    #[display("board draws from {actual} tile kinds but the config lists {expected}")]
    KindCountMismatch { expected: u8, actual: u8 },
    #[display("board has {empty} empty cells; a starting board must be full")]
    BoardNotFull {
        #[error(not(source))]
        empty: usize,
    },
}

/// Engine failure.
#[derive(Debug, Clone, PartialEq, Display, Error, From)]
pub enum EngineError {
    /// Coordinate outside the board. The request had no effect.
    #[display("coordinate {coord} is outside the {size}x{size} board")]
    #[from(ignore)]
    InvalidCoordinate {
        #[error(not(source))]
        coord: Coord,
        size: u8,
    },
    #[display("invalid configuration: {_0}")]
    InvalidConfig(ConfigError),
    /// A resolution loop hit its safety bound without reaching a stable board.
    #[display("{stage} did not stabilise after {passes} passes")]
    #[from(ignore)]
    InvariantViolation { stage: &'static str, passes: usize },
}
