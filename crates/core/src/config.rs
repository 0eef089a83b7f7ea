//! Game configuration.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scoring::ScoreRules;
use crate::types::{
    DEFAULT_BOARD_SIZE, DEFAULT_COMBO_MULTIPLIER, DEFAULT_INITIAL_MOVES, DEFAULT_MATCH_POINTS,
    DEFAULT_TILE_TYPES, MAX_BOARD_SIZE, MAX_TILE_KINDS, MIN_BOARD_SIZE, MIN_TILE_KINDS,
};

/// Everything needed to start a game.
///
/// `tile_types` holds the symbol for each kind; a tile of kind `i` is shown
/// as `tile_types[i]` by whatever presentation layer is attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub board_size: u8,
    pub tile_types: Vec<String>,
    pub initial_moves: u32,
    pub match_points: f64,
    pub combo_multiplier: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            tile_types: DEFAULT_TILE_TYPES.iter().map(|s| s.to_string()).collect(),
            initial_moves: DEFAULT_INITIAL_MOVES,
            match_points: DEFAULT_MATCH_POINTS,
            combo_multiplier: DEFAULT_COMBO_MULTIPLIER,
        }
    }
}

impl GameConfig {
    /// Check every field against its allowed domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < MIN_BOARD_SIZE || self.board_size as usize > MAX_BOARD_SIZE {
            return Err(ConfigError::BoardSize {
                size: self.board_size,
                min: MIN_BOARD_SIZE,
                max: MAX_BOARD_SIZE,
            });
        }

        let count = self.tile_types.len();
        if !(MIN_TILE_KINDS..=MAX_TILE_KINDS).contains(&count) {
            return Err(ConfigError::TileTypeCount {
                count,
                min: MIN_TILE_KINDS,
                max: MAX_TILE_KINDS,
            });
        }

        let mut seen = HashSet::with_capacity(count);
        for name in &self.tile_types {
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateTileType { name: name.clone() });
            }
        }

        if self.initial_moves == 0 {
            return Err(ConfigError::NoMoves);
        }
        if !self.match_points.is_finite() || self.match_points <= 0.0 {
            return Err(ConfigError::MatchPoints(self.match_points));
        }
        if !self.combo_multiplier.is_finite() || self.combo_multiplier < 1.0 {
            return Err(ConfigError::ComboMultiplier(self.combo_multiplier));
        }
        Ok(())
    }

    /// Number of distinct tile kinds.
    pub fn kind_count(&self) -> u8 {
        self.tile_types.len() as u8
    }

    pub fn score_rules(&self) -> ScoreRules {
        ScoreRules {
            match_points: self.match_points,
            combo_multiplier: self.combo_multiplier,
        }
    }

    /// Keep the default symbols but use only the first `kinds` of them.
    ///
    /// Counts beyond the default list get generated names (`kind6`, ...).
    pub fn with_kind_count(mut self, kinds: usize) -> Self {
        self.tile_types = (0..kinds)
            .map(|i| match DEFAULT_TILE_TYPES.get(i) {
                Some(name) => name.to_string(),
                None => format!("kind{}", i),
            })
            .collect();
        self
    }
}
