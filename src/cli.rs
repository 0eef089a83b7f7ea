//! Command-line flags for the terminal game.

use std::path::PathBuf;

use clap::Parser;

use crate::core::GameConfig;
use crate::types::{
    DEFAULT_BOARD_SIZE, DEFAULT_COMBO_MULTIPLIER, DEFAULT_INITIAL_MOVES, DEFAULT_MATCH_POINTS,
    DEFAULT_TILE_TYPES,
};

#[derive(Parser, Debug, Clone)]
#[command(name = "tui-match3")]
#[command(about = "Swap adjacent tiles to match three or more", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Board side length
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    pub size: u8,

    /// Moves per game
    #[arg(long, default_value_t = DEFAULT_INITIAL_MOVES)]
    pub moves: u32,

    /// Number of tile kinds
    #[arg(long, default_value_t = DEFAULT_TILE_TYPES.len())]
    pub kinds: usize,

    /// Points per matched tile
    #[arg(long, default_value_t = DEFAULT_MATCH_POINTS)]
    pub match_points: f64,

    /// Multiplier for passes that clear two or more runs
    #[arg(long, default_value_t = DEFAULT_COMBO_MULTIPLIER)]
    pub combo: f64,

    /// RNG seed (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs here (nothing is logged without it)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Draw letters instead of emoji
    #[arg(long)]
    pub ascii: bool,
}

impl Cli {
    /// Game config described by the flags. Validation happens when the game
    /// is started.
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            board_size: self.size,
            initial_moves: self.moves,
            match_points: self.match_points,
            combo_multiplier: self.combo,
            ..GameConfig::default()
        }
        .with_kind_count(self.kinds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_default_config() {
        let cli = Cli::parse_from(["tui-match3"]);
        assert_eq!(cli.game_config(), GameConfig::default());
        assert_eq!(cli.seed, None);
        assert!(!cli.ascii);
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "tui-match3",
            "--size",
            "6",
            "--moves",
            "5",
            "--kinds",
            "4",
            "--combo",
            "2",
            "--seed",
            "99",
        ]);
        let config = cli.game_config();
        assert_eq!(config.board_size, 6);
        assert_eq!(config.initial_moves, 5);
        assert_eq!(config.tile_types.len(), 4);
        assert_eq!(config.combo_multiplier, 2.0);
        assert_eq!(cli.seed, Some(99));
    }
}
