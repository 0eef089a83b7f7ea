//! Scoring module - per-pass match scoring with a combo multiplier
//!
//! Rules:
//! - Every tile listed by a match is worth `match_points`. A tile at the
//!   crossing of two matches is listed twice and counts twice.
//! - When one detection pass resolves two or more matches, the pass total is
//!   multiplied by `combo_multiplier`.
//! - The result is floored to a whole number of points.
//! - Each pass of a cascade is scored on its own and the results are summed.

use serde::{Deserialize, Serialize};

use crate::matcher::Match;

/// The two numbers that drive scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRules {
    pub match_points: f64,
    pub combo_multiplier: f64,
}

/// Score calculation result for one pass
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScoreResult {
    /// Number of matches resolved in the pass
    pub matches: usize,
    /// Combined tile count over all matches (overlaps counted per match)
    pub tiles: usize,
    /// Multiplier that was applied (1 or the combo multiplier)
    pub multiplier: f64,
    pub points: u32,
}

impl ScoreResult {
    /// Whether the combo multiplier kicked in
    pub fn is_combo(&self) -> bool {
        self.matches > 1
    }
}

/// Multiplier for a pass with `match_count` matches
pub fn pass_multiplier(match_count: usize, rules: &ScoreRules) -> f64 {
    if match_count > 1 {
        rules.combo_multiplier
    } else {
        1.0
    }
}

/// Calculate the score for one pass.
/// match_count: number of matches found in the pass
/// tile_count: sum of the match lengths
pub fn calculate_pass_score(
    match_count: usize,
    tile_count: usize,
    rules: &ScoreRules,
) -> ScoreResult {
    if match_count == 0 {
        return ScoreResult::default();
    }
    let multiplier = pass_multiplier(match_count, rules);
    let raw = (tile_count as f64 * rules.match_points * multiplier).floor();

    ScoreResult {
        matches: match_count,
        tiles: tile_count,
        multiplier,
        // `as` saturates, and the config guarantees a finite positive product.
        points: raw as u32,
    }
}

/// Score the matches of a single detection pass
pub fn score_matches(matches: &[Match], rules: &ScoreRules) -> ScoreResult {
    let tiles = matches.iter().map(Match::len).sum();
    calculate_pass_score(matches.len(), tiles, rules)
}
