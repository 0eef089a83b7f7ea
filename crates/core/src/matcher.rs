//! Match resolver - run detection, clearing and the cascade loop
//!
//! A match is a maximal run of three or more same-kind tiles along one row or
//! one column. Horizontal and vertical runs are found independently, so a tile
//! at the crossing of an L or T shape belongs to two matches. That overlap is
//! what makes combo scoring possible and is kept on purpose.
//!
//! One resolution step is detect → clear → gravity refill. The initial settle
//! and in-game cascades both run the same step; the cascade additionally
//! scores each pass.

use arrayvec::ArrayVec;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::board::{Board, RefillReport};
use crate::error::EngineError;
use crate::rng::TileRng;
use crate::scoring::{score_matches, ScoreResult, ScoreRules};
use crate::types::{Coord, TileKind, MAX_BOARD_SIZE, MIN_RUN};

/// Direction of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A maximal run of same-kind tiles.
///
/// Tiles are listed left-to-right for horizontal runs and top-to-bottom for
/// vertical ones. A run never exceeds the board side, hence the fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub kind: TileKind,
    pub orientation: Orientation,
    pub tiles: ArrayVec<Coord, MAX_BOARD_SIZE>,
}

impl Match {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Find every horizontal and vertical run of length >= 3.
///
/// Rows are scanned first (row-major), then columns (column-major). Callers
/// should not depend on the order beyond that.
pub fn find_all_matches(board: &Board) -> Vec<Match> {
    let size = board.size();
    let mut matches = Vec::new();

    for row in 0..size {
        scan_line(board, &mut matches, Orientation::Horizontal, |i| {
            Coord::new(row, i)
        });
    }
    for col in 0..size {
        scan_line(board, &mut matches, Orientation::Vertical, |i| {
            Coord::new(i, col)
        });
    }

    matches
}

/// Scan one row or column, pushing each maximal run.
fn scan_line(
    board: &Board,
    out: &mut Vec<Match>,
    orientation: Orientation,
    at: impl Fn(u8) -> Coord,
) {
    let size = board.size();
    let mut start = 0u8;

    while start < size {
        let Some(kind) = board.kind_at(at(start)) else {
            start += 1;
            continue;
        };

        let mut end = start + 1;
        while end < size && board.kind_at(at(end)) == Some(kind) {
            end += 1;
        }

        if (end - start) as usize >= MIN_RUN {
            out.push(Match {
                kind,
                orientation,
                tiles: (start..end).map(&at).collect(),
            });
        }
        start = end;
    }
}

/// Empty every cell referenced by `matches`.
///
/// Returns the distinct cells cleared, in first-seen order. A cell shared by
/// two matches is cleared (and reported) once.
pub fn clear_matches(board: &mut Board, matches: &[Match]) -> Vec<Coord> {
    let mut cleared = Vec::new();
    for coord in matches.iter().flat_map(|m| m.tiles.iter().copied()) {
        if board.kind_at(coord).is_some() {
            board.set(coord, None);
            cleared.push(coord);
        }
    }
    cleared
}

/// One detect → clear → refill step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveStep {
    pub matches: Vec<Match>,
    pub cleared: Vec<Coord>,
    pub refill: RefillReport,
}

/// Run a single resolution step, or return None if the board is stable.
pub fn resolve_step(board: &mut Board, rng: &mut TileRng) -> Option<ResolveStep> {
    let matches = find_all_matches(board);
    if matches.is_empty() {
        return None;
    }
    let cleared = clear_matches(board, &matches);
    let refill = board.apply_gravity(rng);
    Some(ResolveStep {
        matches,
        cleared,
        refill,
    })
}

/// Resolve until stable without scoring. Used to prepare a fresh board.
///
/// Returns the number of passes taken.
pub fn settle(
    board: &mut Board,
    rng: &mut TileRng,
    max_passes: usize,
) -> Result<usize, EngineError> {
    for passes in 0..max_passes {
        if resolve_step(board, rng).is_none() {
            return Ok(passes);
        }
    }
    if find_all_matches(board).is_empty() {
        return Ok(max_passes);
    }
    Err(EngineError::InvariantViolation {
        stage: "initial settle",
        passes: max_passes,
    })
}

/// A scored resolution step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CascadePass {
    pub step: ResolveStep,
    pub score: ScoreResult,
}

/// Resolve until stable, scoring every pass on its own.
///
/// Each pass is scored independently, so chained cascades add up pass by
/// pass rather than multiplying. Returns the passes in order; an empty vector
/// means the board was already stable.
#[instrument(level = "debug", skip(board, rng, rules))]
pub fn cascade(
    board: &mut Board,
    rng: &mut TileRng,
    rules: &ScoreRules,
    max_passes: usize,
) -> Result<Vec<CascadePass>, EngineError> {
    let mut passes = Vec::new();

    loop {
        if passes.len() == max_passes {
            if find_all_matches(board).is_empty() {
                break;
            }
            return Err(EngineError::InvariantViolation {
                stage: "cascade",
                passes: max_passes,
            });
        }

        let Some(step) = resolve_step(board, rng) else {
            break;
        };
        let score = score_matches(&step.matches, rules);
        debug!(
            pass = passes.len() + 1,
            matches = score.matches,
            tiles = score.tiles,
            points = score.points,
            "cascade pass"
        );
        passes.push(CascadePass { step, score });
    }

    Ok(passes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(i: u8) -> TileKind {
        TileKind::new(i)
    }

    #[test]
    fn test_finds_horizontal_and_vertical_runs() {
        let board = Board::parse(
            4,
            &[
                "AAAB", //
                "BCDA", //
                "BDCA", //
                "BCDC",
            ],
        )
        .unwrap();
        let matches = find_all_matches(&board);
        assert_eq!(matches.len(), 2);

        assert_eq!(matches[0].kind, kind(0));
        assert_eq!(matches[0].orientation, Orientation::Horizontal);
        assert_eq!(
            matches[0].tiles.as_slice(),
            &[Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)]
        );

        assert_eq!(matches[1].kind, kind(1));
        assert_eq!(matches[1].orientation, Orientation::Vertical);
        assert_eq!(
            matches[1].tiles.as_slice(),
            &[Coord::new(1, 0), Coord::new(2, 0), Coord::new(3, 0)]
        );
    }

    #[test]
    fn test_long_run_is_one_match() {
        let board = Board::parse(
            5,
            &[
                "AAAAA", //
                "BCBCB", //
                "CBCBC", //
                "BCBCB", //
                "CBCBC",
            ],
        )
        .unwrap();
        let matches = find_all_matches(&board);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].len(), 5);
    }

    #[test]
    fn test_two_runs_in_one_row() {
        let board = Board::parse(
            7,
            &[
                "AAABCCC", //
                "BCBCBDB", //
                "CBCBCBC", //
                "BCBCBDB", //
                "CBCBCBC", //
                "BCBCBDB", //
                "CBCBCBC",
            ],
        )
        .unwrap();
        let matches = find_all_matches(&board);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].kind, kind(0));
        assert_eq!(matches[1].kind, kind(2));
        assert_eq!(matches[1].tiles[0], Coord::new(0, 4));
    }

    #[test]
    fn test_crossing_tile_belongs_to_both_runs() {
        let board = Board::parse(
            4,
            &[
                "ABCD", //
                "AAAB", //
                "ACDC", //
                "DBCB",
            ],
        )
        .unwrap();
        let matches = find_all_matches(&board);
        assert_eq!(matches.len(), 2);
        let corner = Coord::new(1, 0);
        assert!(matches.iter().all(|m| m.tiles.contains(&corner)));

        let mut board = board;
        let cleared = clear_matches(&mut board, &matches);
        // 3 + 3 tiles, one shared.
        assert_eq!(cleared.len(), 5);
        assert_eq!(board.empty_count(), 5);
    }

    #[test]
    fn test_empty_cells_never_match() {
        let board = Board::parse(3, &["...", "ABC", "BCA"]).unwrap();
        assert!(find_all_matches(&board).is_empty());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut board = Board::parse(3, &["AAA", "BCB", "CBC"]).unwrap();
        let matches = find_all_matches(&board);
        let doubled = vec![matches[0].clone(), matches[0].clone()];
        let cleared = clear_matches(&mut board, &doubled);
        assert_eq!(cleared.len(), 3);
        assert_eq!(board.to_text(), vec!["...", "BCB", "CBC"]);
    }

    #[test]
    fn test_settle_reaches_stable_board() {
        let mut board = Board::parse(3, &["AAA", "AAA", "AAA"]).unwrap();
        let mut rng = TileRng::new(42);
        let passes = settle(&mut board, &mut rng, 10_000).unwrap();
        assert!(passes >= 1);
        assert!(find_all_matches(&board).is_empty());
        assert_eq!(board.empty_count(), 0);
    }

    #[test]
    fn test_settle_reports_invariant_violation() {
        // One kind only: every refill recreates the runs.
        let mut board = Board::parse(1, &["AAA", "AAA", "AAA"]).unwrap();
        let mut rng = TileRng::new(1);
        let err = settle(&mut board, &mut rng, 5).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvariantViolation {
                stage: "initial settle",
                passes: 5
            }
        );
    }

    #[test]
    fn test_cascade_scores_every_pass() {
        let mut board = Board::parse(
            4,
            &[
                "ABCD", //
                "BCDA", //
                "AAAB", //
                "CDBC",
            ],
        )
        .unwrap();
        let mut rng = TileRng::new(11);
        let rules = ScoreRules {
            match_points: 10.0,
            combo_multiplier: 1.5,
        };
        let passes = cascade(&mut board, &mut rng, &rules, 100).unwrap();

        assert!(!passes.is_empty());
        assert_eq!(passes[0].score.points, 30);
        assert_eq!(passes[0].step.cleared.len(), 3);
        assert!(find_all_matches(&board).is_empty());
        assert_eq!(board.empty_count(), 0);
    }

    #[test]
    fn test_cascade_on_stable_board_is_empty() {
        let mut board = Board::parse(3, &["ABC", "BCA", "CAB"]).unwrap();
        let before = board.clone();
        let mut rng = TileRng::new(1);
        let rules = ScoreRules {
            match_points: 10.0,
            combo_multiplier: 1.5,
        };
        let passes = cascade(&mut board, &mut rng, &rules, 100).unwrap();
        assert!(passes.is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn test_cascade_bound_is_enforced() {
        let mut board = Board::parse(1, &["AAA", "AAA", "AAA"]).unwrap();
        let mut rng = TileRng::new(1);
        let rules = ScoreRules {
            match_points: 10.0,
            combo_multiplier: 1.5,
        };
        let err = cascade(&mut board, &mut rng, &rules, 3).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvariantViolation {
                stage: "cascade",
                passes: 3
            }
        );
    }
}
