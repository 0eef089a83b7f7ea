//! Game state module - ties board, resolver and session together
//!
//! Control flow for one activation:
//!
//! 1. Reject out-of-bounds coordinates; ignore input while busy or out of moves.
//! 2. The controller decides between select, deselect, reselect and swap.
//! 3. A swap spends a move, then the resolver either finds nothing (the swap
//!    is reverted) or cascades until the board is stable, scoring each pass.
//! 4. The session leaves the busy state and the terminal check runs.
//!
//! All of this happens synchronously inside [`GameState::activate_tile`]; the
//! returned transitions carry pacing hints for whoever animates them.

use tracing::{debug, info, instrument, warn};

use crate::board::Board;
use crate::config::GameConfig;
use crate::controller::{decide, SelectionOutcome};
use crate::error::{ConfigError, EngineError};
use crate::events::{CellChange, GameEvent, Transition};
use crate::matcher;
use crate::rng::TileRng;
use crate::scoring::ScoreRules;
use crate::session::Session;
use crate::snapshot::GameSnapshot;
use crate::types::{
    Coord, CLEAR_PAUSE_MS, DROP_ANIMATION_MS, INITIAL_SETTLE_MS, MAX_CASCADE_PASSES,
    REFILL_PAUSE_MS, SWAP_CHECK_MS,
};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    rules: ScoreRules,
    board: Board,
    session: Session,
    rng: TileRng,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
}

impl GameState {
    /// Validate `config` and deal a settled board from `seed`.
    #[instrument(skip(config), fields(size = config.board_size, kinds = config.tile_types.len()))]
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, EngineError> {
        config.validate()?;
        let mut rng = TileRng::new(seed);
        let board = Board::initialize(config.board_size, config.kind_count(), &mut rng)?;
        info!(moves = config.initial_moves, "new game");

        Ok(Self {
            rules: config.score_rules(),
            session: Session::new(config.initial_moves),
            config,
            board,
            rng,
            episode_id: 0,
        })
    }

    /// Start from a prepared board instead of a random one.
    ///
    /// The board is taken as-is, so a board that already holds runs will
    /// cascade on the first swap. Its size and kind count must agree with
    /// `config`, and every cell must hold a tile.
    pub fn with_board(config: GameConfig, board: Board, seed: u64) -> Result<Self, EngineError> {
        config.validate()?;
        if board.size() != config.board_size {
            return Err(ConfigError::BoardSizeMismatch {
                expected: config.board_size,
                actual: board.size(),
            }
            .into());
        }
        if board.kinds() != config.kind_count() {
            return Err(ConfigError::KindCountMismatch {
                expected: config.kind_count(),
                actual: board.kinds(),
            }
            .into());
        }
        let empty = board.empty_count();
        if empty > 0 {
            return Err(ConfigError::BoardNotFull { empty }.into());
        }

        Ok(Self {
            rules: config.score_rules(),
            session: Session::new(config.initial_moves),
            config,
            board,
            rng: TileRng::new(seed),
            episode_id: 0,
        })
    }

    /// Replace board and session with a fresh game under the same config.
    ///
    /// The RNG stream carries on, so each restart deals a new board. On error
    /// the current game is left untouched.
    pub fn restart(&mut self) -> Result<(), EngineError> {
        let board = Board::initialize(
            self.config.board_size,
            self.config.kind_count(),
            &mut self.rng,
        )?;
        self.board = board;
        self.session.reset(self.config.initial_moves);
        self.episode_id = self.episode_id.wrapping_add(1);
        info!(episode_id = self.episode_id, "game restarted");
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn moves_remaining(&self) -> u32 {
        self.session.moves_remaining()
    }

    pub fn selected(&self) -> Option<Coord> {
        self.session.selected()
    }

    pub fn is_busy(&self) -> bool {
        self.session.busy()
    }

    pub fn game_over(&self) -> bool {
        self.session.game_over()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            size: self.board.size(),
            tile_types: self.config.tile_types.clone(),
            board: self.board.to_rows(),
            score: self.session.score(),
            moves_remaining: self.session.moves_remaining(),
            selected: self.session.selected(),
            busy: self.session.busy(),
            game_over: self.session.game_over(),
            episode_id: self.episode_id,
            seed: self.rng.seed(),
        }
    }

    /// Transition announcing the current board as a fresh game.
    pub fn started_transition(&self) -> Transition {
        let changes = self
            .board
            .coords()
            .map(|coord| CellChange {
                coord,
                cell: self.board.get(coord).flatten(),
            })
            .collect();
        self.transition(
            GameEvent::GameStarted {
                episode_id: self.episode_id,
            },
            changes,
            INITIAL_SETTLE_MS,
        )
    }

    /// Handle a click/tap on `coord`.
    ///
    /// Returns the transitions caused, in order. Input while busy or after
    /// the budget is spent yields no transitions. Out-of-bounds coordinates
    /// are an error and change nothing.
    pub fn activate_tile(&mut self, coord: Coord) -> Result<Vec<Transition>, EngineError> {
        if !self.board.contains(coord) {
            warn!(%coord, "activation outside the board");
            return Err(EngineError::InvalidCoordinate {
                coord,
                size: self.board.size(),
            });
        }
        if !self.session.accepts_input() {
            debug!(%coord, busy = self.session.busy(), "activation ignored");
            return Ok(Vec::new());
        }

        let transitions = match decide(self.session.selected(), coord) {
            SelectionOutcome::Select(coord) => {
                self.session.select(coord);
                vec![self.transition(GameEvent::TileSelected { coord }, Vec::new(), 0)]
            }
            SelectionOutcome::Deselect(coord) => {
                self.session.clear_selection();
                vec![self.transition(GameEvent::TileDeselected { coord }, Vec::new(), 0)]
            }
            SelectionOutcome::Reselect { from, to } => {
                self.session.clear_selection();
                let deselected =
                    self.transition(GameEvent::TileDeselected { coord: from }, Vec::new(), 0);
                self.session.select(to);
                let selected =
                    self.transition(GameEvent::TileSelected { coord: to }, Vec::new(), 0);
                vec![deselected, selected]
            }
            SelectionOutcome::Swap { from, to } => self.swap_and_resolve(from, to)?,
        };

        Ok(transitions)
    }

    #[instrument(level = "debug", skip(self))]
    fn swap_and_resolve(
        &mut self,
        from: Coord,
        to: Coord,
    ) -> Result<Vec<Transition>, EngineError> {
        let mut out = Vec::new();

        self.session.commit_swap();
        self.board.swap(from, to);
        out.push(self.transition(
            GameEvent::SwapCommitted { from, to },
            self.cell_changes(&[from, to]),
            SWAP_CHECK_MS,
        ));

        let passes = matcher::cascade(
            &mut self.board,
            &mut self.rng,
            &self.rules,
            MAX_CASCADE_PASSES,
        )?;

        if passes.is_empty() {
            self.board.swap(from, to);
            self.session.settle();
            debug!(moves = self.session.moves_remaining(), "swap reverted");
            out.push(self.transition(
                GameEvent::SwapReverted { from, to },
                self.cell_changes(&[from, to]),
                SWAP_CHECK_MS,
            ));
        } else {
            for (i, pass) in passes.into_iter().enumerate() {
                let pass_no = i as u32 + 1;
                self.session.apply_pass(&pass.score);

                let cleared = pass
                    .step
                    .cleared
                    .iter()
                    .map(|&coord| CellChange { coord, cell: None })
                    .collect();
                out.push(self.transition(
                    GameEvent::TilesMatched {
                        pass: pass_no,
                        points: pass.score.points,
                        combo: pass.score.is_combo(),
                        matches: pass.step.matches,
                    },
                    cleared,
                    CLEAR_PAUSE_MS,
                ));

                let refilled = pass
                    .step
                    .refill
                    .changed_cells()
                    .map(|(coord, kind)| CellChange {
                        coord,
                        cell: Some(kind),
                    })
                    .collect();
                out.push(self.transition(
                    GameEvent::TilesRefilled {
                        pass: pass_no,
                        moved: pass.step.refill.moved,
                        spawned: pass.step.refill.spawned,
                        drop_ms: DROP_ANIMATION_MS,
                    },
                    refilled,
                    REFILL_PAUSE_MS,
                ));
            }
            debug!(score = self.session.score(), "cascade settled");
        }

        self.session.settle();
        if let Some(final_score) = self.session.check_terminal() {
            info!(final_score, episode_id = self.episode_id, "game over");
            out.push(self.transition(GameEvent::GameOver { final_score }, Vec::new(), 0));
        }

        Ok(out)
    }

    fn cell_changes(&self, coords: &[Coord]) -> Vec<CellChange> {
        coords
            .iter()
            .map(|&coord| CellChange {
                coord,
                cell: self.board.get(coord).flatten(),
            })
            .collect()
    }

    fn transition(&self, event: GameEvent, changes: Vec<CellChange>, hint_ms: u32) -> Transition {
        Transition {
            event,
            changes,
            score: self.session.score(),
            moves_remaining: self.session.moves_remaining(),
            selected: self.session.selected(),
            terminal: self.session.game_over(),
            hint_ms,
        }
    }
}
