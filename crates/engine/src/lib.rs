//! The engine facade a presentation layer drives.
//!
//! [`Engine`] owns at most one game at a time. It offers the three commands a
//! front-end needs (`new_game`, `activate_tile`, `restart`) and forwards every
//! resulting [`Transition`] to subscribed observers before returning it.
//!
//! ```
//! use tui_match3_engine::{Engine, EventLog};
//! use tui_match3_core::GameConfig;
//! use tui_match3_types::Coord;
//!
//! let mut engine = Engine::new(42);
//! let log = EventLog::new();
//! engine.subscribe(Box::new(log.clone()));
//!
//! let snapshot = engine.new_game(GameConfig::default()).unwrap();
//! assert_eq!(snapshot.moves_remaining, 20);
//!
//! engine.activate_tile(Coord::new(3, 3)).unwrap();
//! assert_eq!(log.names(), vec!["gameStarted", "tileSelected"]);
//! ```

pub mod observer;

use tracing::{debug, info};
use tui_match3_core::{EngineError, GameConfig, GameSnapshot, GameState, Transition};
use tui_match3_types::Coord;

pub use observer::{EventLog, GameObserver, TracingObserver};

/// Golden-ratio increment used to spread per-game seeds.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

pub struct Engine {
    base_seed: u64,
    /// Number of games started with `new_game`.
    games: u64,
    last_config: GameConfig,
    state: Option<GameState>,
    observers: Vec<Box<dyn GameObserver>>,
}

impl Engine {
    pub fn new(seed: u64) -> Self {
        Self {
            base_seed: seed,
            games: 0,
            last_config: GameConfig::default(),
            state: None,
            observers: Vec::new(),
        }
    }

    /// Seed for the `game`-th call to `new_game`.
    pub fn game_seed(base_seed: u64, game: u64) -> u64 {
        base_seed.wrapping_add(game.wrapping_mul(SEED_STRIDE))
    }

    pub fn subscribe(&mut self, observer: Box<dyn GameObserver>) {
        self.observers.push(observer);
    }

    /// Start a game with `config`, replacing any game in progress.
    ///
    /// On a config error the current game (if any) is kept.
    pub fn new_game(&mut self, config: GameConfig) -> Result<GameSnapshot, EngineError> {
        let seed = Self::game_seed(self.base_seed, self.games);
        let state = GameState::new(config.clone(), seed)?;
        self.games += 1;
        self.last_config = config;
        info!(game = self.games, seed, "engine started game");

        let started = state.started_transition();
        let snapshot = state.snapshot();
        self.state = Some(state);
        self.dispatch(std::slice::from_ref(&started));
        Ok(snapshot)
    }

    /// Activate the tile at `coord`.
    ///
    /// With no game running this is ignored like any other locked input.
    pub fn activate_tile(&mut self, coord: Coord) -> Result<Vec<Transition>, EngineError> {
        let Some(state) = self.state.as_mut() else {
            debug!(%coord, "activation with no game running");
            return Ok(Vec::new());
        };
        let transitions = state.activate_tile(coord)?;
        self.dispatch(&transitions);
        Ok(transitions)
    }

    /// Start over with the last used config.
    ///
    /// A running game is restarted in place and keeps its RNG stream; without
    /// one this behaves like `new_game`.
    pub fn restart(&mut self) -> Result<GameSnapshot, EngineError> {
        let Some(state) = self.state.as_mut() else {
            return self.new_game(self.last_config.clone());
        };
        state.restart()?;
        let started = state.started_transition();
        let snapshot = state.snapshot();
        self.dispatch(std::slice::from_ref(&started));
        Ok(snapshot)
    }

    pub fn snapshot(&self) -> Option<GameSnapshot> {
        self.state.as_ref().map(GameState::snapshot)
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.last_config
    }

    fn dispatch(&mut self, transitions: &[Transition]) {
        for t in transitions {
            for observer in &mut self.observers {
                observer.on_transition(t);
            }
        }
    }
}
