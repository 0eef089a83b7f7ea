//! Transition observers.
//!
//! Observers see every transition the engine produces, in order, after the
//! state change it describes has been applied.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;
use tui_match3_core::{GameEvent, Transition};

pub trait GameObserver {
    fn on_transition(&mut self, transition: &Transition);
}

/// Records transitions. Clones share the same log, so a test can keep one
/// handle and subscribe the other.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Rc<RefCell<Vec<Transition>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transitions(&self) -> Vec<Transition> {
        self.entries.borrow().clone()
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.entries
            .borrow()
            .iter()
            .map(|t| t.event.clone())
            .collect()
    }

    /// Event names in order, e.g. `["gameStarted", "tileSelected"]`.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.borrow().iter().map(|t| t.event.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl GameObserver for EventLog {
    fn on_transition(&mut self, transition: &Transition) {
        self.entries.borrow_mut().push(transition.clone());
    }
}

/// Logs each transition at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl GameObserver for TracingObserver {
    fn on_transition(&mut self, t: &Transition) {
        debug!(
            event = t.event.name(),
            changes = t.changes.len(),
            score = t.score,
            moves = t.moves_remaining,
            terminal = t.terminal,
            hint_ms = t.hint_ms,
            "transition"
        );
    }
}
