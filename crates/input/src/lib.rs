//! Terminal input module (presentation side).
//!
//! Maps `crossterm` key and mouse events into [`crate::types::GameAction`]s
//! and keeps the keyboard cursor. Nothing here touches the engine; the binary
//! turns an `Activate` into `Engine::activate_tile(cursor.coord())`.

pub mod cursor;
pub mod map;

pub use tui_match3_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, mouse_click, should_quit};
