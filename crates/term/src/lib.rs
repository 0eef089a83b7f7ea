//! Terminal "game renderer" module.
//!
//! A small rendering layer for playing the board in a terminal. It renders
//! into a plain framebuffer that is then flushed to the terminal, without a
//! widget toolkit in between.
//!
//! - [`fb`]: framebuffer of styled cells, with double-width glyph support
//! - [`palette`]: the one lookup table from tile symbol to glyph and color
//! - [`game_view`]: lays out board, side panel and game-over box; mouse hit-testing
//! - [`renderer`]: crossterm output with full and diff redraws

pub mod fb;
pub mod game_view;
pub mod palette;
pub mod renderer;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{BoardLayout, GameView, Viewport};
pub use palette::{glyph_for, Glyph};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
