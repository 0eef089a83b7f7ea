//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested, and the same layout
//! math is used to turn mouse clicks back into board coordinates.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::palette::glyph_for;
use crate::types::Coord;

/// Width reserved right of the board for score and moves.
const PANEL_W: u16 = 18;
/// Gap between the board frame and the panel.
const PANEL_GAP: u16 = 2;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(70, 70, 100);
const SELECTED_BG: Rgb = Rgb::new(150, 120, 40);
const SELECTED_CURSOR_BG: Rgb = Rgb::new(190, 160, 60);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the board frame lands for a given board size and viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Top-left corner of the frame (border included).
    pub x: u16,
    pub y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

/// A lightweight terminal renderer for the board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    /// Draw letters instead of emoji.
    ascii: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 4 columns fit a double-width emoji with a space on each side.
        Self {
            cell_w: 4,
            cell_h: 1,
            ascii: false,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(2),
            cell_h: cell_h.max(1),
            ascii: false,
        }
    }

    pub fn with_ascii(mut self, ascii: bool) -> Self {
        self.ascii = ascii;
        self
    }

    pub fn layout(&self, size: u8, viewport: Viewport) -> BoardLayout {
        let frame_w = size as u16 * self.cell_w + 2;
        let frame_h = size as u16 * self.cell_h + 2;
        let total_w = frame_w + PANEL_GAP + PANEL_W;
        BoardLayout {
            x: viewport.width.saturating_sub(total_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
        }
    }

    /// Board coordinate under the terminal cell `(x, y)`, if any.
    pub fn hit_test(&self, size: u8, viewport: Viewport, x: u16, y: u16) -> Option<Coord> {
        let layout = self.layout(size, viewport);
        let inner_x = x.checked_sub(layout.x + 1)?;
        let inner_y = y.checked_sub(layout.y + 1)?;
        let col = inner_x / self.cell_w;
        let row = inner_y / self.cell_h;
        if col >= size as u16 || row >= size as u16 {
            return None;
        }
        Some(Coord::new(row as u8, col as u8))
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// `cursor` is the keyboard cursor, highlighted when given.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        cursor: Option<Coord>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let layout = self.layout(snap.size, viewport);
        let bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: BOARD_BG,
            bold: false,
            dim: false,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        fb.fill_rect(
            layout.x + 1,
            layout.y + 1,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            bg,
        );
        self.draw_border(fb, layout.x, layout.y, layout.frame_w, layout.frame_h, border);

        for row in 0..snap.size {
            for col in 0..snap.size {
                let coord = Coord::new(row, col);
                let selected = snap.selected == Some(coord);
                let under_cursor = cursor == Some(coord);
                self.draw_tile(fb, snap, &layout, coord, selected, under_cursor);
            }
        }

        self.draw_side_panel(fb, snap, &layout);

        if snap.game_over {
            self.draw_game_over(fb, snap, &layout);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        cursor: Option<Coord>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        layout: &BoardLayout,
        coord: Coord,
        selected: bool,
        under_cursor: bool,
    ) {
        let x0 = layout.x + 1 + coord.col as u16 * self.cell_w;
        let y0 = layout.y + 1 + coord.row as u16 * self.cell_h;
        let bg = match (selected, under_cursor) {
            (true, true) => SELECTED_CURSOR_BG,
            (true, false) => SELECTED_BG,
            (false, true) => CURSOR_BG,
            (false, false) => BOARD_BG,
        };

        let base = CellStyle {
            fg: Rgb::new(90, 90, 100),
            bg,
            bold: false,
            dim: false,
        };
        fb.fill_rect(x0, y0, self.cell_w, self.cell_h, ' ', base);

        let gx = x0 + self.cell_w.saturating_sub(2) / 2;
        let gy = y0 + (self.cell_h - 1) / 2;

        let Some(kind) = snap.cell(coord).flatten() else {
            fb.put_char(gx, gy, '·', CellStyle { dim: true, ..base });
            return;
        };

        let symbol = snap.symbol_at(coord).unwrap_or("");
        let glyph = glyph_for(symbol, kind.index());
        let style = CellStyle {
            fg: glyph.color,
            bold: true,
            ..base
        };
        match glyph.wide {
            Some(ch) if !self.ascii => fb.put_wide(gx, gy, ch, style),
            _ => fb.put_char(gx, gy, glyph.ascii, style),
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &BoardLayout) {
        let x = layout.x + layout.frame_w + PANEL_GAP;
        let mut y = layout.y;

        let label = CellStyle {
            fg: Rgb::new(160, 160, 170),
            ..CellStyle::default()
        };
        let value = CellStyle {
            bold: true,
            ..CellStyle::default()
        };

        fb.put_str(x, y, "SCORE", label);
        y += 1;
        fb.put_str(x, y, &snap.score.to_string(), value);
        y += 2;

        fb.put_str(x, y, "MOVES", label);
        y += 1;
        let moves_style = if snap.moves_remaining <= 3 {
            CellStyle {
                fg: Rgb::new(230, 90, 80),
                ..value
            }
        } else {
            value
        };
        fb.put_str(x, y, &snap.moves_remaining.to_string(), moves_style);
        y += 2;

        fb.put_str(x, y, &format!("GAME {}", snap.episode_id + 1), label);
        y += 2;

        let hint = CellStyle {
            dim: true,
            ..label
        };
        for line in ["arrows/hjkl move", "space select", "click select", "r restart", "q quit"] {
            fb.put_str(x, y, line, hint);
            y += 1;
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &BoardLayout) {
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(120, 30, 30),
            bold: true,
            dim: false,
        };
        let score_line = format!("FINAL SCORE {}", snap.score);
        let lines = ["GAME OVER", score_line.as_str(), "[r] play again"];

        let mid = layout.y + layout.frame_h / 2;
        let top = mid.saturating_sub(1);
        for (i, text) in lines.iter().enumerate() {
            let w = text.chars().count() as u16 + 2;
            let x = layout.x + layout.frame_w.saturating_sub(w) / 2;
            let y = top + i as u16;
            fb.fill_rect(x, y, w, 1, ' ', style);
            fb.put_str(x + 1, y, text, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, GameState};

    fn snapshot() -> GameSnapshot {
        GameState::new(GameConfig::default(), 3).unwrap().snapshot()
    }

    #[test]
    fn layout_centers_board_and_panel() {
        let view = GameView::default();
        let layout = view.layout(8, Viewport::new(100, 30));
        assert_eq!(layout.frame_w, 34);
        assert_eq!(layout.frame_h, 10);
        assert_eq!(layout.x, (100 - 54) / 2);
        assert_eq!(layout.y, 10);
    }

    #[test]
    fn hit_test_round_trips_tile_origins() {
        let view = GameView::default();
        let vp = Viewport::new(100, 30);
        let layout = view.layout(8, vp);

        let x = layout.x + 1 + 5 * 4 + 3;
        let y = layout.y + 1 + 2;
        assert_eq!(view.hit_test(8, vp, x, y), Some(Coord::new(2, 5)));

        // Border and outside.
        assert_eq!(view.hit_test(8, vp, layout.x, layout.y + 1), None);
        assert_eq!(view.hit_test(8, vp, layout.x + 1, layout.y + 9), None);
        assert_eq!(view.hit_test(8, vp, 0, 0), None);
    }

    #[test]
    fn ascii_mode_draws_letters() {
        let snap = snapshot();
        let view = GameView::default().with_ascii(true);
        let fb = view.render(&snap, None, Viewport::new(80, 24));
        let layout = view.layout(snap.size, Viewport::new(80, 24));

        let text = fb.row_text(layout.y + 1);
        assert!(!text.contains('🍓'));
        assert!(text.chars().any(|c| "RBGYPO".contains(c)));
    }
}
