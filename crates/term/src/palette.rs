//! TileKind to glyph lookup.
//!
//! The engine only knows kind indices and the symbol names from the config.
//! This table turns a symbol name into something drawable. Names it does not
//! know get a character and a color picked by kind index, so two kinds never
//! share a glyph.

use crate::fb::Rgb;

/// How one tile kind is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// Double-width emoji, if the symbol has one.
    pub wide: Option<char>,
    /// Single-column fallback.
    pub ascii: char,
    pub color: Rgb,
}

const KNOWN: [(&str, char, char, Rgb); 6] = [
    ("red", '🍓', 'R', Rgb::new(230, 70, 80)),
    ("blue", '🫐', 'B', Rgb::new(90, 120, 230)),
    ("green", '🥝', 'G', Rgb::new(110, 200, 90)),
    ("yellow", '🍋', 'Y', Rgb::new(240, 215, 70)),
    ("purple", '🍇', 'P', Rgb::new(170, 100, 220)),
    ("orange", '🍊', 'O', Rgb::new(250, 150, 40)),
];

/// Fallback characters by kind index. None of them is used by `KNOWN`.
const FALLBACK_ASCII: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'C', 'D', 'E', 'F', 'H',
];

const FALLBACK_COLORS: [Rgb; 8] = [
    Rgb::new(80, 220, 220),
    Rgb::new(220, 120, 180),
    Rgb::new(160, 160, 160),
    Rgb::new(200, 180, 120),
    Rgb::new(120, 200, 170),
    Rgb::new(200, 90, 50),
    Rgb::new(140, 140, 230),
    Rgb::new(230, 230, 230),
];

/// Glyph for `symbol`, the name of tile kind `index`.
pub fn glyph_for(symbol: &str, index: u8) -> Glyph {
    if let Some(&(_, wide, ascii, color)) = KNOWN
        .iter()
        .find(|(name, ..)| name.eq_ignore_ascii_case(symbol))
    {
        return Glyph {
            wide: Some(wide),
            ascii,
            color,
        };
    }

    let ascii = FALLBACK_ASCII[index as usize % FALLBACK_ASCII.len()];
    Glyph {
        wide: None,
        ascii,
        color: FALLBACK_COLORS[index as usize % FALLBACK_COLORS.len()],
    }
}
