//! Built-in 8x8 font.
//!
//! Glyphs come from the public-domain `font8x8` tables: basic Latin
//! (U+0000..U+007F) and Latin-1 (U+00A0..U+00FF). Each glyph is eight row
//! bitmasks, top row first, bit 0 = leftmost column. Anything else renders as
//! an empty cell but still occupies one advance.

use font8x8::UnicodeFonts;

const BLANK: [u8; 8] = [0; 8];

/// Row bitmasks for `ch`.
pub fn glyph(ch: char) -> [u8; 8] {
    let code = ch as u32;
    let found = if code < 0x80 {
        font8x8::BASIC_FONTS.get(ch)
    } else if (0xA0..=0xFF).contains(&code) {
        font8x8::LATIN_FONTS.get(ch)
    } else {
        None
    };
    found.unwrap_or(BLANK)
}
