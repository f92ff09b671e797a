//! Horizontal glyph metrics (`hmtx` table).
//!
//! The table stores `numLongHmtx` full `(advance, lsb)` records; glyphs
//! past that point share the last advance width and read their left side
//! bearing from a trailing i16 array.

use crate::error::Result;
use crate::font::Font;

/// Unscaled `(advance width, left side bearing)` for a glyph, in font
/// units.
pub(crate) fn hor_metrics(font: &Font, glyph: u16) -> Result<(u16, i16)> {
    let data = font.data();
    let hmtx = font.table(*b"hmtx")?;
    let num_long = font.num_long_hmtx() as usize;
    let glyph = glyph as usize;

    if glyph < num_long {
        let offset = hmtx + 4 * glyph;
        Ok((data.u16(offset)?, data.i16(offset + 2)?))
    } else {
        let advance = data.u16(hmtx + 4 * (num_long - 1))?;
        let lsb = data.i16(hmtx + 4 * num_long + 2 * (glyph - num_long))?;
        Ok((advance, lsb))
    }
}

// ============================================================================
// Tests
// ============================================================================
