//! Horizontal kerning pair lookup (`kern` table).
//!
//! Only version-0 tables are understood. Each format-0 subtable that
//! applies to horizontal, non-minimum kerning contributes its pair value
//! to the result; `CROSS_STREAM` subtables adjust the cross axis
//! instead. Pair records are six bytes — left glyph, right glyph, value —
//! sorted by the combined `(left << 16) | right` key, so the exact-match
//! binary search runs directly over the record array.

use log::warn;

use crate::error::{Error, Result};
use crate::font::Font;

// Coverage bits of a version-0 subtable; the subtable format lives in
// the high byte of the same word.
const HORIZONTAL: u16 = 0x0001;
const MINIMUM: u16 = 0x0002;
const CROSS_STREAM: u16 = 0x0004;

/// Size of one kerning pair record.
const PAIR_STRIDE: usize = 6;

/// Accumulated unscaled kerning `(x, y)` for a glyph pair, in font units.
///
/// A font without a `kern` table kerns nothing; a `kern` table with a
/// version other than 0 is unsupported.
pub(crate) fn pair_adjustment(font: &Font, left: u16, right: u16) -> Result<(i32, i32)> {
    let data = font.data();
    let kern = match font.find_table(*b"kern")? {
        Some(offset) => offset,
        None => return Ok((0, 0)),
    };
    if data.u16(kern)? != 0 {
        return Err(Error::Unsupported("kern table version"));
    }

    let num_subtables = data.u16(kern + 2)? as usize;
    let key = (left as u32) << 16 | right as u32;
    let mut shift = (0i32, 0i32);
    let mut offset = kern + 4;
    for _ in 0..num_subtables {
        let length = data.u16(offset + 2)? as usize;
        let coverage = data.u16(offset + 4)?;
        let format = coverage >> 8;

        if format == 0 && coverage & HORIZONTAL != 0 && coverage & MINIMUM == 0 {
            let num_pairs = data.u16(offset + 6)? as usize;
            // Pair records follow numPairs, searchRange, entrySelector,
            // rangeShift.
            let pairs = offset + 14;
            if let Some(record) = data.bsearch_u32(key, pairs, num_pairs, PAIR_STRIDE)? {
                let value = data.i16(record + 4)? as i32;
                if coverage & CROSS_STREAM != 0 {
                    shift.1 += value;
                } else {
                    shift.0 += value;
                }
            }
        }

        if length == 0 {
            warn!("kern subtable reports zero length, ignoring the rest of the table");
            break;
        }
        offset += length;
    }
    Ok(shift)
}

// ============================================================================
// Tests
// ============================================================================
