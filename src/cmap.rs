//! Character-to-glyph mapping (`cmap` table).
//!
//! Scans the encoding records for the first Unicode BMP subtable —
//! platform/encoding `(0, 3)` or `(3, 1)` — and dispatches on its format.
//! Only format 4 (segment mapping) and format 6 (trimmed table) are
//! recognized; anything else is reported as unsupported.
//!
//! Format 4 arithmetic is intentionally modular: `(code + idDelta)` wraps
//! at 2^16 per the table design, so every addition here uses explicit
//! wrapping semantics.

use log::debug;

use crate::error::{Error, Result};
use crate::font::Font;
use crate::reader::Bytes;

/// Unicode platform, BMP encoding.
const UNICODE_BMP: (u16, u16) = (0, 3);
/// Windows platform, Unicode BMP encoding.
const WINDOWS_BMP: (u16, u16) = (3, 1);

/// Map a code point to its glyph id; 0 means the glyph is missing.
pub(crate) fn glyph_id(font: &Font, codepoint: u32) -> Result<u16> {
    let data = font.data();
    let cmap = font.table(*b"cmap")?;
    let num_records = data.u16(cmap + 2)? as usize;

    for idx in 0..num_records {
        let record = cmap + 4 + idx * 8;
        let pair = (data.u16(record)?, data.u16(record + 2)?);
        if pair != UNICODE_BMP && pair != WINDOWS_BMP {
            continue;
        }
        let subtable = cmap + data.u32(record + 4)? as usize;
        let format = data.u16(subtable)?;
        debug!("cmap: platform {:?} subtable format {}", pair, format);
        return match format {
            4 => lookup_fmt4(data, subtable + 6, codepoint),
            6 => lookup_fmt6(data, subtable + 6, codepoint),
            _ => Err(Error::Unsupported("cmap subtable format")),
        };
    }
    Err(Error::Unsupported("no Unicode BMP character map"))
}

/// Format 4: segment mapping to delta values. `base` points at the
/// `segCountX2` field (the format/length/language header is skipped).
fn lookup_fmt4(data: Bytes, base: usize, codepoint: u32) -> Result<u16> {
    // The table can only express the BMP.
    if codepoint > 0xFFFF {
        return Ok(0);
    }
    let code = codepoint as u16;

    let seg_count_x2 = data.u16(base)? as usize;
    if seg_count_x2 == 0 || seg_count_x2 & 1 != 0 {
        return Err(Error::MalformedFont);
    }

    // Array layout: endCode[], reservedPad, startCode[], idDelta[],
    // idRangeOffset[], glyph id array.
    let end_codes = base + 8;
    let start_codes = end_codes + seg_count_x2 + 2;
    let id_deltas = start_codes + seg_count_x2;
    let id_range_offsets = id_deltas + seg_count_x2;
    data.check(id_range_offsets, seg_count_x2)?;

    // Binary search over the segment end codes for the first >= code.
    let seg_x2 = 2 * data.csearch_u16(code, end_codes, seg_count_x2 / 2, 2)?;

    let start_code = data.u16(start_codes + seg_x2)?;
    if start_code > code {
        return Ok(0);
    }
    let id_delta = data.u16(id_deltas + seg_x2)?;
    let id_range_offset = data.u16(id_range_offsets + seg_x2)? as usize;
    if id_range_offset == 0 {
        return Ok(code.wrapping_add(id_delta));
    }

    // The range offset is relative to its own position in the table.
    let id_offset =
        id_range_offsets + seg_x2 + id_range_offset + 2 * (code - start_code) as usize;
    let id = data.u16(id_offset)?;
    if id == 0 {
        Ok(0)
    } else {
        Ok(id.wrapping_add(id_delta))
    }
}

/// Format 6: trimmed table mapping a dense code range. `base` points just
/// past the format/length/language header.
fn lookup_fmt6(data: Bytes, base: usize, codepoint: u32) -> Result<u16> {
    let first_code = data.u16(base)? as u32;
    let entry_count = data.u16(base + 2)? as u32;
    if codepoint < first_code || codepoint - first_code >= entry_count {
        return Ok(0);
    }
    data.u16(base + 4 + 2 * (codepoint - first_code) as usize)
}

// ============================================================================
// Tests
// ============================================================================
