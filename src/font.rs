//! TrueType container parsing and font-wide attributes.
//!
//! A [`Font`] borrows an immutable font byte image, validates the sfnt
//! scaler magic, and caches the handful of attributes every later lookup
//! needs: `unitsPerEm` from `head`, the `loca` offset format, and the
//! number of long `hmtx` records from `hhea`. Everything else is read on
//! demand through the table directory.

use log::debug;

use crate::cmap;
use crate::error::{Error, Result};
use crate::hmtx;
use crate::reader::Bytes;

/// TrueType scaler type used by Windows-flavored fonts.
const SCALER_WINDOWS: u32 = 0x0001_0000;
/// TrueType scaler type `"true"` used by Apple-flavored fonts.
const SCALER_TRUE: u32 = 0x7472_7565;

/// Offset of the first table record in the sfnt directory.
const DIRECTORY_BASE: usize = 12;
/// Size of one table directory record: tag, checksum, offset, length.
const DIRECTORY_STRIDE: usize = 16;

/// A parsed TrueType font borrowing its byte image.
///
/// The image must outlive every drawing context referring to it; the
/// crate never writes through it. Mapping or reading font files is the
/// caller's concern.
#[derive(Debug, Clone, Copy)]
pub struct Font<'a> {
    data: Bytes<'a>,
    units_per_em: u16,
    loca_format: i16,
    num_long_hmtx: u16,
}

impl<'a> Font<'a> {
    /// Parse a font from a byte slice.
    ///
    /// Validates the scaler magic and resolves the required `head` and
    /// `hhea` attributes. Fails with [`Error::BadMagic`] for non-TrueType
    /// images and [`Error::MalformedFont`] when a required table is
    /// missing, too short, or carries an out-of-range value.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let bytes = Bytes::new(data);
        let scaler = bytes.u32(0)?;
        if scaler != SCALER_WINDOWS && scaler != SCALER_TRUE {
            return Err(Error::BadMagic);
        }

        let mut font = Font {
            data: bytes,
            units_per_em: 0,
            loca_format: 0,
            num_long_hmtx: 0,
        };

        let head = font.table(*b"head")?;
        bytes.check(head, 54)?;
        font.units_per_em = bytes.u16(head + 18)?;
        if !(1..=16384).contains(&font.units_per_em) {
            return Err(Error::MalformedFont);
        }
        font.loca_format = bytes.i16(head + 50)?;
        if font.loca_format != 0 && font.loca_format != 1 {
            return Err(Error::MalformedFont);
        }

        let hhea = font.table(*b"hhea")?;
        bytes.check(hhea, 36)?;
        font.num_long_hmtx = bytes.u16(hhea + 34)?;
        if font.num_long_hmtx == 0 {
            return Err(Error::MalformedFont);
        }

        debug!(
            "loaded font: {} units per em, loca format {}, {} long hmtx records",
            font.units_per_em, font.loca_format, font.num_long_hmtx
        );
        Ok(font)
    }

    /// The borrowed byte image.
    #[inline]
    pub(crate) fn data(&self) -> Bytes<'a> {
        self.data
    }

    /// Font design-unit grid resolution, in `[1, 16384]`.
    #[inline]
    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// `loca` offset format: 0 selects 16-bit offsets (x2), 1 raw 32-bit.
    #[inline]
    pub(crate) fn loca_format(&self) -> i16 {
        self.loca_format
    }

    /// Number of full `(advance, lsb)` records in `hmtx`.
    #[inline]
    pub fn num_long_hmtx(&self) -> u16 {
        self.num_long_hmtx
    }

    // ========================================================================
    // Table directory
    // ========================================================================

    /// Locate a table by tag, or `None` when the font does not carry it.
    ///
    /// The directory records are sorted by tag, so this is a binary
    /// search over 16-byte records.
    pub(crate) fn find_table(&self, tag: [u8; 4]) -> Result<Option<usize>> {
        let num_tables = self.data.u16(4)? as usize;
        let record = self
            .data
            .bsearch_u32(u32::from_be_bytes(tag), DIRECTORY_BASE, num_tables, DIRECTORY_STRIDE)?;
        match record {
            Some(offset) => Ok(Some(self.data.u32(offset + 8)? as usize)),
            None => Ok(None),
        }
    }

    /// Locate a required table by tag.
    pub(crate) fn table(&self, tag: [u8; 4]) -> Result<usize> {
        self.find_table(tag)?.ok_or(Error::MalformedFont)
    }

    // ========================================================================
    // Per-glyph lookups
    // ========================================================================

    /// Map a Unicode code point to a glyph id; 0 is the missing glyph.
    pub fn glyph_id(&self, codepoint: u32) -> Result<u16> {
        cmap::glyph_id(self, codepoint)
    }

    /// Unscaled horizontal metrics `(advance width, left side bearing)`
    /// for a glyph, in font units.
    pub fn hor_metrics(&self, glyph: u16) -> Result<(u16, i16)> {
        hmtx::hor_metrics(self, glyph)
    }

    /// Raw `hhea` line metrics `(ascent, descent, line gap)` in font units.
    pub(crate) fn hhea_line_metrics(&self) -> Result<(i16, i16, i16)> {
        let hhea = self.table(*b"hhea")?;
        Ok((
            self.data.i16(hhea + 4)?,
            self.data.i16(hhea + 6)?,
            self.data.i16(hhea + 8)?,
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================
