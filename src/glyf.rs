//! Glyph outline decoding (`loca` and `glyf` tables).
//!
//! A glyph id resolves through `loca` to a byte range in `glyf`; an
//! empty range is a legal glyph with no outline. The outline description
//! is either *simple* — contour end points, run-length-encoded flag
//! bytes, and delta-encoded coordinates — or *compound*, a list of child
//! glyph references each carrying an offset and an optional 2.14
//! fixed-point scale or 2x2 matrix.
//!
//! The contour interpreter turns each closed loop of on/off-curve points
//! into line and quadratic-curve segments. Consecutive off-curve points
//! imply an on-curve midpoint between them; a contour that starts and
//! ends off-curve gets a synthesized on-curve anchor at the midpoint of
//! its two loose ends. Hinting instructions are skipped.

use smallvec::SmallVec;

use crate::basics::{midpoint, Point};
use crate::error::{Error, Result};
use crate::font::Font;
use crate::outline::Outline;
use crate::trans_affine::TransAffine;

// ============================================================================
// Flag bits
// ============================================================================

// Simple-outline point flags.
const POINT_IS_ON_CURVE: u8 = 0x01;
const X_CHANGE_IS_SMALL: u8 = 0x02;
const Y_CHANGE_IS_SMALL: u8 = 0x04;
const REPEAT_FLAG: u8 = 0x08;
const X_CHANGE_IS_ZERO: u8 = 0x10;
const X_CHANGE_IS_POSITIVE: u8 = 0x10;
const Y_CHANGE_IS_ZERO: u8 = 0x20;
const Y_CHANGE_IS_POSITIVE: u8 = 0x20;

// Compound-outline component flags.
const OFFSETS_ARE_LARGE: u16 = 0x0001;
const ACTUAL_XY_OFFSETS: u16 = 0x0002;
const GOT_A_SINGLE_SCALE: u16 = 0x0008;
const MORE_COMPONENTS: u16 = 0x0020;
const GOT_AN_X_AND_Y_SCALE: u16 = 0x0040;
const GOT_A_SCALE_MATRIX: u16 = 0x0080;

/// Compound glyphs may nest this deep; anything beyond is rejected.
const MAX_COMPOUND_DEPTH: usize = 4;

/// Interpret a signed 16-bit 2.14 fixed-point value.
#[inline]
fn f2dot14(v: i16) -> f64 {
    v as f64 / 16384.0
}

// ============================================================================
// loca resolution and glyph header
// ============================================================================

/// Resolve a glyph id to its outline offset inside the font image.
///
/// Returns `None` when the glyph has a completely empty outline
/// (`this == next` in `loca`), which the format allows.
pub(crate) fn outline_offset(font: &Font, glyph: u16) -> Result<Option<usize>> {
    let data = font.data();
    let loca = font.table(*b"loca")?;
    let glyph = glyph as usize;
    let (this, next) = match font.loca_format() {
        0 => (
            data.u16(loca + 2 * glyph)? as usize * 2,
            data.u16(loca + 2 * glyph + 2)? as usize * 2,
        ),
        _ => (
            data.u32(loca + 4 * glyph)? as usize,
            data.u32(loca + 4 * glyph + 4)? as usize,
        ),
    };
    if this == next {
        Ok(None)
    } else {
        Ok(Some(font.table(*b"glyf")? + this))
    }
}

/// Read the font-unit bounding box from a glyph header.
///
/// A box that is empty or inverted on either axis is malformed.
pub(crate) fn read_bbox(font: &Font, offset: usize) -> Result<(i16, i16, i16, i16)> {
    let data = font.data();
    data.check(offset, 10)?;
    let x_min = data.i16(offset + 2)?;
    let y_min = data.i16(offset + 4)?;
    let x_max = data.i16(offset + 6)?;
    let y_max = data.i16(offset + 8)?;
    if x_max <= x_min || y_max <= y_min {
        return Err(Error::MalformedFont);
    }
    Ok((x_min, y_min, x_max, y_max))
}

// ============================================================================
// Outline decoding
// ============================================================================

/// Decode the outline description at `offset` into `outline`, in font
/// units.
pub(crate) fn decode_outline(font: &Font, offset: usize, outline: &mut Outline) -> Result<()> {
    let mut active = SmallVec::new();
    decode(font, offset, 0, &mut active, outline)
}

fn decode(
    font: &Font,
    offset: usize,
    depth: usize,
    active: &mut SmallVec<[u16; MAX_COMPOUND_DEPTH]>,
    outline: &mut Outline,
) -> Result<()> {
    if depth > MAX_COMPOUND_DEPTH {
        return Err(Error::Recursion);
    }
    let num_contours = font.data().i16(offset)?;
    if num_contours >= 0 {
        decode_simple(font, offset + 10, num_contours as usize, outline)
    } else {
        decode_compound(font, offset + 10, depth, active, outline)
    }
}

/// Decode a simple outline: contour end points, flags, coordinates, then
/// one contour walk per closed loop.
fn decode_simple(
    font: &Font,
    offset: usize,
    num_contours: usize,
    outline: &mut Outline,
) -> Result<()> {
    if num_contours == 0 {
        return Ok(());
    }
    let data = font.data();

    // Contour end points, strictly monotonic.
    let mut end_pts: SmallVec<[u16; 16]> = SmallVec::new();
    for i in 0..num_contours {
        let end = data.u16(offset + 2 * i)?;
        if let Some(&prev) = end_pts.last() {
            if end <= prev {
                return Err(Error::MalformedFont);
            }
        }
        end_pts.push(end);
    }
    let last = *end_pts.last().unwrap();
    // A last index of 0xFFFF would overflow the 16-bit point budget once
    // the walk synthesizes midpoints.
    if last == u16::MAX {
        return Err(Error::MalformedFont);
    }
    let num_pts = last as usize + 1;
    let mut offset = offset + 2 * num_contours;

    // Skip the hinting program.
    let instruction_len = data.u16(offset)? as usize;
    offset += 2 + instruction_len;

    // Flag bytes with run-length expansion.
    let mut flags: SmallVec<[u8; 128]> = SmallVec::new();
    let mut value = 0u8;
    let mut repeat = 0u32;
    for _ in 0..num_pts {
        if repeat > 0 {
            repeat -= 1;
        } else {
            value = data.u8(offset)?;
            offset += 1;
            if value & REPEAT_FLAG != 0 {
                repeat = data.u8(offset)? as u32;
                offset += 1;
            }
        }
        flags.push(value);
    }

    // Coordinate byte totals let both delta arrays be bounds checked up
    // front, before any point is produced.
    let mut x_bytes = 0usize;
    let mut y_bytes = 0usize;
    for &f in flags.iter() {
        if f & X_CHANGE_IS_SMALL != 0 {
            x_bytes += 1;
        } else if f & X_CHANGE_IS_ZERO == 0 {
            x_bytes += 2;
        }
        if f & Y_CHANGE_IS_SMALL != 0 {
            y_bytes += 1;
        } else if f & Y_CHANGE_IS_ZERO == 0 {
            y_bytes += 2;
        }
    }
    data.check(offset, x_bytes + y_bytes)?;

    let base = outline.points.len();
    let mut x_offset = offset;
    let mut y_offset = offset + x_bytes;
    let mut x = 0i64;
    let mut y = 0i64;
    for &f in flags.iter() {
        if f & X_CHANGE_IS_SMALL != 0 {
            let magnitude = data.u8(x_offset)? as i64;
            x_offset += 1;
            x += if f & X_CHANGE_IS_POSITIVE != 0 {
                magnitude
            } else {
                -magnitude
            };
        } else if f & X_CHANGE_IS_ZERO == 0 {
            x += data.i16(x_offset)? as i64;
            x_offset += 2;
        }
        if f & Y_CHANGE_IS_SMALL != 0 {
            let magnitude = data.u8(y_offset)? as i64;
            y_offset += 1;
            y += if f & Y_CHANGE_IS_POSITIVE != 0 {
                magnitude
            } else {
                -magnitude
            };
        } else if f & Y_CHANGE_IS_ZERO == 0 {
            y += data.i16(y_offset)? as i64;
            y_offset += 2;
        }
        outline.add_point(Point::new(x as f64, y as f64))?;
    }

    let mut first = 0usize;
    for &end in end_pts.iter() {
        walk_contour(outline, &flags, base, first, end as usize)?;
        first = end as usize + 1;
    }
    Ok(())
}

/// Trace one contour into line and curve segments.
///
/// `first` and `last` index the contour's points relative to the glyph;
/// `base` is the outline index of the glyph's first point.
fn walk_contour(
    outline: &mut Outline,
    flags: &[u8],
    base: usize,
    first: usize,
    last: usize,
) -> Result<()> {
    // A loop of fewer than two points has no area.
    if last - first < 1 {
        return Ok(());
    }
    let on_curve = |i: usize| flags[i] & POINT_IS_ON_CURVE != 0;
    let abs = |i: usize| (base + i) as u16;

    // Pick the loose end the walk starts and closes at: the first point
    // if it is on-curve, else the last, else a synthesized midpoint
    // anchor between the two.
    let (loose, range) = if on_curve(first) {
        (abs(first), first + 1..last + 1)
    } else if on_curve(last) {
        (abs(last), first..last)
    } else {
        let anchor = midpoint(outline.point(abs(first)), outline.point(abs(last)));
        (outline.add_point(anchor)?, first..last + 1)
    };

    let mut beg = loose;
    let mut ctrl: Option<u16> = None;
    for i in range {
        let point = abs(i);
        if on_curve(i) {
            match ctrl.take() {
                Some(c) => outline.add_curve(beg, point, c)?,
                None => outline.add_line(beg, point)?,
            }
            beg = point;
        } else {
            match ctrl {
                Some(c) => {
                    // Two consecutive control points imply an on-curve
                    // midpoint between them.
                    let mid = outline.add_point(midpoint(outline.point(c), outline.point(point)))?;
                    outline.add_curve(beg, mid, c)?;
                    beg = mid;
                    ctrl = Some(point);
                }
                None => ctrl = Some(point),
            }
        }
    }
    // Close the loop back to the loose end under the same rule.
    match ctrl {
        Some(c) => outline.add_curve(beg, loose, c)?,
        None => outline.add_line(beg, loose)?,
    }
    Ok(())
}

/// Decode a compound outline: recursively expand each component, then
/// apply its affine to the points it appended.
fn decode_compound(
    font: &Font,
    offset: usize,
    depth: usize,
    active: &mut SmallVec<[u16; MAX_COMPOUND_DEPTH]>,
    outline: &mut Outline,
) -> Result<()> {
    let data = font.data();
    let mut offset = offset;
    loop {
        let flags = data.u16(offset)?;
        let glyph = data.u16(offset + 2)?;
        offset += 4;

        if flags & ACTUAL_XY_OFFSETS == 0 {
            // Point-matching composition is not implemented.
            return Err(Error::Unsupported("compound glyph point matching"));
        }
        let (dx, dy) = if flags & OFFSETS_ARE_LARGE != 0 {
            let pair = (data.i16(offset)? as f64, data.i16(offset + 2)? as f64);
            offset += 4;
            pair
        } else {
            let pair = (data.i8(offset)? as f64, data.i8(offset + 1)? as f64);
            offset += 2;
            pair
        };

        let mut affine = TransAffine::new_translation(dx, dy);
        if flags & GOT_A_SINGLE_SCALE != 0 {
            let scale = f2dot14(data.i16(offset)?);
            offset += 2;
            affine.sx = scale;
            affine.sy = scale;
        } else if flags & GOT_AN_X_AND_Y_SCALE != 0 {
            affine.sx = f2dot14(data.i16(offset)?);
            affine.sy = f2dot14(data.i16(offset + 2)?);
            offset += 4;
        } else if flags & GOT_A_SCALE_MATRIX != 0 {
            affine.sx = f2dot14(data.i16(offset)?);
            affine.shy = f2dot14(data.i16(offset + 2)?);
            affine.shx = f2dot14(data.i16(offset + 4)?);
            affine.sy = f2dot14(data.i16(offset + 6)?);
            offset += 8;
        }

        // A component referring to a glyph already being expanded can
        // only come from a reference cycle.
        if active.contains(&glyph) {
            return Err(Error::Recursion);
        }
        if let Some(child) = outline_offset(font, glyph)? {
            let first = outline.points.len();
            active.push(glyph);
            let result = decode(font, child, depth + 1, active, outline);
            active.pop();
            result?;
            outline.transform_from(first, &affine);
        }

        if flags & MORE_COMPONENTS == 0 {
            return Ok(());
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
