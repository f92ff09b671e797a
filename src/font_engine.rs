//! The public glyph rendering engine.
//!
//! A [`RenderContext`] pairs a parsed [`Font`] with output scaling, a pen
//! position, and behavior flags, and drives the full pipeline per glyph:
//! codepoint to glyph id, horizontal metrics, outline decode, font-unit
//! to pixel transform, clamp, tesselation, rasterization, and row
//! integration into an 8-bit coverage image.
//!
//! Glyphs are independent: rendering never mutates the context, so one
//! context can render any number of glyphs, and concurrent renders just
//! need distinct contexts over the same shared font.

use bitflags::bitflags;

use crate::basics::{iceil, ifloor, iround};
use crate::curves;
use crate::error::Result;
use crate::font::Font;
use crate::glyf;
use crate::kern;
use crate::outline::Outline;
use crate::rasterizer::Raster;
use crate::trans_affine::TransAffine;

bitflags! {
    /// Rendering behavior switches for a drawing context.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RenderFlags: u32 {
        /// The output y axis points down: image rows are emitted top to
        /// bottom and the vertical placement offset flips accordingly.
        const DOWNWARD_Y = 0x01;
        /// Produce the coverage image, not just metrics.
        const RENDER_IMAGE = 0x02;
        /// Report a codepoint that maps to glyph 0 as a distinguishable
        /// missing result instead of rendering the notdef outline.
        const CATCH_MISSING = 0x04;
    }
}

/// Scaled vertical line metrics, in output pixels.
///
/// `descent` is typically negative, following the font's convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    pub ascent: f64,
    pub descent: f64,
    pub line_gap: f64,
}

/// The result of rendering a single glyph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphResult {
    /// `width * height` coverage bytes in row-major order, top row
    /// first in output orientation. `None` when the glyph has no
    /// outline or `RENDER_IMAGE` was not requested.
    pub image: Option<Vec<u8>>,
    /// Horizontal pen advance in whole pixels.
    pub advance: i32,
    /// Offset from the pen position to the image's placement corner.
    pub x: i32,
    pub y: i32,
    /// Pixel dimensions of the rendered box.
    pub width: u32,
    pub height: u32,
    /// Set when `CATCH_MISSING` intercepted a codepoint mapping to
    /// glyph 0; every other field is zeroed.
    pub missing: bool,
}

/// A drawing context: font, pixel scaling, pen position, and flags.
///
/// Scales are in output pixels per em. The pen position `(x, y)` is
/// caller-managed advance state; the context never changes it.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub font: Font<'a>,
    pub x_scale: f64,
    pub y_scale: f64,
    pub x: f64,
    pub y: f64,
    pub flags: RenderFlags,
}

impl<'a> RenderContext<'a> {
    /// Context at the origin with image rendering enabled.
    pub fn new(font: Font<'a>, x_scale: f64, y_scale: f64) -> Self {
        Self {
            font,
            x_scale,
            y_scale,
            x: 0.0,
            y: 0.0,
            flags: RenderFlags::RENDER_IMAGE,
        }
    }

    /// Context with the same scale on both axes.
    pub fn new_uniform(font: Font<'a>, scale: f64) -> Self {
        Self::new(font, scale, scale)
    }

    /// Replace the flag set.
    pub fn with_flags(mut self, flags: RenderFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Scaled `(ascent, descent, line gap)` line metrics.
    pub fn line_metrics(&self) -> Result<LineMetrics> {
        let (ascent, descent, line_gap) = self.font.hhea_line_metrics()?;
        let factor = self.y_scale / self.font.units_per_em() as f64;
        Ok(LineMetrics {
            ascent: ascent as f64 * factor,
            descent: descent as f64 * factor,
            line_gap: line_gap as f64 * factor,
        })
    }

    /// Kerning adjustment `(x shift, y shift)` between two code points,
    /// in output pixels.
    pub fn kerning(&self, left: u32, right: u32) -> Result<(f64, f64)> {
        let left = self.font.glyph_id(left)?;
        let right = self.font.glyph_id(right)?;
        let (dx, dy) = kern::pair_adjustment(&self.font, left, right)?;
        let units_per_em = self.font.units_per_em() as f64;
        Ok((
            dx as f64 * self.x_scale / units_per_em,
            dy as f64 * self.y_scale / units_per_em,
        ))
    }

    /// Render the glyph for a code point.
    ///
    /// Empty outlines (such as the space character) succeed with a zero
    /// size and no image but still carry their advance. All working
    /// buffers are locals, so a failure anywhere leaves nothing behind.
    pub fn render_glyph(&self, codepoint: u32) -> Result<GlyphResult> {
        let glyph = self.font.glyph_id(codepoint)?;
        if glyph == 0 && self.flags.contains(RenderFlags::CATCH_MISSING) {
            return Ok(GlyphResult {
                missing: true,
                ..GlyphResult::default()
            });
        }

        let (advance_units, lsb_units) = self.font.hor_metrics(glyph)?;
        let units_per_em = self.font.units_per_em() as f64;
        let x_factor = self.x_scale / units_per_em;
        let y_factor = self.y_scale / units_per_em;
        let advance = iround(advance_units as f64 * x_factor);

        let offset = match glyf::outline_offset(&self.font, glyph)? {
            Some(offset) => offset,
            None => {
                return Ok(GlyphResult {
                    advance,
                    ..GlyphResult::default()
                })
            }
        };
        let (x_min, y_min, x_max, y_max) = glyf::read_bbox(&self.font, offset)?;

        // Shift so the transformed xMin coincides with the left side
        // bearing: glyphs line up on their bearing no matter how the
        // outline's own coordinates drift.
        let x_move = self.x + lsb_units as f64 * x_factor - x_min as f64 * x_factor;
        let y_move = self.y;

        // Snap the shifted box outward to pixel coordinates with one
        // extra pixel on each max side.
        let x1 = ifloor(x_min as f64 * x_factor + x_move);
        let y1 = ifloor(y_min as f64 * y_factor + y_move);
        let x2 = iceil(x_max as f64 * x_factor + x_move) + 1;
        let y2 = iceil(y_max as f64 * y_factor + y_move) + 1;
        let width = (x2 - x1) as u32;
        let height = (y2 - y1) as u32;

        let downward = self.flags.contains(RenderFlags::DOWNWARD_Y);
        let mut result = GlyphResult {
            image: None,
            advance,
            x: x1,
            y: if downward { -y2 } else { y1 },
            width,
            height,
            missing: false,
        };
        if !self.flags.contains(RenderFlags::RENDER_IMAGE) {
            return Ok(result);
        }

        // Pixel transform relative to the box origin.
        let mut affine = TransAffine::new_scaling(x_factor, y_factor);
        affine.multiply(&TransAffine::new_translation(
            x_move - x1 as f64,
            y_move - y1 as f64,
        ));

        let mut outline = Outline::new();
        glyf::decode_outline(&self.font, offset, &mut outline)?;
        outline.transform(&affine);
        outline.clamp(width, height);
        curves::tesselate(&mut outline)?;

        let mut raster = Raster::new(width, height)?;
        raster.draw_outline(&outline);

        let pixels = width as usize * height as usize;
        let mut image = Vec::new();
        image.try_reserve_exact(pixels)?;
        image.resize(pixels, 0);
        raster.integrate(&mut image, downward);
        result.image = Some(image);
        Ok(result)
    }
}

// ============================================================================
// Tests
// ============================================================================
