//! # ttf-raster
//!
//! Lightweight TrueType font parsing and anti-aliased glyph
//! rasterization, in pure Rust. The crate maps Unicode code points to
//! glyphs, extracts outlines and metrics from a borrowed font byte
//! image, and rasterizes outlines into 8-bit grayscale coverage images
//! suitable for subpixel-accurate text rendering.
//!
//! ## Architecture
//!
//! One glyph runs through a five-stage pipeline:
//!
//! 1. **Container parsing** — zero-copy, bounds-checked lookups in the
//!    sfnt table directory (`cmap`, `head`, `hhea`, `hmtx`, `loca`,
//!    `glyf`, `kern`)
//! 2. **Outline decoding** — simple and compound glyph descriptions
//!    expanded into points, lines, and quadratic Beziers
//! 3. **Transformation** — font units to output pixels, clamped into
//!    the target box
//! 4. **Tesselation** — adaptive flattening of curves into line
//!    segments
//! 5. **Rasterization** — trapezoidal coverage accumulation per pixel
//!    cell, integrated row by row into coverage bytes
//!
//! ## Example
//!
//! ```no_run
//! use ttf_raster::{Font, RenderContext, RenderFlags};
//!
//! # fn main() -> Result<(), ttf_raster::Error> {
//! # let font_bytes: &[u8] = &[];
//! let font = Font::new(font_bytes)?;
//! let ctx = RenderContext::new(font, 16.0, 16.0)
//!     .with_flags(RenderFlags::RENDER_IMAGE | RenderFlags::DOWNWARD_Y);
//! let glyph = ctx.render_glyph('A' as u32)?;
//! if let Some(image) = &glyph.image {
//!     assert_eq!(image.len(), (glyph.width * glyph.height) as usize);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The font image stays borrowed for the lifetime of the [`Font`];
//! mapping or reading font files is left to the caller. Only `cmap`
//! formats 4 and 6, horizontal metrics, and version-0 `kern` tables are
//! supported; hinting instructions are skipped.

pub mod basics;
pub mod curves;
pub mod error;
pub mod font;
pub mod font_engine;
pub mod outline;
pub mod rasterizer;
pub mod reader;
pub mod trans_affine;

mod cmap;
mod glyf;
mod hmtx;
mod kern;

pub use error::{Error, Result};
pub use font::Font;
pub use font_engine::{GlyphResult, LineMetrics, RenderContext, RenderFlags};
