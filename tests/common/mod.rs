//! Synthetic TrueType images for end-to-end tests.
#![allow(dead_code)] // shared between the test and bench binaries
//!
//! Builds complete, loadable font byte images from glyph descriptions:
//! table directory, `head`, `hhea`, `hmtx`, `cmap` (format 4 or 6),
//! `loca` (format 0), `glyf`, and optionally `kern`. Keeping the fonts
//! synthetic makes every expected value in the tests exact.

/// One glyph: metrics plus its raw `glyf` description (empty = no
/// outline).
pub struct GlyphSpec {
    pub advance: u16,
    pub lsb: i16,
    pub description: Vec<u8>,
}

/// One compound-glyph component reference.
pub struct Component {
    pub glyph: u16,
    pub dx: i16,
    pub dy: i16,
    /// Raw 2.14 uniform scale (16384 = 1.0), when present.
    pub scale: Option<i16>,
}

#[derive(Clone, Copy)]
pub enum CmapKind {
    /// Format 4, one segment per mapping.
    Segmented,
    /// Format 6 over a dense range starting at the given code.
    Trimmed(u16),
}

pub struct FontBuilder {
    pub units_per_em: u16,
    pub ascent: i16,
    pub descent: i16,
    pub line_gap: i16,
    pub glyphs: Vec<GlyphSpec>,
    /// Codepoint to glyph id, kept sorted by codepoint.
    pub mappings: Vec<(u16, u16)>,
    pub cmap_kind: CmapKind,
    pub kern_pairs: Vec<(u16, u16, i16)>,
}

impl FontBuilder {
    /// A builder seeded with a visible notdef box as glyph 0.
    pub fn new() -> Self {
        Self {
            units_per_em: 1000,
            ascent: 800,
            descent: -200,
            line_gap: 90,
            glyphs: vec![GlyphSpec {
                advance: 500,
                lsb: 50,
                description: simple_box(50, 0, 450, 700),
            }],
            mappings: Vec::new(),
            cmap_kind: CmapKind::Segmented,
            kern_pairs: Vec::new(),
        }
    }

    /// Add a glyph and return its id.
    pub fn add_glyph(&mut self, advance: u16, lsb: i16, description: Vec<u8>) -> u16 {
        self.glyphs.push(GlyphSpec {
            advance,
            lsb,
            description,
        });
        (self.glyphs.len() - 1) as u16
    }

    /// Map a character to a glyph id.
    pub fn map(&mut self, ch: char, glyph: u16) {
        self.mappings.push((ch as u16, glyph));
        self.mappings.sort_unstable();
    }

    pub fn build(&self) -> Vec<u8> {
        // glyf bodies and format-0 loca offsets (byte offset / 2).
        let mut glyf = Vec::new();
        let mut loca = Vec::new();
        for glyph in &self.glyphs {
            loca.extend_from_slice(&((glyf.len() / 2) as u16).to_be_bytes());
            glyf.extend_from_slice(&glyph.description);
            if glyf.len() % 2 == 1 {
                glyf.push(0);
            }
        }
        loca.extend_from_slice(&((glyf.len() / 2) as u16).to_be_bytes());

        let mut hmtx = Vec::new();
        for glyph in &self.glyphs {
            hmtx.extend_from_slice(&glyph.advance.to_be_bytes());
            hmtx.extend_from_slice(&glyph.lsb.to_be_bytes());
        }

        let mut head = vec![0u8; 54];
        head[18..20].copy_from_slice(&self.units_per_em.to_be_bytes());
        // indexToLocFormat at 50 stays 0 (short offsets).

        let mut hhea = vec![0u8; 36];
        hhea[4..6].copy_from_slice(&self.ascent.to_be_bytes());
        hhea[6..8].copy_from_slice(&self.descent.to_be_bytes());
        hhea[8..10].copy_from_slice(&self.line_gap.to_be_bytes());
        hhea[34..36].copy_from_slice(&(self.glyphs.len() as u16).to_be_bytes());

        let mut tables: Vec<([u8; 4], Vec<u8>)> = vec![
            (*b"cmap", self.build_cmap()),
            (*b"glyf", glyf),
            (*b"head", head),
            (*b"hhea", hhea),
            (*b"hmtx", hmtx),
        ];
        if !self.kern_pairs.is_empty() {
            tables.push((*b"kern", self.build_kern()));
        }
        tables.push((*b"loca", loca));
        tables.sort_by_key(|(tag, _)| *tag);

        let mut font = Vec::new();
        font.extend_from_slice(&0x0001_0000u32.to_be_bytes());
        font.extend_from_slice(&(tables.len() as u16).to_be_bytes());
        font.extend_from_slice(&[0; 6]);
        let mut offset = 12 + tables.len() * 16;
        for (tag, body) in &tables {
            font.extend_from_slice(tag);
            font.extend_from_slice(&[0; 4]);
            font.extend_from_slice(&(offset as u32).to_be_bytes());
            font.extend_from_slice(&(body.len() as u32).to_be_bytes());
            offset += body.len();
        }
        for (_, body) in &tables {
            font.extend_from_slice(body);
        }
        font
    }

    fn build_cmap(&self) -> Vec<u8> {
        let subtable = match self.cmap_kind {
            CmapKind::Segmented => {
                let seg_count = self.mappings.len() + 1;
                let mut sub = Vec::new();
                sub.extend_from_slice(&4u16.to_be_bytes()); // format
                sub.extend_from_slice(&0u16.to_be_bytes()); // length (patched)
                sub.extend_from_slice(&0u16.to_be_bytes()); // language
                sub.extend_from_slice(&((seg_count * 2) as u16).to_be_bytes());
                sub.extend_from_slice(&[0; 6]); // searchRange etc.
                for &(code, _) in &self.mappings {
                    sub.extend_from_slice(&code.to_be_bytes());
                }
                sub.extend_from_slice(&0xFFFFu16.to_be_bytes());
                sub.extend_from_slice(&0u16.to_be_bytes()); // reservedPad
                for &(code, _) in &self.mappings {
                    sub.extend_from_slice(&code.to_be_bytes());
                }
                sub.extend_from_slice(&0xFFFFu16.to_be_bytes());
                for &(code, glyph) in &self.mappings {
                    sub.extend_from_slice(&glyph.wrapping_sub(code).to_be_bytes());
                }
                sub.extend_from_slice(&1u16.to_be_bytes()); // 0xFFFF maps to 0
                for _ in 0..seg_count {
                    sub.extend_from_slice(&0u16.to_be_bytes()); // idRangeOffset
                }
                let length = sub.len() as u16;
                sub[2..4].copy_from_slice(&length.to_be_bytes());
                sub
            }
            CmapKind::Trimmed(first_code) => {
                let mut ids = Vec::new();
                for &(code, glyph) in &self.mappings {
                    let index = (code - first_code) as usize;
                    if ids.len() <= index {
                        ids.resize(index + 1, 0u16);
                    }
                    ids[index] = glyph;
                }
                let mut sub = Vec::new();
                sub.extend_from_slice(&6u16.to_be_bytes()); // format
                sub.extend_from_slice(&((10 + 2 * ids.len()) as u16).to_be_bytes());
                sub.extend_from_slice(&0u16.to_be_bytes()); // language
                sub.extend_from_slice(&first_code.to_be_bytes());
                sub.extend_from_slice(&(ids.len() as u16).to_be_bytes());
                for id in ids {
                    sub.extend_from_slice(&id.to_be_bytes());
                }
                sub
            }
        };

        let mut cmap = Vec::new();
        cmap.extend_from_slice(&0u16.to_be_bytes()); // version
        cmap.extend_from_slice(&1u16.to_be_bytes()); // numTables
        cmap.extend_from_slice(&3u16.to_be_bytes()); // platform: Windows
        cmap.extend_from_slice(&1u16.to_be_bytes()); // encoding: Unicode BMP
        cmap.extend_from_slice(&12u32.to_be_bytes()); // subtable offset
        cmap.extend_from_slice(&subtable);
        cmap
    }

    fn build_kern(&self) -> Vec<u8> {
        let mut pairs = self.kern_pairs.clone();
        pairs.sort_unstable_by_key(|&(left, right, _)| ((left as u32) << 16) | right as u32);

        let mut kern = Vec::new();
        kern.extend_from_slice(&0u16.to_be_bytes()); // version
        kern.extend_from_slice(&1u16.to_be_bytes()); // numSubtables
        kern.extend_from_slice(&0u16.to_be_bytes()); // subtable version
        kern.extend_from_slice(&((14 + 6 * pairs.len()) as u16).to_be_bytes());
        kern.extend_from_slice(&0x0001u16.to_be_bytes()); // horizontal, format 0
        kern.extend_from_slice(&(pairs.len() as u16).to_be_bytes());
        kern.extend_from_slice(&[0; 6]); // searchRange etc.
        for (left, right, value) in pairs {
            kern.extend_from_slice(&left.to_be_bytes());
            kern.extend_from_slice(&right.to_be_bytes());
            kern.extend_from_slice(&value.to_be_bytes());
        }
        kern
    }
}

// ============================================================================
// Glyph descriptions
// ============================================================================

/// An axis-aligned rectangle of four on-curve points, one contour.
pub fn simple_box(x_min: i16, y_min: i16, x_max: i16, y_max: i16) -> Vec<u8> {
    let mut glyph = Vec::new();
    glyph.extend_from_slice(&1i16.to_be_bytes()); // numContours
    for v in [x_min, y_min, x_max, y_max] {
        glyph.extend_from_slice(&v.to_be_bytes());
    }
    glyph.extend_from_slice(&3u16.to_be_bytes()); // endPts[0]
    glyph.extend_from_slice(&0u16.to_be_bytes()); // instructionLength
    glyph.extend_from_slice(&[0x01; 4]); // all on-curve, long deltas
    // Counter-clockwise from the bottom-left corner.
    for dx in [x_min, x_max - x_min, 0, -(x_max - x_min)] {
        glyph.extend_from_slice(&dx.to_be_bytes());
    }
    for dy in [y_min, 0, y_max - y_min, 0] {
        glyph.extend_from_slice(&dy.to_be_bytes());
    }
    glyph
}

/// A rounded diamond: two on-curve anchors with off-curve controls
/// between them, exercising curve tesselation.
pub fn curved_diamond() -> Vec<u8> {
    let mut glyph = Vec::new();
    glyph.extend_from_slice(&1i16.to_be_bytes());
    for v in [0i16, 0, 800, 800] {
        glyph.extend_from_slice(&v.to_be_bytes());
    }
    glyph.extend_from_slice(&3u16.to_be_bytes());
    glyph.extend_from_slice(&0u16.to_be_bytes());
    // on (400, 0), off (800, 400), on (400, 800), off (0, 400)
    glyph.extend_from_slice(&[0x01, 0x00, 0x01, 0x00]);
    for dx in [400i16, 400, -400, -400] {
        glyph.extend_from_slice(&dx.to_be_bytes());
    }
    for dy in [0i16, 400, 400, -400] {
        glyph.extend_from_slice(&dy.to_be_bytes());
    }
    glyph
}

/// A compound glyph from component references with large XY offsets.
pub fn compound(bbox: (i16, i16, i16, i16), components: &[Component]) -> Vec<u8> {
    let mut glyph = Vec::new();
    glyph.extend_from_slice(&(-1i16).to_be_bytes());
    for v in [bbox.0, bbox.1, bbox.2, bbox.3] {
        glyph.extend_from_slice(&v.to_be_bytes());
    }
    for (index, component) in components.iter().enumerate() {
        let mut flags = 0x0001 | 0x0002; // large args, actual xy offsets
        if component.scale.is_some() {
            flags |= 0x0008;
        }
        if index + 1 < components.len() {
            flags |= 0x0020;
        }
        glyph.extend_from_slice(&(flags as u16).to_be_bytes());
        glyph.extend_from_slice(&component.glyph.to_be_bytes());
        glyph.extend_from_slice(&component.dx.to_be_bytes());
        glyph.extend_from_slice(&component.dy.to_be_bytes());
        if let Some(scale) = component.scale {
            glyph.extend_from_slice(&scale.to_be_bytes());
        }
    }
    glyph
}

/// A compound component that asks for point matching instead of offsets.
pub fn compound_point_matched(bbox: (i16, i16, i16, i16), glyph_id: u16) -> Vec<u8> {
    let mut glyph = Vec::new();
    glyph.extend_from_slice(&(-1i16).to_be_bytes());
    for v in [bbox.0, bbox.1, bbox.2, bbox.3] {
        glyph.extend_from_slice(&v.to_be_bytes());
    }
    glyph.extend_from_slice(&0x0001u16.to_be_bytes()); // large args, no xy flag
    glyph.extend_from_slice(&glyph_id.to_be_bytes());
    glyph.extend_from_slice(&10i16.to_be_bytes());
    glyph.extend_from_slice(&10i16.to_be_bytes());
    glyph
}
