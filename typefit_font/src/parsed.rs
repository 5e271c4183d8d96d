// Copyright 2025 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `ttf-parser`-backed [`FontHandle`] implementation.

use thiserror::Error;
use ttf_parser::{Face, GlyphId};
use typefit_text::{BoundingBox, FontHandle};

/// Errors produced while turning raw bytes into a [`ParsedFont`].
#[derive(Debug, Error)]
pub enum FontLoadError {
    /// The payload is not a parseable OpenType/TrueType font.
    #[error("failed to parse font data: {0}")]
    Parse(#[from] ttf_parser::FaceParsingError),
    /// The font declares a zero units-per-em, which makes scaling undefined.
    #[error("font has invalid units-per-em")]
    InvalidUnitsPerEm,
}

/// An owned, parsed font.
///
/// `ttf-parser` faces borrow the underlying bytes, so the vertical metrics and
/// the family name are captured once at load time and the face is re-parsed
/// (a cheap, zero-copy operation) for per-string queries.
pub struct ParsedFont {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    ascender: i16,
    descender: i16,
    family: Option<String>,
}

impl core::fmt::Debug for ParsedFont {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParsedFont")
            .field("units_per_em", &self.units_per_em)
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

impl ParsedFont {
    /// Parses the first face in `data`.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FontLoadError> {
        Self::from_bytes_indexed(data, 0)
    }

    /// Parses face number `index` in `data` (for TTC collections).
    pub fn from_bytes_indexed(data: Vec<u8>, index: u32) -> Result<Self, FontLoadError> {
        let face = Face::parse(&data, index)?;
        let units_per_em = face.units_per_em();
        if units_per_em == 0 {
            return Err(FontLoadError::InvalidUnitsPerEm);
        }
        let ascender = face.ascender();
        let descender = face.descender();
        let family = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == ttf_parser::name_id::FAMILY && name.is_unicode())
            .find_map(|name| name.to_string());
        drop(face);
        Ok(Self {
            data,
            index,
            units_per_em,
            ascender,
            descender,
            family,
        })
    }

    fn face(&self) -> Option<Face<'_>> {
        Face::parse(&self.data, self.index).ok()
    }

    /// Advance of a single glyph in font units; missing glyphs fall back to
    /// the `.notdef` advance, then to half an em.
    fn glyph_advance(face: &Face<'_>, c: char) -> f64 {
        let glyph = face.glyph_index(c).unwrap_or(GlyphId(0));
        match face.glyph_hor_advance(glyph) {
            Some(advance) => f64::from(advance),
            None => 0.5 * f64::from(face.units_per_em()),
        }
    }
}

impl FontHandle for ParsedFont {
    fn advance_width(&self, text: &str, font_size: f64) -> Option<f64> {
        let face = self.face()?;
        let total: f64 = text.chars().map(|c| Self::glyph_advance(&face, c)).sum();
        Some(total * font_size / f64::from(self.units_per_em))
    }

    fn bounding_box(&self, text: &str, font_size: f64) -> Option<BoundingBox> {
        let face = self.face()?;

        // Walk a pen along the advances and union the per-glyph ink boxes.
        let mut pen = 0.0_f64;
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        let mut any_ink = false;

        for c in text.chars() {
            if let Some(glyph) = face.glyph_index(c)
                && let Some(bbox) = face.glyph_bounding_box(glyph)
            {
                any_ink = true;
                x_min = x_min.min(pen + f64::from(bbox.x_min));
                x_max = x_max.max(pen + f64::from(bbox.x_max));
                y_min = y_min.min(f64::from(bbox.y_min));
                y_max = y_max.max(f64::from(bbox.y_max));
            }
            pen += Self::glyph_advance(&face, c);
        }

        if !any_ink {
            return None;
        }
        let scale = font_size / f64::from(self.units_per_em);
        Some(BoundingBox {
            width: (x_max - x_min) * scale,
            height: (y_max - y_min) * scale,
        })
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn ascender(&self) -> i16 {
        self.ascender
    }

    fn descender(&self) -> i16 {
        self.descender
    }

    fn family_name(&self) -> Option<&str> {
        self.family.as_deref()
    }

    fn covers(&self, c: char) -> bool {
        self.face().is_some_and(|face| face.glyph_index(c).is_some())
    }
}
