// Copyright 2025 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for font-size fitting.
//!
//! Typefit renders short strings (names, labels, arbitrary user input) into a
//! vector image at the largest font size that still fits a bounding box. To do
//! that without executing real shaping, fitting code depends on a tiny text
//! measurement interface plus a script classifier that describes how risky a
//! given string is to estimate.
//!
//! This crate is intentionally:
//! - small and dependency-light,
//! - `no_std`-friendly (it uses `alloc` for owned font family names), and
//! - backend-agnostic (a parsed-font adapter and the built-in heuristic
//!   measurer both implement the same trait).

#![no_std]

extern crate alloc;

mod heuristic;
mod script;

use alloc::sync::Arc;

pub use heuristic::HeuristicTextMeasurer;
pub use script::{ScriptProfile, classify, is_complex_script};

/// A minimal text measurement interface used by the font-size fitter.
///
/// Implementations can be:
/// - heuristic (static per-character width tables, see
///   [`HeuristicTextMeasurer`]), or
/// - backed by parsed font metrics (see the `typefit_font` crate).
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line; callers should split on `\n` if
    /// they want multi-line layout.
    fn measure(&self, text: &str, style: TextStyle) -> TextMeasurement;
}

/// Text styling inputs relevant to measurement.
///
/// This is intentionally minimal: it's just enough to drive width estimation
/// consistently. Attributed text, shaping options, fallback chains and so on
/// belong in a real text system, which Typefit deliberately does not have.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in the output coordinate system (typically pixels).
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub font_style: FontStyle,
}

impl TextStyle {
    /// Creates a default `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
        }
    }

    /// Returns a copy of this style at a different font size.
    #[must_use]
    pub fn at_size(&self, font_size: f64) -> Self {
        Self {
            font_size,
            ..self.clone()
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(48.0)
    }
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Inter"`, `"Helvetica Neue"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the font family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// CSS-style font styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Normal style.
    Normal,
    /// Italic style.
    Italic,
    /// Oblique style.
    Oblique,
}

/// Estimated metrics for a single line of text at a given font size.
///
/// Produced fresh per query; measurements are never cached at this layer
/// (caching, if any, belongs to the font collaborator).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMeasurement {
    /// Estimated ink/advance width.
    pub width: f64,
    /// Estimated line height.
    pub height: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs (non-negative).
    pub descent: f64,
    /// Whether the measurement came from real font metrics.
    pub accurate: bool,
    /// Estimated reliability in `[0.5, 0.95]`; only set on the heuristic path.
    pub confidence: Option<f64>,
}

/// A scaled glyph-ink bounding box, in the same units as the font size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Horizontal ink extent.
    pub width: f64,
    /// Vertical ink extent.
    pub height: f64,
}

/// The query surface of a parsed font.
///
/// Parsing and loading fonts is a collaborator concern; measurement code only
/// consumes this interface. Keeping it a trait also lets tests substitute
/// synthetic metrics for real font binaries.
pub trait FontHandle {
    /// Total advance width of `text` at `font_size`, or `None` if the
    /// underlying font data cannot be queried.
    fn advance_width(&self, text: &str, font_size: f64) -> Option<f64>;

    /// Tight ink bounding box of `text` at `font_size`.
    ///
    /// Returns `None` when no glyph in `text` has ink (e.g. all spaces) or
    /// when the font data cannot be queried.
    fn bounding_box(&self, text: &str, font_size: f64) -> Option<BoundingBox>;

    /// Font design units per em.
    fn units_per_em(&self) -> u16;

    /// Typographic ascender, in font units.
    fn ascender(&self) -> i16;

    /// Typographic descender, in font units (usually negative).
    fn descender(&self) -> i16;

    /// The font's family name, if the font declares one.
    fn family_name(&self) -> Option<&str>;

    /// Whether the font maps `c` to a real glyph.
    fn covers(&self, c: char) -> bool;
}
