// Copyright 2025 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderable scene description.
//!
//! The composer produces a [`Scene`] (a background element plus a positioned
//! text run) and the SVG writer serializes it. The description is kept
//! separate from serialization so other vector backends can consume it.

extern crate alloc;

use alloc::string::String;

use kurbo::Point;
use peniko::{Brush, Color};

/// Horizontal text anchoring, matching SVG `text-anchor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Anchor at the start of the text run.
    Start,
    /// Anchor at the middle of the text run.
    Middle,
}

/// Vertical text anchoring, matching SVG `dominant-baseline`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    /// The anchor y is the alphabetic baseline.
    Alphabetic,
    /// The anchor y is the vertical center of the glyphs.
    Central,
}

/// The canvas background.
#[derive(Clone, Debug, PartialEq)]
pub enum Background {
    /// A flat fill.
    Solid(Color),
    /// A two-stop diagonal linear gradient.
    LinearGradient {
        /// Top-left stop color.
        start: Color,
        /// Bottom-right stop color.
        end: Color,
    },
    /// A full-bleed cover image. `href` is an already-embeddable payload
    /// (a URL or a data URI); fetching and encoding happen upstream.
    Image {
        /// Image reference written verbatim into the output.
        href: String,
    },
}

impl Default for Background {
    /// The stock diagonal gradient.
    fn default() -> Self {
        Self::LinearGradient {
            start: Color::from_rgb8(102, 126, 234),
            end: Color::from_rgb8(118, 75, 162),
        }
    }
}

/// A font payload to embed in the output as an `@font-face` rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbeddedFont {
    /// Family name declared by the `@font-face` rule.
    pub family: String,
    /// Already-encoded `data:` URI for the font payload.
    pub data_uri: String,
}

impl EmbeddedFont {
    /// Creates an embedded font declaration.
    pub fn new(family: impl Into<String>, data_uri: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            data_uri: data_uri.into(),
        }
    }
}

/// A positioned single-line text run.
#[derive(Clone, Debug)]
pub struct TextRun {
    /// Anchor position in canvas coordinates.
    pub pos: Point,
    /// Text content (unshaped).
    pub text: String,
    /// Font size in canvas coordinates.
    pub font_size: f64,
    /// CSS font-family stack written verbatim into the output.
    pub font_stack: String,
    /// CSS font weight.
    pub font_weight: u16,
    /// Fill paint.
    pub fill: Brush,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline mode.
    pub baseline: TextBaseline,
    /// Whether to apply the soft drop shadow.
    pub shadow: bool,
}

/// A composed, renderable scene.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Background element.
    pub background: Background,
    /// Corner radius applied to solid/gradient backgrounds.
    pub corner_radius: f64,
    /// The text run, absent for blank input.
    pub text: Option<TextRun>,
    /// Optional embedded font declaration.
    pub font_face: Option<EmbeddedFont>,
    /// Human-readable annotations emitted as comments.
    pub annotations: alloc::vec::Vec<String>,
}
