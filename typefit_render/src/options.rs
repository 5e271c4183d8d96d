// Copyright 2025 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render request options.
//!
//! Everything is optional except the text: omitted fields take mode-specific
//! defaults, and out-of-range values fall back to those defaults rather than
//! failing (the renderer always produces an image).

extern crate alloc;

use alloc::string::String;

use kurbo::Point;
use peniko::Color;
use peniko::color::palette::css;
use typefit_text::FontFamily;

use crate::fit::MAX_FONT_SIZE;
use crate::scene::{Background, EmbeddedFont};

/// Badge canvases are square.
const BADGE_CANVAS: (u32, u32) = (270, 270);

/// Generic card canvas.
const CARD_CANVAS: (u32, u32) = (800, 600);

/// Font size used when auto-fitting is disabled and no override is given.
pub(crate) const DEFAULT_FONT_SIZE: u32 = 48;

/// Overall styling of the output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StyleMode {
    /// Square badge: rounded corners, bold text anchored near the bottom,
    /// soft drop shadow.
    #[default]
    Badge,
    /// Plain card: centered text, square corners.
    Card,
}

/// A render request.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// The text to render.
    pub text: String,
    /// Output styling mode.
    pub mode: StyleMode,
    /// Canvas width; the mode default when `None` or zero.
    pub width: Option<u32>,
    /// Canvas height; the mode default when `None` or zero.
    pub height: Option<u32>,
    /// Text fill color.
    pub text_color: Color,
    /// Background element.
    pub background: Background,
    /// Explicit text anchor, overriding the mode's position policy.
    pub text_pos: Option<Point>,
    /// Explicit text-area width for fitting.
    pub max_text_width: Option<f64>,
    /// Manual font size, used when `auto_font_size` is off.
    pub font_size: Option<u32>,
    /// Whether to search for the largest fitting size.
    pub auto_font_size: bool,
    /// Largest candidate size for the search.
    pub max_font_size: u32,
    /// Preferred font family.
    pub font_family: FontFamily,
    /// Optional font payload embedded as an `@font-face` rule.
    pub embedded_font: Option<EmbeddedFont>,
    /// Whether to include metrics comments in the output.
    pub annotate: bool,
}

impl RenderOptions {
    /// Creates badge-style options for the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: StyleMode::Badge,
            width: None,
            height: None,
            text_color: css::WHITE,
            background: Background::default(),
            text_pos: None,
            max_text_width: None,
            font_size: None,
            auto_font_size: true,
            max_font_size: MAX_FONT_SIZE,
            font_family: FontFamily::Named("Inter".into()),
            embedded_font: None,
            annotate: true,
        }
    }

    /// Creates card-style options for the given text.
    pub fn card(text: impl Into<String>) -> Self {
        Self {
            mode: StyleMode::Card,
            font_family: FontFamily::Named("Arial".into()),
            ..Self::new(text)
        }
    }

    /// Sets the canvas size.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Sets the text fill color.
    #[must_use]
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Sets the background element.
    #[must_use]
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Anchors the text at explicit coordinates.
    #[must_use]
    pub fn with_text_position(mut self, pos: Point) -> Self {
        self.text_pos = Some(pos);
        self
    }

    /// Overrides the text-area width used for fitting.
    #[must_use]
    pub fn with_max_text_width(mut self, max_text_width: f64) -> Self {
        self.max_text_width = Some(max_text_width);
        self
    }

    /// Uses a fixed font size instead of auto-fitting.
    #[must_use]
    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = Some(font_size);
        self.auto_font_size = false;
        self
    }

    /// Toggles the font-size search.
    #[must_use]
    pub fn with_auto_font_size(mut self, auto: bool) -> Self {
        self.auto_font_size = auto;
        self
    }

    /// Sets the largest candidate size for the search.
    #[must_use]
    pub fn with_max_font_size(mut self, max_font_size: u32) -> Self {
        self.max_font_size = max_font_size;
        self
    }

    /// Sets the preferred font family.
    #[must_use]
    pub fn with_font_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }

    /// Embeds a font payload in the output.
    #[must_use]
    pub fn with_embedded_font(mut self, font: EmbeddedFont) -> Self {
        self.embedded_font = Some(font);
        self
    }

    /// Toggles metrics comments in the output.
    #[must_use]
    pub fn with_annotations(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    /// Canvas size after defaulting; zero dimensions fall back to the mode
    /// default.
    pub(crate) fn canvas_size(&self) -> (u32, u32) {
        let (default_w, default_h) = match self.mode {
            StyleMode::Badge => BADGE_CANVAS,
            StyleMode::Card => CARD_CANVAS,
        };
        let width = match self.width {
            Some(w) if w > 0 => w,
            Some(_) => {
                log::warn!("ignoring zero canvas width, using {default_w}");
                default_w
            }
            None => default_w,
        };
        let height = match self.height {
            Some(h) if h > 0 => h,
            Some(_) => {
                log::warn!("ignoring zero canvas height, using {default_h}");
                default_h
            }
            None => default_h,
        };
        (width, height)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn mode_defaults_apply() {
        assert_eq!(RenderOptions::new("x").canvas_size(), (270, 270));
        assert_eq!(RenderOptions::card("x").canvas_size(), (800, 600));
        assert_eq!(RenderOptions::new("x").with_size(400, 200).canvas_size(), (400, 200));
    }

    #[test]
    fn zero_dimensions_fall_back_to_defaults() {
        assert_eq!(RenderOptions::new("x").with_size(0, 0).canvas_size(), (270, 270));
    }

    #[test]
    fn manual_font_size_disables_the_search() {
        let options = RenderOptions::new("x").with_font_size(30);
        assert!(!options.auto_font_size);
        assert_eq!(options.font_size, Some(30));
    }
}
