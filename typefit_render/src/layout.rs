// Copyright 2025 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text area sizing and anchor placement.
//!
//! Before fitting, the canvas is reduced to a text area: complex scripts
//! reserve a wider margin because their average glyph is wider than the
//! estimation tables assume. Anchor placement is a three-way policy:
//! explicit caller coordinates win, otherwise the style mode picks either a
//! bottom-anchored or a centered run.

use kurbo::Point;
use typefit_text::ScriptProfile;

use crate::scene::{TextAnchor, TextBaseline};

/// Fraction of the canvas width available to text.
const WIDTH_FRACTION: f64 = 0.8;

/// Reduced width fraction when complex scripts are present.
const COMPLEX_WIDTH_FRACTION: f64 = 0.6;

/// Fraction of the canvas height available to text.
const HEIGHT_FRACTION: f64 = 0.6;

/// Bottom-anchored text sits this fraction of the canvas above the bottom
/// edge.
const BOTTOM_OFFSET_FRACTION: f64 = 0.15;

/// Where to place the text run on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextPosition {
    /// Explicit anchor coordinates, used verbatim.
    Explicit(Point),
    /// Horizontally centered, anchored near the bottom edge (badge style).
    /// The anchor is fixed relative to the canvas, independent of measured
    /// text extents.
    BottomAnchored,
    /// Centered both ways, with a central baseline.
    Centered,
}

/// Resolved layout inputs for one render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutSpec {
    /// Canvas width in pixels.
    pub canvas_width: u32,
    /// Canvas height in pixels.
    pub canvas_height: u32,
    /// Width available to the fitter.
    pub text_area_width: f64,
    /// Height available to the fitter.
    pub text_area_height: f64,
    /// Text anchor position.
    pub anchor: Point,
    /// Horizontal anchor mode.
    pub anchor_mode: TextAnchor,
    /// Vertical baseline mode.
    pub baseline: TextBaseline,
}

impl LayoutSpec {
    /// Computes the layout for a canvas, script profile and position policy.
    ///
    /// `max_text_width` overrides the derived text-area width when positive.
    #[must_use]
    pub fn resolve(
        canvas_width: u32,
        canvas_height: u32,
        profile: &ScriptProfile,
        max_text_width: Option<f64>,
        position: TextPosition,
    ) -> Self {
        let w = f64::from(canvas_width);
        let h = f64::from(canvas_height);

        let width_fraction = if profile.has_complex_script {
            COMPLEX_WIDTH_FRACTION
        } else {
            WIDTH_FRACTION
        };
        let text_area_width = max_text_width
            .filter(|&override_w| override_w > 0.0)
            .unwrap_or(w * width_fraction);
        let text_area_height = h * HEIGHT_FRACTION;

        let (anchor, anchor_mode, baseline) = match position {
            TextPosition::Explicit(p) => (p, TextAnchor::Middle, TextBaseline::Alphabetic),
            TextPosition::BottomAnchored => (
                Point::new(0.5 * w, h - h * BOTTOM_OFFSET_FRACTION),
                TextAnchor::Middle,
                TextBaseline::Alphabetic,
            ),
            TextPosition::Centered => (
                Point::new(0.5 * w, 0.5 * h),
                TextAnchor::Middle,
                TextBaseline::Central,
            ),
        };

        Self {
            canvas_width,
            canvas_height,
            text_area_width,
            text_area_height,
            anchor,
            anchor_mode,
            baseline,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use typefit_text::classify;

    use super::*;

    #[test]
    fn latin_text_gets_the_wide_area() {
        let profile = classify("name");
        let layout = LayoutSpec::resolve(800, 600, &profile, None, TextPosition::Centered);
        assert!((layout.text_area_width - 640.0).abs() < 1e-9);
        assert!((layout.text_area_height - 360.0).abs() < 1e-9);
    }

    #[test]
    fn complex_script_reserves_more_margin() {
        let profile = classify("\u{4f60}\u{597d}");
        let layout = LayoutSpec::resolve(800, 600, &profile, None, TextPosition::Centered);
        assert!((layout.text_area_width - 480.0).abs() < 1e-9);
    }

    #[test]
    fn caller_override_wins() {
        let profile = classify("\u{4f60}\u{597d}");
        let layout = LayoutSpec::resolve(800, 600, &profile, Some(555.0), TextPosition::Centered);
        assert!((layout.text_area_width - 555.0).abs() < 1e-9);

        // Non-positive overrides are ignored.
        let layout = LayoutSpec::resolve(800, 600, &profile, Some(0.0), TextPosition::Centered);
        assert!((layout.text_area_width - 480.0).abs() < 1e-9);
    }

    #[test]
    fn bottom_anchor_sits_above_the_bottom_edge() {
        let profile = classify("name");
        let layout = LayoutSpec::resolve(270, 270, &profile, None, TextPosition::BottomAnchored);
        assert!((layout.anchor.x - 135.0).abs() < 1e-9);
        assert!((layout.anchor.y - 229.5).abs() < 1e-9);
        assert_eq!(layout.baseline, TextBaseline::Alphabetic);
    }

    #[test]
    fn centered_layout_uses_central_baseline() {
        let profile = classify("name");
        let layout = LayoutSpec::resolve(800, 600, &profile, None, TextPosition::Centered);
        assert_eq!(layout.anchor, Point::new(400.0, 300.0));
        assert_eq!(layout.baseline, TextBaseline::Central);
    }

    #[test]
    fn explicit_position_is_used_verbatim() {
        let profile = classify("name");
        let layout = LayoutSpec::resolve(
            800,
            600,
            &profile,
            None,
            TextPosition::Explicit(Point::new(10.0, 20.0)),
        );
        assert_eq!(layout.anchor, Point::new(10.0, 20.0));
    }
}
