// Copyright 2025 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render pipeline: classify, fit, compose, serialize.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use peniko::Brush;
use typefit_text::{FontFamily, FontWeight, TextMeasurer, TextStyle, classify};

use crate::fit::{FitOptions, FitResult, fit_font_size};
use crate::layout::{LayoutSpec, TextPosition};
use crate::options::{DEFAULT_FONT_SIZE, RenderOptions, StyleMode};
use crate::scene::{Scene, TextRun};
use crate::svg;

/// Renders `options` to an SVG document.
///
/// This never fails: malformed inputs fall back to defaults, and measurement
/// degradations lower fidelity rather than aborting the render.
#[must_use]
pub fn generate(options: &RenderOptions, measurer: &dyn TextMeasurer) -> Vec<u8> {
    svg::to_svg_bytes(&compose(options, measurer))
}

/// Composes the scene for `options` without serializing it.
#[must_use]
pub fn compose(options: &RenderOptions, measurer: &dyn TextMeasurer) -> Scene {
    let (width, height) = options.canvas_size();
    let profile = classify(&options.text);

    let position = match options.text_pos {
        Some(p) => TextPosition::Explicit(p),
        None => match options.mode {
            StyleMode::Badge => TextPosition::BottomAnchored,
            StyleMode::Card => TextPosition::Centered,
        },
    };
    let layout = LayoutSpec::resolve(width, height, &profile, options.max_text_width, position);

    let style = TextStyle {
        font_size: f64::from(DEFAULT_FONT_SIZE),
        font_family: options.font_family.clone(),
        font_weight: match options.mode {
            StyleMode::Badge => FontWeight::BOLD,
            StyleMode::Card => FontWeight::NORMAL,
        },
        font_style: typefit_text::FontStyle::Normal,
    };

    let fitted = if options.text.trim().is_empty() {
        None
    } else if options.auto_font_size {
        let fit_options = FitOptions::new(layout.text_area_width)
            .with_max_height(layout.text_area_height)
            .with_max_font_size(options.max_font_size);
        let result = fit_font_size(measurer, &options.text, &style, &fit_options);
        log::debug!(
            "auto-sized {}px for {:?} ({})",
            result.font_size,
            preview(&options.text),
            if result.metrics.accurate { "font metrics" } else { "heuristic" },
        );
        Some(result)
    } else {
        let font_size = options.font_size.unwrap_or(DEFAULT_FONT_SIZE);
        let metrics = measurer.measure(&options.text, style.at_size(f64::from(font_size)));
        Some(FitResult { font_size, metrics })
    };

    let mut annotations = Vec::new();
    if options.annotate {
        if let Some(fit) = &fitted {
            let confidence = match fit.metrics.confidence {
                Some(c) => format!("{c:.2}"),
                None => String::from("n/a"),
            };
            annotations.push(format!(
                "text metrics: width={:.1} height={:.1} font-size={} accurate={} confidence={}",
                fit.metrics.width, fit.metrics.height, fit.font_size, fit.metrics.accurate, confidence,
            ));
        }
        annotations.push(format!(
            "layout: text-area={:.0}x{:.0} anchor={},{} baseline={:?}",
            layout.text_area_width, layout.text_area_height, layout.anchor.x, layout.anchor.y, layout.baseline,
        ));
    }

    let text = fitted.map(|fit| TextRun {
        pos: layout.anchor,
        text: options.text.clone(),
        font_size: f64::from(fit.font_size),
        font_stack: font_stack(options.mode, &options.font_family),
        font_weight: style.font_weight.0,
        fill: Brush::Solid(options.text_color),
        anchor: layout.anchor_mode,
        baseline: layout.baseline,
        shadow: options.mode == StyleMode::Badge,
    });

    Scene {
        width,
        height,
        background: options.background.clone(),
        corner_radius: match options.mode {
            StyleMode::Badge => 20.0,
            StyleMode::Card => 0.0,
        },
        text,
        font_face: options.embedded_font.clone(),
        annotations,
    }
}

/// CSS font-family stack for the output document.
fn font_stack(mode: StyleMode, family: &FontFamily) -> String {
    match (mode, family) {
        (StyleMode::Badge, FontFamily::Named(name)) => format!(
            "-apple-system, BlinkMacSystemFont, '{name}', 'Segoe UI', Roboto, sans-serif"
        ),
        (StyleMode::Badge, _) => String::from(
            "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif",
        ),
        (StyleMode::Card, FontFamily::Named(name)) => format!("{name}, sans-serif"),
        (StyleMode::Card, generic) => String::from(generic.as_css_family()),
    }
}

/// First 50 codepoints, for log lines.
fn preview(text: &str) -> String {
    if classify(text).is_long {
        let mut head: String = text.chars().take(50).collect();
        head.push('\u{2026}');
        head
    } else {
        String::from(text)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::Point;
    use peniko::Color;
    use typefit_text::HeuristicTextMeasurer;

    use super::*;
    use crate::scene::{Background, EmbeddedFont};

    fn render(options: &RenderOptions) -> String {
        String::from_utf8(generate(options, &HeuristicTextMeasurer)).expect("utf-8 svg")
    }

    #[test]
    fn badge_defaults_produce_a_rounded_bottom_anchored_card() {
        let svg = render(&RenderOptions::new("name.box"));
        assert!(svg.contains(r#"<svg width="270" height="270""#));
        assert!(svg.contains(r#"rx="20""#));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(r#"y="229.5""#));
        assert!(svg.contains(r#"font-weight="700""#));
        assert!(svg.contains("drop-shadow"));
        assert!(!svg.contains("dominant-baseline"));
    }

    #[test]
    fn card_defaults_center_the_text() {
        let svg = render(&RenderOptions::card("Hello"));
        assert!(svg.contains(r#"<svg width="800" height="600""#));
        assert!(svg.contains(r#"x="400" y="300""#));
        assert!(svg.contains(r#"dominant-baseline="central""#));
        assert!(!svg.contains("rx="));
        assert!(!svg.contains("drop-shadow"));
    }

    #[test]
    fn explicit_position_overrides_the_mode_policy() {
        let svg = render(&RenderOptions::new("x").with_text_position(Point::new(10.0, 20.0)));
        assert!(svg.contains(r#"x="10" y="20""#));
    }

    #[test]
    fn blank_text_renders_background_only() {
        let svg = render(&RenderOptions::new("   "));
        assert!(!svg.contains("<text"));
        assert!(svg.contains("<rect"));
    }

    #[test]
    fn manual_font_size_skips_the_search() {
        let svg = render(&RenderOptions::new("name").with_font_size(30));
        assert!(svg.contains(r#"font-size="30""#));
    }

    #[test]
    fn auto_fitting_respects_the_max_font_size_option() {
        let svg = render(&RenderOptions::new("Hi").with_max_font_size(40));
        assert!(svg.contains(r#"font-size="40""#));
    }

    #[test]
    fn solid_and_image_backgrounds_serialize() {
        let solid = RenderOptions::new("x")
            .with_background(Background::Solid(Color::from_rgb8(0, 0, 0)));
        assert!(render(&solid).contains(r##"fill="#000000""##));

        let image = RenderOptions::new("x").with_background(Background::Image {
            href: "data:image/png;base64,AAAA".into(),
        });
        assert!(render(&image).contains("<image href=\"data:image/png;base64,AAAA\""));
    }

    #[test]
    fn embedded_font_flows_into_the_stack_and_defs() {
        let options = RenderOptions::new("x")
            .with_font_family(typefit_text::FontFamily::Named("Custom".into()))
            .with_embedded_font(EmbeddedFont::new("Custom", "data:font/woff2;base64,AAAA"));
        let svg = render(&options);
        assert!(svg.contains("@font-face"));
        assert!(svg.contains("'Custom'"));
    }

    #[test]
    fn annotations_can_be_disabled() {
        assert!(render(&RenderOptions::new("x")).contains("<!--"));
        let off = RenderOptions::new("x").with_annotations(false);
        assert!(!render(&off).contains("<!--"));
    }

    #[test]
    fn cjk_text_fits_inside_its_reduced_area() {
        let svg = render(&RenderOptions::new("\u{4f60}\u{597d}\u{4e16}\u{754c}"));
        // 270 × 0.6 area × 0.85 margin / 4.56 em-per-px → 30px.
        assert!(svg.contains(r#"font-size="30""#));
    }
}
