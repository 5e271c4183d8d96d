// Copyright 2025 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measurement strategy selection.
//!
//! [`FontTextMeasurer`] is the measurer the fitter should normally be handed:
//! it consults real font metrics when a handle is loaded and degrades to the
//! width tables otherwise. Emoji-bearing text always takes the heuristic
//! path; glyph metrics for compound emoji sequences are not trustworthy
//! without real shaping.

use std::sync::Arc;

use typefit_text::{
    FontHandle, HeuristicTextMeasurer, ScriptProfile, TextMeasurement, TextMeasurer, TextStyle,
    classify, is_complex_script,
};

use crate::store::{FontStore, global_store};

/// Floor applied to the ink width as a fraction of the advance width; guards
/// against fonts whose bounding box underestimates ink extents.
const ADVANCE_FLOOR: f64 = 0.95;

/// Extra width per digit, as a fraction of the font size.
const DIGIT_PADDING: f64 = 0.05;

/// Width multiplier when the text needs a script the loaded font does not
/// cover. A coarse safety factor, not a shaping substitute.
const UNSUPPORTED_SCRIPT_FACTOR: f64 = 1.5;

/// A [`TextMeasurer`] that prefers parsed font metrics and falls back to
/// [`HeuristicTextMeasurer`] per call when they are unusable.
#[derive(Clone, Debug)]
pub struct FontTextMeasurer {
    store: Arc<FontStore>,
    fallback: HeuristicTextMeasurer,
}

impl FontTextMeasurer {
    /// Creates a measurer backed by the given store.
    #[must_use]
    pub fn new(store: Arc<FontStore>) -> Self {
        Self {
            store,
            fallback: HeuristicTextMeasurer,
        }
    }
}

impl Default for FontTextMeasurer {
    /// A measurer backed by the process-wide [`FontStore`].
    fn default() -> Self {
        Self::new(global_store().clone())
    }
}

impl TextMeasurer for FontTextMeasurer {
    fn measure(&self, text: &str, style: TextStyle) -> TextMeasurement {
        let profile = classify(text);

        if profile.has_emoji {
            log::trace!("emoji text, using heuristic measurement");
            return self.fallback.measure(text, style);
        }

        let Some(font) = self.store.handle() else {
            return self.fallback.measure(text, style);
        };

        match measure_with_font(font.as_ref(), text, &style, profile) {
            Some(metrics) => metrics,
            None => {
                log::warn!("font metric query failed, using heuristic for this call");
                self.fallback.measure(text, style)
            }
        }
    }
}

/// Glyph-based measurement with script-aware corrections.
///
/// Returns `None` when the handle cannot answer its queries; the caller is
/// expected to degrade to the heuristic for that call only.
fn measure_with_font(
    font: &dyn FontHandle,
    text: &str,
    style: &TextStyle,
    profile: ScriptProfile,
) -> Option<TextMeasurement> {
    let font_size = style.font_size;
    let advance = font.advance_width(text, font_size)?;
    let bbox = font.bounding_box(text, font_size);

    let mut width = if profile.has_many_digits {
        // Digit runs in proportional fonts render inconsistently; additive
        // per-digit padding tracks that better than a width floor.
        let digits = text.chars().filter(char::is_ascii_digit).count();
        advance + font_size * DIGIT_PADDING * digits as f64
    } else {
        match bbox {
            Some(b) => b.width.max(advance * ADVANCE_FLOOR),
            None => advance,
        }
    };

    let mut accurate = true;
    if profile.has_complex_script && !complex_script_covered(font, text) {
        width *= UNSUPPORTED_SCRIPT_FACTOR;
        accurate = false;
    }

    let units_per_em = f64::from(font.units_per_em());
    if units_per_em <= 0.0 {
        return None;
    }
    let scale = font_size / units_per_em;
    let ascent = f64::from(font.ascender()) * scale;
    let descent = (f64::from(font.descender()) * scale).abs();
    let vertical = ascent + descent;
    let height = match bbox {
        Some(b) => b.height.max(vertical),
        None => vertical,
    };

    Some(TextMeasurement {
        width,
        height,
        ascent,
        descent,
        accurate,
        confidence: None,
    })
}

/// Whether every complex-script character in `text` maps to a real glyph.
fn complex_script_covered(font: &dyn FontHandle, text: &str) -> bool {
    text.chars()
        .filter(|&c| is_complex_script(c))
        .all(|c| font.covers(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use typefit_text::BoundingBox;

    /// Arial-ish synthetic metrics: 1000 upem, flat 560-unit advances,
    /// Latin-only coverage.
    struct FakeFont {
        covers_cjk: bool,
    }

    impl FakeFont {
        fn latin() -> Self {
            Self { covers_cjk: false }
        }

        fn universal() -> Self {
            Self { covers_cjk: true }
        }

        fn has_glyph(&self, c: char) -> bool {
            c.is_ascii() || self.covers_cjk
        }
    }

    impl FontHandle for FakeFont {
        fn advance_width(&self, text: &str, font_size: f64) -> Option<f64> {
            let units: f64 = text.chars().map(|_| 560.0).sum();
            Some(units * font_size / 1000.0)
        }

        fn bounding_box(&self, text: &str, font_size: f64) -> Option<BoundingBox> {
            if text.is_empty() {
                return None;
            }
            // Slightly narrower than the advance, as real ink boxes are.
            let advance = self.advance_width(text, font_size)?;
            Some(BoundingBox {
                width: advance * 0.9,
                height: font_size * 0.72,
            })
        }

        fn units_per_em(&self) -> u16 {
            1000
        }

        fn ascender(&self) -> i16 {
            800
        }

        fn descender(&self) -> i16 {
            -200
        }

        fn family_name(&self) -> Option<&str> {
            Some("Fake Sans")
        }

        fn covers(&self, c: char) -> bool {
            self.has_glyph(c)
        }
    }

    fn font_measurer(font: FakeFont) -> FontTextMeasurer {
        let store = Arc::new(FontStore::new());
        store.install(Arc::new(font));
        FontTextMeasurer::new(store)
    }

    #[test]
    fn empty_store_falls_back_to_heuristic() {
        let measurer = FontTextMeasurer::new(Arc::new(FontStore::new()));
        let m = measurer.measure("Hello", TextStyle::new(48.0));
        assert!(!m.accurate);
        assert!(m.confidence.is_some());
    }

    #[test]
    fn loaded_font_produces_accurate_metrics() {
        let measurer = font_measurer(FakeFont::latin());
        let m = measurer.measure("Hello", TextStyle::new(48.0));
        assert!(m.accurate);
        assert!(m.confidence.is_none());
        // Ink box (0.9 × advance) is below the 0.95 advance floor.
        let advance = 5.0 * 560.0 * 48.0 / 1000.0;
        assert!((m.width - advance * 0.95).abs() < 1e-9);
        // Vertical metrics dominate the ink height.
        assert!((m.height - 48.0).abs() < 1e-9);
        assert!((m.ascent - 38.4).abs() < 1e-9);
        assert!((m.descent - 9.6).abs() < 1e-9);
    }

    #[test]
    fn accurate_and_heuristic_agree_for_ascii() {
        let accurate = font_measurer(FakeFont::latin());
        let heuristic = HeuristicTextMeasurer;
        for text in ["Hello", "Hello World", "Name Label", "xyz"] {
            let a = accurate.measure(text, TextStyle::new(48.0)).width;
            let h = heuristic.measure(text, TextStyle::new(48.0)).width;
            let ratio = a / h;
            assert!((0.8..=1.25).contains(&ratio), "text: {text:?}, ratio: {ratio}");
        }
    }

    #[test]
    fn digit_heavy_text_uses_additive_padding() {
        let measurer = font_measurer(FakeFont::latin());
        let m = measurer.measure("20250806", TextStyle::new(48.0));
        let advance = 8.0 * 560.0 * 48.0 / 1000.0;
        assert!((m.width - (advance + 48.0 * 0.05 * 8.0)).abs() < 1e-9);
    }

    #[test]
    fn uncovered_script_gets_width_penalty() {
        let measurer = font_measurer(FakeFont::latin());
        let m = measurer.measure("\u{4f60}\u{597d}", TextStyle::new(48.0));
        assert!(!m.accurate);
        let advance = 2.0 * 560.0 * 48.0 / 1000.0;
        assert!((m.width - advance * 0.95 * 1.5).abs() < 1e-9);

        let covered = font_measurer(FakeFont::universal());
        let m = covered.measure("\u{4f60}\u{597d}", TextStyle::new(48.0));
        assert!(m.accurate);
        assert!((m.width - advance * 0.95).abs() < 1e-9);
    }

    #[test]
    fn emoji_bypasses_the_loaded_font() {
        let measurer = font_measurer(FakeFont::universal());
        let m = measurer.measure("hi \u{1F30D}", TextStyle::new(48.0));
        assert!(!m.accurate);
        assert!(m.confidence.is_some());
    }

    #[test]
    fn failing_query_degrades_per_call() {
        struct BrokenFont;
        impl FontHandle for BrokenFont {
            fn advance_width(&self, _: &str, _: f64) -> Option<f64> {
                None
            }
            fn bounding_box(&self, _: &str, _: f64) -> Option<BoundingBox> {
                None
            }
            fn units_per_em(&self) -> u16 {
                1000
            }
            fn ascender(&self) -> i16 {
                800
            }
            fn descender(&self) -> i16 {
                -200
            }
            fn family_name(&self) -> Option<&str> {
                None
            }
            fn covers(&self, _: char) -> bool {
                true
            }
        }

        let store = Arc::new(FontStore::new());
        store.install(Arc::new(BrokenFont));
        let measurer = FontTextMeasurer::new(store.clone());
        let m = measurer.measure("Hello", TextStyle::new(48.0));
        assert!(!m.accurate);
        assert!(m.confidence.is_some());
        // The handle stays installed; the degradation is per call.
        assert!(store.handle().is_some());
    }
}
