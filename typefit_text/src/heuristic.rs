// Copyright 2025 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Table-driven text measurement for when no parsed font is available.
//!
//! The tables are tuned against sans-serif rendering of common UI strings:
//! a per-character em-width table for ASCII, per-family base metrics, and
//! per-block widths for everything else. Estimates are then nudged by a few
//! empirical corrections (script, length, digits, ligatures, family).

use crate::script::{classify, fallback_em_width};
use crate::{FontFamily, TextMeasurement, TextMeasurer, TextStyle};

/// A text measurer backed by static width tables.
///
/// Deterministic and total: any string measures to a finite, non-negative
/// width, and the empty string measures to zero width.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: TextStyle) -> TextMeasurement {
        let family = FamilyClass::from_font_family(&style.font_family);
        let metrics = family.base_metrics();
        let font_size = style.font_size;

        let mut total_em = 0.0;
        let mut count = 0_usize;
        let mut ligatures = 0_usize;
        let mut prev: Option<char> = None;

        for c in text.chars() {
            count += 1;
            total_em += match ascii_char_width(c) {
                Some(w) => w,
                None => fallback_em_width(c, metrics.avg_char_width),
            };
            if let Some(p) = prev
                && matches!((p, c), ('f', 'i') | ('f', 'l') | ('f', 'f'))
            {
                ligatures += 1;
            }
            prev = Some(c);
        }

        let profile = classify(text);

        let mut adjustment = 1.0;
        if profile.has_complex_script {
            // Complex scripts average tighter spacing than the raw tables.
            adjustment *= 0.95;
        }
        if count > 20 {
            adjustment *= 0.98;
        }
        if profile.has_many_digits && !matches!(family, FamilyClass::Monospace) {
            // Digit runs in proportional fonts render wider than tabular math
            // suggests.
            adjustment *= 1.08;
        }
        if ligatures > 0 {
            adjustment *= 1.0 - 0.05 * ligatures as f64;
        }
        adjustment *= family.width_correction();

        let mut confidence: f64 = 0.85;
        if profile.has_complex_script {
            confidence -= 0.10;
        }
        if count < 5 {
            confidence -= 0.05;
        }
        if ligatures > 0 {
            confidence += 0.05;
        }

        TextMeasurement {
            width: total_em * font_size * adjustment,
            height: font_size * 1.2,
            ascent: font_size * metrics.baseline_ratio,
            descent: font_size * metrics.descent_ratio,
            accurate: false,
            confidence: Some(confidence.clamp(0.5, 0.95)),
        }
    }
}

/// Per-family base metrics, in em units.
#[derive(Clone, Copy, Debug, PartialEq)]
struct FamilyMetrics {
    avg_char_width: f64,
    baseline_ratio: f64,
    descent_ratio: f64,
}

/// The families the tables know about; anything else uses the default record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FamilyClass {
    Arial,
    Helvetica,
    Times,
    Georgia,
    Verdana,
    Inter,
    Monospace,
    Default,
}

impl FamilyClass {
    fn from_font_family(family: &FontFamily) -> Self {
        match family {
            FontFamily::Serif => Self::Times,
            FontFamily::SansSerif => Self::Default,
            FontFamily::Monospace => Self::Monospace,
            FontFamily::Named(name) => Self::from_name(name),
        }
    }

    /// Resolves a CSS-ish family string; only the first comma-separated
    /// family is considered, quotes stripped.
    fn from_name(name: &str) -> Self {
        let first = name
            .split(',')
            .next()
            .unwrap_or("")
            .trim()
            .trim_matches(|c| c == '\'' || c == '"');
        match first {
            "Arial" => Self::Arial,
            "Helvetica" => Self::Helvetica,
            "Times" | "Times New Roman" => Self::Times,
            "Georgia" => Self::Georgia,
            "Verdana" => Self::Verdana,
            "Inter" => Self::Inter,
            "Courier" | "Courier New" => Self::Monospace,
            _ => Self::Default,
        }
    }

    fn base_metrics(self) -> FamilyMetrics {
        match self {
            Self::Arial | Self::Helvetica | Self::Default => FamilyMetrics {
                avg_char_width: 0.56,
                baseline_ratio: 0.8,
                descent_ratio: 0.2,
            },
            Self::Times => FamilyMetrics {
                avg_char_width: 0.5,
                baseline_ratio: 0.75,
                descent_ratio: 0.25,
            },
            Self::Georgia => FamilyMetrics {
                avg_char_width: 0.52,
                baseline_ratio: 0.75,
                descent_ratio: 0.25,
            },
            Self::Verdana | Self::Monospace => FamilyMetrics {
                avg_char_width: 0.6,
                baseline_ratio: 0.8,
                descent_ratio: 0.2,
            },
            Self::Inter => FamilyMetrics {
                avg_char_width: 0.54,
                baseline_ratio: 0.8,
                descent_ratio: 0.2,
            },
        }
    }

    /// Family-specific width correction applied after all other adjustments.
    fn width_correction(self) -> f64 {
        match self {
            Self::Inter => 0.96,
            Self::Times | Self::Georgia => 1.02,
            _ => 1.0,
        }
    }
}

/// Em width of an ASCII character, tuned against sans-serif rendering.
///
/// Returns `None` for characters outside the table; those fall through to
/// Unicode-block classification.
fn ascii_char_width(c: char) -> Option<f64> {
    let w = match c {
        'i' | 'j' => 0.24,
        'f' | 't' => 0.30,
        'r' => 0.36,
        'c' | 's' | 'z' => 0.50,
        'm' => 0.83,
        'w' => 0.72,
        'a'..='z' => 0.56,
        'I' => 0.30,
        'J' => 0.50,
        'M' | 'W' => 0.89,
        'A'..='Z' => 0.67,
        '0'..='9' => 0.56,
        ' ' | '.' | ',' | ';' | ':' | '!' => 0.28,
        '\'' => 0.19,
        '"' => 0.35,
        '`' | '-' => 0.33,
        '_' | '?' | '#' | '$' => 0.56,
        '(' | ')' | '{' | '}' => 0.33,
        '[' | ']' | '/' | '\\' => 0.28,
        '|' => 0.26,
        '@' => 1.0,
        '%' => 0.89,
        '&' => 0.67,
        '*' => 0.39,
        '+' | '=' | '<' | '>' | '~' => 0.58,
        '^' => 0.47,
        _ => return None,
    };
    Some(w)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn measure(text: &str, font_size: f64, family: &str) -> TextMeasurement {
        let style = TextStyle {
            font_size,
            font_family: FontFamily::Named(family.into()),
            ..TextStyle::default()
        };
        HeuristicTextMeasurer.measure(text, style)
    }

    #[test]
    fn empty_text_has_zero_width() {
        let m = measure("", 48.0, "Arial");
        assert_eq!(m.width, 0.0);
    }

    #[test]
    fn nonempty_text_has_positive_width() {
        for text in ["a", " ", "\u{4f60}", "\u{1F30D}", "\u{0645}"] {
            assert!(measure(text, 48.0, "Arial").width > 0.0, "text: {text:?}");
        }
    }

    #[test]
    fn hello_matches_table_sum() {
        // H + e + l + l + o, no adjustments apply for short Latin text.
        let m = measure("Hello", 48.0, "Arial");
        let expected = (0.67 + 0.56 + 0.56 + 0.56 + 0.56) * 48.0;
        assert!((m.width - expected).abs() < 1e-9, "width: {}", m.width);
        assert!((m.height - 57.6).abs() < 1e-9);
        assert!((m.ascent - 48.0 * 0.8).abs() < 1e-9);
        assert!((m.descent - 48.0 * 0.2).abs() < 1e-9);
        assert!(!m.accurate);
    }

    #[test]
    fn width_is_linear_in_font_size() {
        for text in ["Hello", "\u{4f60}\u{597d}", "mix 12 \u{1F600}"] {
            let small = measure(text, 24.0, "Arial").width;
            let large = measure(text, 48.0, "Arial").width;
            assert!(large >= small, "text: {text:?}");
            assert!((large - 2.0 * small).abs() < 1e-9, "text: {text:?}");
        }
    }

    #[test]
    fn astral_emoji_counts_as_one_character() {
        // U+1F30D is outside the BMP; it must contribute a single em width.
        let m = measure("\u{1F30D}", 48.0, "Arial");
        assert!((m.width - 1.1 * 48.0).abs() < 1e-9);
    }

    #[test]
    fn cjk_uses_full_width_with_tighter_spacing() {
        let m = measure("\u{4f60}\u{597d}\u{4e16}\u{754c}", 50.0, "Arial");
        let expected = 4.0 * 1.2 * 50.0 * 0.95;
        assert!((m.width - expected).abs() < 1e-9);
    }

    #[test]
    fn long_text_gets_spacing_discount() {
        let text = "abcdefghij abcdefghij";
        assert_eq!(text.chars().count(), 21);
        let base: f64 = text
            .chars()
            .map(|c| ascii_char_width(c).expect("ascii"))
            .sum();
        let m = measure(text, 10.0, "Arial");
        assert!((m.width - base * 10.0 * 0.98).abs() < 1e-9);
    }

    #[test]
    fn digit_heavy_text_widens_in_proportional_fonts() {
        let with_digits = measure("1234", 48.0, "Arial");
        let expected = 4.0 * 0.56 * 48.0 * 1.08;
        assert!((with_digits.width - expected).abs() < 1e-9);

        // Monospace digits stay tabular.
        let mono = measure("1234", 48.0, "Courier");
        assert!((mono.width - 4.0 * 0.56 * 48.0).abs() < 1e-9);
    }

    #[test]
    fn ligature_pairs_tighten_width() {
        let m = measure("ffi", 48.0, "Arial");
        // Pairs "ff" and "fi" both count.
        let base = 0.30 + 0.30 + 0.24;
        let expected = base * 48.0 * (1.0 - 0.05 * 2.0);
        assert!((m.width - expected).abs() < 1e-9);
    }

    #[test]
    fn family_corrections_apply() {
        let base = 0.56 * 5.0 * 48.0;
        let inter = measure("nnnnn", 48.0, "Inter");
        assert!((inter.width - base * 0.96).abs() < 1e-9);
        let times = measure("nnnnn", 48.0, "Times");
        // Times uses its own average width record.
        assert!((times.width - base * 1.02).abs() < 1e-9);
    }

    #[test]
    fn confidence_is_clamped_and_script_sensitive() {
        let latin = measure("Hello there", 48.0, "Arial");
        assert_eq!(latin.confidence, Some(0.85));

        let complex = measure("\u{4f60}\u{597d}\u{4e16}\u{754c}\u{4f60}", 48.0, "Arial");
        assert_eq!(complex.confidence, Some(0.75));

        let short_complex = measure("\u{4f60}\u{597d}", 48.0, "Arial");
        assert_eq!(short_complex.confidence, Some(0.70));

        let ligature = measure("field trip", 48.0, "Arial");
        assert_eq!(ligature.confidence, Some(0.90));

        for text in ["Hi", "\u{4f60}", "affix affix"] {
            let c = measure(text, 48.0, "Arial").confidence.expect("confidence");
            assert!((0.5..=0.95).contains(&c), "text: {text:?}");
        }
    }

    #[test]
    fn quoted_and_stacked_family_names_resolve() {
        let quoted = measure("nnnnn", 48.0, "'Inter', sans-serif");
        let plain = measure("nnnnn", 48.0, "Inter");
        assert_eq!(quoted.width, plain.width);
    }
}
