// Copyright 2025 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unicode script classification for width-estimation risk.
//!
//! The fitter and the measurement strategies both need a cheap answer to "how
//! trustworthy is a width estimate for this string?". That answer is driven by
//! Unicode block membership, not by real script itemization: compound emoji,
//! CJK and cursive scripts are where naive width math goes wrong, and block
//! ranges are enough to detect them.

/// Width-relevant classification of a string's Unicode content.
///
/// Derived deterministically from the string; the empty string yields the
/// neutral (all-false) profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScriptProfile {
    /// Contains CJK, Arabic, Hebrew, Indic, Thai or Georgian codepoints.
    pub has_complex_script: bool,
    /// Contains emoji codepoints or compound-emoji indicators (variation
    /// selectors, zero-width joiners, regional indicators).
    pub has_emoji: bool,
    /// Contains more than two ASCII digits.
    pub has_many_digits: bool,
    /// More than 50 codepoints.
    pub is_long: bool,
}

impl ScriptProfile {
    /// Fractional shrinkage to apply to an available width before accepting a
    /// font size, absorbing estimation error for hard-to-measure scripts.
    #[must_use]
    pub fn safety_margin(&self) -> f64 {
        if self.has_complex_script { 0.15 } else { 0.10 }
    }
}

/// Classifies `text` into a [`ScriptProfile`].
#[must_use]
pub fn classify(text: &str) -> ScriptProfile {
    let mut has_complex_script = false;
    let mut has_emoji = false;
    let mut digits = 0_usize;
    let mut count = 0_usize;

    for c in text.chars() {
        count += 1;
        if c.is_ascii_digit() {
            digits += 1;
        }
        has_complex_script = has_complex_script || is_complex_script(c);
        has_emoji = has_emoji || in_ranges(c as u32, EMOJI);
    }

    ScriptProfile {
        has_complex_script,
        has_emoji,
        has_many_digits: digits > 2,
        is_long: count > 50,
    }
}

/// Whether `c` belongs to a complex-script block (CJK, Arabic, Hebrew,
/// Indic, Thai, Georgian).
#[must_use]
pub fn is_complex_script(c: char) -> bool {
    in_ranges(c as u32, COMPLEX_SCRIPT)
}

/// Heuristic em-width of a codepoint that is not in the ASCII width table.
///
/// `avg` is the font family's average character width in em units; it is used
/// for uncategorized ASCII, and scaled up slightly for unknown codepoints.
#[must_use]
pub(crate) fn fallback_em_width(c: char, avg: f64) -> f64 {
    let cp = c as u32;
    if in_ranges(cp, CJK_FULL_WIDTH) {
        // Full-width rendering routinely overshoots the nominal 1.0 em.
        1.2
    } else if in_ranges(cp, EMOJI) {
        1.1
    } else if in_ranges(cp, ARABIC) {
        0.65
    } else if in_ranges(cp, HEBREW) {
        0.6
    } else if in_ranges(cp, INDIC) {
        0.7
    } else if in_ranges(cp, THAI) {
        0.8
    } else if in_ranges(cp, GEORGIAN) {
        0.65
    } else if in_ranges(cp, GREEK) {
        0.6
    } else if in_ranges(cp, CYRILLIC) {
        0.58
    } else if c.is_ascii() {
        avg
    } else {
        avg * 1.1
    }
}

fn in_ranges(cp: u32, ranges: &[(u32, u32)]) -> bool {
    ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

/// Blocks that flag a string as complex-script for safety-margin purposes.
const COMPLEX_SCRIPT: &[(u32, u32)] = &[
    (0x3040, 0x309F),   // Hiragana
    (0x30A0, 0x30FF),   // Katakana
    (0x3400, 0x4DBF),   // CJK Extension A
    (0x4E00, 0x9FFF),   // CJK Unified Ideographs
    (0xAC00, 0xD7AF),   // Hangul Syllables
    (0x0600, 0x06FF),   // Arabic
    (0x0750, 0x077F),   // Arabic Supplement
    (0xFB50, 0xFDFF),   // Arabic Presentation Forms-A
    (0xFE70, 0xFEFF),   // Arabic Presentation Forms-B
    (0x0590, 0x05FF),   // Hebrew
    (0x0900, 0x097F),   // Devanagari
    (0x0980, 0x09FF),   // Bengali
    (0x0A00, 0x0A7F),   // Gurmukhi
    (0x0A80, 0x0AFF),   // Gujarati
    (0x0E00, 0x0E7F),   // Thai
    (0x10A0, 0x10FF),   // Georgian
];

/// Emoji blocks plus compound-emoji indicators.
///
/// Variation selectors, ZWJ and regional indicators are included so that
/// flag sequences, skin-tone modified and ZWJ-joined clusters all classify
/// as emoji even when their base codepoint alone would not.
const EMOJI: &[(u32, u32)] = &[
    (0x1F000, 0x1FFFF), // Emoji blocks, incl. regional indicators + modifiers
    (0x2600, 0x26FF),   // Miscellaneous Symbols
    (0x2700, 0x27BF),   // Dingbats
    (0xFE00, 0xFE0F),   // Variation Selectors
    (0x200D, 0x200D),   // Zero Width Joiner
];

/// East Asian blocks rendered at (or beyond) full width.
const CJK_FULL_WIDTH: &[(u32, u32)] = &[
    (0x1100, 0x11FF),   // Hangul Jamo
    (0x2E80, 0x2FDF),   // CJK Radicals
    (0x3000, 0x303F),   // CJK Symbols and Punctuation
    (0x3040, 0x309F),   // Hiragana
    (0x30A0, 0x30FF),   // Katakana
    (0x3100, 0x312F),   // Bopomofo
    (0x3130, 0x318F),   // Hangul Compatibility Jamo
    (0x3200, 0x32FF),   // Enclosed CJK Letters
    (0x3400, 0x4DBF),   // CJK Extension A
    (0x4E00, 0x9FFF),   // CJK Unified Ideographs
    (0xAC00, 0xD7AF),   // Hangul Syllables
    (0xF900, 0xFAFF),   // CJK Compatibility Ideographs
    (0xFE30, 0xFE4F),   // CJK Compatibility Forms
    (0xFF00, 0xFFEF),   // Halfwidth and Fullwidth Forms
    (0x20000, 0x2A6DF), // CJK Extension B
    (0x2A700, 0x2B73F), // CJK Extension C
    (0x2B740, 0x2B81F), // CJK Extension D
    (0x2B820, 0x2CEAF), // CJK Extension E
];

const ARABIC: &[(u32, u32)] = &[
    (0x0600, 0x06FF),
    (0x0750, 0x077F),
    (0xFB50, 0xFDFF),
    (0xFE70, 0xFEFF),
];

const HEBREW: &[(u32, u32)] = &[(0x0590, 0x05FF)];

const INDIC: &[(u32, u32)] = &[
    (0x0900, 0x097F), // Devanagari
    (0x0980, 0x09FF), // Bengali
    (0x0A00, 0x0A7F), // Gurmukhi
    (0x0A80, 0x0AFF), // Gujarati
];

const THAI: &[(u32, u32)] = &[(0x0E00, 0x0E7F)];

const GEORGIAN: &[(u32, u32)] = &[(0x10A0, 0x10FF)];

const GREEK: &[(u32, u32)] = &[(0x0370, 0x03FF)];

const CYRILLIC: &[(u32, u32)] = &[(0x0400, 0x04FF), (0x0500, 0x052F)];
