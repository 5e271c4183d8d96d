// Copyright 2025 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font-size search.
//!
//! A bounded integer descent from the largest candidate size: measured width
//! scales linearly with font size for every measurer in this workspace, so
//! the first size whose measurement fits under the safety margin is the
//! largest fitting size. The loop runs at most
//! `max_font_size - min_font_size + 1` iterations.

use typefit_text::{TextMeasurement, TextMeasurer, TextStyle, classify};

/// Smallest font size the fitter will return.
pub const MIN_FONT_SIZE: u32 = 12;

/// Largest font size the fitter will consider by default.
pub const MAX_FONT_SIZE: u32 = 100;

/// Constraints for a font-size search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitOptions {
    /// Available width, before the safety margin is applied.
    pub max_width: f64,
    /// Optional available height (no margin applied).
    pub max_height: Option<f64>,
    /// Smallest candidate size, inclusive.
    pub min_font_size: u32,
    /// Largest candidate size, inclusive.
    pub max_font_size: u32,
}

impl FitOptions {
    /// Creates options for the given available width with the default size
    /// range.
    #[must_use]
    pub fn new(max_width: f64) -> Self {
        Self {
            max_width,
            max_height: None,
            min_font_size: MIN_FONT_SIZE,
            max_font_size: MAX_FONT_SIZE,
        }
    }

    /// Also constrains measured height.
    #[must_use]
    pub fn with_max_height(mut self, max_height: f64) -> Self {
        self.max_height = Some(max_height);
        self
    }

    /// Sets the candidate size range (both ends inclusive).
    #[must_use]
    pub fn with_font_size_range(mut self, min: u32, max: u32) -> Self {
        self.min_font_size = min;
        self.max_font_size = max;
        self
    }

    /// Sets the largest candidate size.
    #[must_use]
    pub fn with_max_font_size(mut self, max: u32) -> Self {
        self.max_font_size = max;
        self
    }
}

/// The outcome of a font-size search.
///
/// `metrics` is always the measurement taken at `font_size`: the one that
/// satisfied the fit predicate, or the floor measurement when nothing fit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitResult {
    /// The chosen font size.
    pub font_size: u32,
    /// The measurement evaluated at `font_size`.
    pub metrics: TextMeasurement,
}

/// Finds the largest font size whose measured text fits the constraints.
///
/// The safety margin shrinking `max_width` comes from the script profile of
/// `text` (complex scripts get a wider margin). When no candidate fits, the
/// floor size is returned with its own measurement; callers must tolerate
/// visual overflow at the floor.
pub fn fit_font_size(
    measurer: &dyn TextMeasurer,
    text: &str,
    style: &TextStyle,
    options: &FitOptions,
) -> FitResult {
    let profile = classify(text);
    let safe_width = options.max_width * (1.0 - profile.safety_margin());

    let min = options.min_font_size.min(options.max_font_size);
    let max = options.max_font_size.max(options.min_font_size);

    for font_size in (min..=max).rev() {
        let metrics = measurer.measure(text, style.at_size(f64::from(font_size)));
        log::trace!(
            "candidate {font_size}px: measured={:.1} safe-width={safe_width:.1}",
            metrics.width
        );
        let height_ok = options.max_height.is_none_or(|h| metrics.height <= h);
        if metrics.width <= safe_width && height_ok {
            log::debug!("fitted {font_size}px (accurate={})", metrics.accurate);
            return FitResult { font_size, metrics };
        }
    }

    let metrics = measurer.measure(text, style.at_size(f64::from(min)));
    log::debug!("no candidate fit, floored at {min}px");
    FitResult {
        font_size: min,
        metrics,
    }
}
