// Copyright 2025 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font-size fitting and SVG card composition.
//!
//! This crate is the core of Typefit: given a short string and a canvas, it
//! searches for the largest font size whose estimated extents fit, lays the
//! text onto a composed background, and serializes the result as an SVG
//! document. Measurement is pluggable via [`typefit_text::TextMeasurer`]; see
//! `typefit_font` for the parsed-font strategy.
//!
//! The renderer always produces an image: recoverable problems (no font,
//! degraded measurements, out-of-range options) lower fidelity instead of
//! failing.

#![no_std]

extern crate alloc;

mod fit;
mod layout;
mod options;
mod render;
mod scene;
mod svg;

pub use fit::{FitOptions, FitResult, MAX_FONT_SIZE, MIN_FONT_SIZE, fit_font_size};
pub use layout::{LayoutSpec, TextPosition};
pub use options::{RenderOptions, StyleMode};
pub use render::{compose, generate};
pub use scene::{Background, EmbeddedFont, Scene, TextAnchor, TextBaseline, TextRun};
pub use svg::{to_svg_bytes, to_svg_string};
