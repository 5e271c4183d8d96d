// Copyright 2025 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsed-font measurement adapter for Typefit.
//!
//! This crate implements [`typefit_text::FontHandle`] on top of `ttf-parser`,
//! owns the process-wide font cache, and provides the measurement strategy
//! selector: glyph-backed metrics when a usable font is loaded, the heuristic
//! tables otherwise. Fetching font bytes (from a URL, a data-URI, an embedded
//! payload) is the surrounding service's job; this crate starts at "here are
//! the bytes".

mod measure;
mod parsed;
mod store;

pub use measure::FontTextMeasurer;
pub use parsed::{FontLoadError, ParsedFont};
pub use store::{FontStore, global_store};
