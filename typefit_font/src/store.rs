// Copyright 2025 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-wide font cache.
//!
//! Loading a font may involve a network fetch upstream, so the parsed handle
//! is shared for the lifetime of the process: the first caller to supply
//! bytes triggers the parse, and every later caller observes the same handle,
//! or the same "unavailable" state if parsing failed. A later explicit
//! [`FontStore::replace`] swaps the handle with last-writer-wins semantics.

use std::sync::{Arc, OnceLock, RwLock};

use typefit_text::FontHandle;

use crate::parsed::ParsedFont;

type SharedFont = Arc<dyn FontHandle + Send + Sync>;

#[derive(Clone, Default)]
enum FontState {
    #[default]
    Unset,
    Loaded(SharedFont),
    Unavailable,
}

/// A lazily initialized, replaceable slot for the shared font handle.
pub struct FontStore {
    state: RwLock<FontState>,
}

impl core::fmt::Debug for FontStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = match &*self.state.read().expect("font store lock") {
            FontState::Unset => "Unset",
            FontState::Loaded(_) => "Loaded",
            FontState::Unavailable => "Unavailable",
        };
        f.debug_struct("FontStore").field("state", &state).finish()
    }
}

impl Default for FontStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FontStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(FontState::Unset),
        }
    }

    /// Parses and installs `bytes` if no load has been attempted yet.
    ///
    /// A failed parse leaves the store unavailable; later calls with the same
    /// state are no-ops, so a broken payload is not re-parsed per request.
    /// Returns whether a usable handle is installed afterwards.
    pub fn ensure_loaded(&self, bytes: &[u8]) -> bool {
        {
            let state = self.state.read().expect("font store lock");
            match &*state {
                FontState::Loaded(_) => return true,
                FontState::Unavailable => return false,
                FontState::Unset => {}
            }
        }
        self.replace(bytes)
    }

    /// Parses `bytes` and installs the result, replacing any previous handle.
    ///
    /// On parse failure the store becomes unavailable (and the failure is
    /// logged); measurement degrades to the heuristic path rather than
    /// surfacing an error. Returns whether the load succeeded.
    pub fn replace(&self, bytes: &[u8]) -> bool {
        match ParsedFont::from_bytes(bytes.to_vec()) {
            Ok(font) => {
                log::debug!(
                    "font loaded: {}",
                    font.family_name().unwrap_or("<unnamed>")
                );
                self.install(Arc::new(font));
                true
            }
            Err(err) => {
                log::warn!("font load failed, falling back to heuristic measurement: {err}");
                *self.state.write().expect("font store lock") = FontState::Unavailable;
                false
            }
        }
    }

    /// Installs an already-built handle, replacing any previous one.
    pub fn install(&self, font: SharedFont) {
        *self.state.write().expect("font store lock") = FontState::Loaded(font);
    }

    /// Marks the store unavailable, e.g. when an upstream fetch failed.
    pub fn set_unavailable(&self) {
        *self.state.write().expect("font store lock") = FontState::Unavailable;
    }

    /// The current handle, if a font is loaded.
    #[must_use]
    pub fn handle(&self) -> Option<SharedFont> {
        match &*self.state.read().expect("font store lock") {
            FontState::Loaded(font) => Some(font.clone()),
            _ => None,
        }
    }
}

/// The process-wide store used by [`crate::FontTextMeasurer::default`].
pub fn global_store() -> &'static Arc<FontStore> {
    static GLOBAL: OnceLock<Arc<FontStore>> = OnceLock::new();
    GLOBAL.get_or_init(|| Arc::new(FontStore::new()))
}
