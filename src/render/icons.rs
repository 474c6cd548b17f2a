// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Unicode symbols for the TUI.
//!
//! This module contains the glyphs used across the interface to represent
//! transport controls and missing artwork. These are selected for
//! compatibility with most modern terminal emulators and fonts.

// Standard Media Controls (Unicode)
pub(crate) const ICON_PLAY: &str = "\u{25B6}";
pub(crate) const ICON_PAUSE: &str = "\u{23F8}";
pub(crate) const ICON_NEXT: &str = "\u{23ED}";
pub(crate) const ICON_PREV: &str = "\u{23EE}";

pub(crate) const ICON_SHUFFLE: &str = "\u{21C4}";
pub(crate) const ICON_REPEAT: &str = "\u{21BB}";

pub(crate) const ICON_VOLUME: &str = "\u{266A}";

// Artwork stand-ins. Art URLs cannot be drawn in a terminal, so a present
// image and a missing one get different glyphs.
pub(crate) const ART_TRACK: &str = "\u{266B}";
pub(crate) const ART_COLLECTION: &str = "\u{25A3}";
pub(crate) const ART_PLACEHOLDER: &str = "\u{25A1}";

/// Glyph for an optional artwork reference.
pub(crate) fn art_glyph(art: Option<&str>, present: &'static str) -> &'static str {
    match art {
        Some(url) if !url.trim().is_empty() => present,
        _ => ART_PLACEHOLDER,
    }
}
