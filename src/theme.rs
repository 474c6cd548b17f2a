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

//! Visual styling and colour configuration for the TUI.
//!
//! This module defines the application's colour palette and provides a
//! conversion to the hexadecimal form used for terminal emulator styling.

use ratatui::style::Color;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) gauge_track_colour: Color,
    pub(crate) status_colour: Color,
    pub(crate) error_colour: Color,

    pub(crate) heading_fg: Color,
    pub(crate) text_fg: Color,
    pub(crate) muted_fg: Color,
    pub(crate) placeholder_fg: Color,

    pub(crate) current_row_bg: Color,
    pub(crate) cursor_row_bg: Color,
    pub(crate) affordance_fg: Color,
    pub(crate) affordance_bg: Color,
}

impl Default for Theme {
    // Returns the standard application theme.
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    // Constructs the default theme.
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(20, 36, 32),
            accent_colour: Color::Rgb(94, 200, 160),
            border_colour: Color::Rgb(90, 102, 98),
            gauge_track_colour: Color::Rgb(34, 56, 50),
            status_colour: Color::Rgb(220, 220, 210),
            error_colour: Color::Rgb(235, 110, 100),

            heading_fg: Color::Rgb(255, 255, 255),
            text_fg: Color::Rgb(230, 232, 228),
            muted_fg: Color::Rgb(150, 162, 158),
            placeholder_fg: Color::Rgb(110, 124, 120),

            current_row_bg: Color::Rgb(38, 74, 62),
            cursor_row_bg: Color::Rgb(50, 60, 90),
            affordance_fg: Color::Rgb(20, 36, 32),
            affordance_bg: Color::Rgb(94, 200, 160),
        }
    }

    /// Converts a [`Color`] into a CSS-style hexadecimal string.
    ///
    /// Only [`Color::Rgb`] has a hexadecimal form; other variants yield
    /// `None`.
    pub(crate) fn to_hex(colour: Color) -> Option<String> {
        match colour {
            Color::Rgb(r, g, b) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
            _ => None,
        }
    }
}
