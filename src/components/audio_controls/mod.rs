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

//! Transport controls shared by the now playing page and the mini bar.
//!
//! The controls never hold state of their own. Drawing reads a
//! [`PlayerState`] snapshot and returns a [`ControlsLayout`] describing where
//! each target landed; input is then mapped through that layout onto exactly
//! one [`PlayerControls`] callback.

mod event;
mod render;

use ratatui::layout::{Position, Rect};

pub(crate) use event::handle_transport_key;
pub(crate) use render::draw_audio_controls;

use crate::{controls::PlayerControls, model::PlayerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ControlsMode {
    /// Shuffle, previous, play/pause, next and repeat, plus seek and volume
    /// bars.
    Full,
    /// Previous, play/pause and next only.
    Minimal,
}

impl ControlsMode {
    pub(crate) fn buttons(self) -> &'static [ControlButton] {
        match self {
            ControlsMode::Full => &[
                ControlButton::Shuffle,
                ControlButton::Previous,
                ControlButton::PlayPause,
                ControlButton::Next,
                ControlButton::Repeat,
            ],
            ControlsMode::Minimal => &[
                ControlButton::Previous,
                ControlButton::PlayPause,
                ControlButton::Next,
            ],
        }
    }

    /// Rows needed to draw the controls in this mode.
    pub(crate) fn height(self) -> u16 {
        match self {
            ControlsMode::Full => 3,
            ControlsMode::Minimal => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ControlButton {
    Shuffle,
    Previous,
    PlayPause,
    Next,
    Repeat,
}

impl ControlButton {
    fn invoke(self, controls: &dyn PlayerControls) {
        match self {
            ControlButton::Shuffle => controls.on_toggle_shuffle(),
            ControlButton::Previous => controls.on_previous(),
            ControlButton::PlayPause => controls.on_play_pause(),
            ControlButton::Next => controls.on_next(),
            ControlButton::Repeat => controls.on_toggle_repeat(),
        }
    }
}

/// Screen positions of the click targets from the last draw.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ControlsLayout {
    pub(crate) buttons: Vec<(ControlButton, Rect)>,
    /// Only present while a track is current.
    pub(crate) seek_bar: Option<Rect>,
    pub(crate) volume_bar: Option<Rect>,
}

impl ControlsLayout {
    pub(crate) fn button_at(&self, column: u16, row: u16) -> Option<ControlButton> {
        let position = Position::new(column, row);
        self.buttons
            .iter()
            .find(|(_, area)| area.contains(position))
            .map(|(button, _)| *button)
    }

    /// Routes a click to at most one callback, returning whether anything
    /// was hit.
    pub(crate) fn click(
        &self,
        column: u16,
        row: u16,
        state: &PlayerState,
        controls: &dyn PlayerControls,
    ) -> bool {
        let position = Position::new(column, row);

        if let Some(button) = self.button_at(column, row) {
            button.invoke(controls);
            return true;
        }

        if let Some(bar) = self.seek_bar.filter(|bar| bar.contains(position)) {
            if state.current_track().is_none() {
                return false;
            }
            controls.on_seek(ratio_at(bar, column) * state.duration());
            return true;
        }

        if let Some(bar) = self.volume_bar.filter(|bar| bar.contains(position)) {
            controls.on_volume_change(ratio_at(bar, column));
            return true;
        }

        false
    }
}

// Leftmost cell is 0.0 and rightmost is 1.0.
fn ratio_at(bar: Rect, column: u16) -> f64 {
    let offset = f64::from(column.saturating_sub(bar.x));
    let span = f64::from(bar.width.saturating_sub(1).max(1));
    (offset / span).clamp(0.0, 1.0)
}
