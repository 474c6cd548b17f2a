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

//! Keyboard bindings for the transport controls.
//!
//! Seek and volume keys compute an absolute target from the current
//! snapshot, so every key maps to exactly one callback with a plain value.

use crossterm::event::{KeyCode, KeyEvent};

use crate::{config::AppConfig, controls::PlayerControls, model::PlayerState};

/// Multiplier applied to the seek step by the coarse seek keys.
const COARSE_SEEK_FACTOR: f64 = 4.0;

/// Invokes the callback bound to `key`, returning `false` when the key is
/// not a transport key.
pub(crate) fn handle_transport_key(
    key: &KeyEvent,
    state: &PlayerState,
    config: &AppConfig,
    controls: &dyn PlayerControls,
) -> bool {
    let seek_step = f64::from(config.seek_step);
    let volume_step = config.volume_step_ratio();

    match key.code {
        KeyCode::Char(' ') => controls.on_play_pause(),
        KeyCode::Char('n') => controls.on_next(),
        KeyCode::Char('p') => controls.on_previous(),
        KeyCode::Char('z') => controls.on_toggle_shuffle(),
        KeyCode::Char('r') => controls.on_toggle_repeat(),

        KeyCode::Char(',') => return seek_by(state, -seek_step, controls),
        KeyCode::Char('.') => return seek_by(state, seek_step, controls),
        KeyCode::Char('<') => return seek_by(state, -seek_step * COARSE_SEEK_FACTOR, controls),
        KeyCode::Char('>') => return seek_by(state, seek_step * COARSE_SEEK_FACTOR, controls),

        KeyCode::Char('-') => controls.on_volume_change(step_volume(state.volume(), -volume_step)),
        KeyCode::Char('=') | KeyCode::Char('+') => {
            controls.on_volume_change(step_volume(state.volume(), volume_step))
        }

        _ => return false,
    }

    true
}

fn seek_by(state: &PlayerState, delta: f64, controls: &dyn PlayerControls) -> bool {
    if state.current_track().is_none() {
        return false;
    }

    let target = (state.progress() + delta).clamp(0.0, state.duration());
    controls.on_seek(target);
    true
}

// Rounded to whole percent so repeated steps do not drift.
fn step_volume(volume: f64, delta: f64) -> f64 {
    ((volume + delta) * 100.0).round().clamp(0.0, 100.0) / 100.0
}
