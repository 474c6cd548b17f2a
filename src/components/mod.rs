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

//! Interactive view components.
//!
//! Components draw from read-only inputs and report interaction through
//! [`PlayerControls`](crate::controls::PlayerControls) callbacks.

pub(crate) mod audio_controls;
pub(crate) mod playlist;

pub(crate) use audio_controls::{ControlsLayout, ControlsMode, draw_audio_controls, handle_transport_key};
pub(crate) use playlist::PlaylistView;
