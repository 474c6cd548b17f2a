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

//! The playback snapshot shared by every view.
//!
//! [`PlayerState`] is the single source of truth for what the interface shows
//! about playback. Views only ever receive a shared reference to it; the
//! [`MusicPlayer`](crate::player::MusicPlayer) is the only writer.
//!
//! # Invariants
//!
//! * Without a current track, `is_playing` is `false` and `progress` is `0`.
//! * `progress` never exceeds the duration of the current track.
//! * A current playlist, when present, contains the current track.
//! * `volume` is always within `0.0..=1.0`.

use std::sync::Arc;

use crate::model::{Playlist, Track};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlayerState {
    current_track: Option<Track>,
    current_playlist: Option<Arc<Playlist>>,
    is_playing: bool,
    progress: f64,
    volume: f64,
    is_shuffle: bool,
    is_repeat: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl PlayerState {
    /// Creates the initial snapshot: nothing selected, nothing playing.
    pub(crate) fn new(volume: f64) -> Self {
        Self {
            current_track: None,
            current_playlist: None,
            is_playing: false,
            progress: 0.0,
            volume: clamp_unit(volume).unwrap_or(1.0),
            is_shuffle: false,
            is_repeat: false,
        }
    }

    pub(crate) fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub(crate) fn current_playlist(&self) -> Option<&Arc<Playlist>> {
        self.current_playlist.as_ref()
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub(crate) fn progress(&self) -> f64 {
        self.progress
    }

    pub(crate) fn volume(&self) -> f64 {
        self.volume
    }

    pub(crate) fn is_shuffle(&self) -> bool {
        self.is_shuffle
    }

    pub(crate) fn is_repeat(&self) -> bool {
        self.is_repeat
    }

    /// Duration of the current track, or `0` when nothing is selected.
    pub(crate) fn duration(&self) -> f64 {
        self.current_track
            .as_ref()
            .map(|t| t.duration.max(0.0))
            .unwrap_or(0.0)
    }

    /// Whether the track with the given id is the current one.
    pub(crate) fn is_current(&self, track_id: &str) -> bool {
        self.current_track
            .as_ref()
            .is_some_and(|t| t.id == track_id)
    }

    /// Makes `track` current and starts playback from the beginning.
    ///
    /// If `playlist` does not contain the track, the track is still selected
    /// but the playlist is dropped, leaving a track-only selection.
    pub(crate) fn select(&mut self, track: Track, playlist: Option<Arc<Playlist>>) {
        self.current_playlist = playlist.filter(|p| p.contains(&track.id));
        self.current_track = Some(track);
        self.progress = 0.0;
        self.is_playing = true;
    }

    pub(crate) fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing && self.current_track.is_some();
    }

    pub(crate) fn toggle_playing(&mut self) {
        self.set_playing(!self.is_playing);
    }

    /// Moves the playback position, returning the clamped value applied.
    pub(crate) fn seek(&mut self, position: f64) -> f64 {
        if self.current_track.is_none() || !position.is_finite() {
            return self.progress;
        }

        self.progress = position.clamp(0.0, self.duration());
        self.progress
    }

    /// Sets the volume, returning the clamped value applied.
    pub(crate) fn set_volume(&mut self, volume: f64) -> f64 {
        if let Some(volume) = clamp_unit(volume) {
            self.volume = volume;
        }
        self.volume
    }

    pub(crate) fn toggle_shuffle(&mut self) {
        self.is_shuffle = !self.is_shuffle;
    }

    pub(crate) fn toggle_repeat(&mut self) {
        self.is_repeat = !self.is_repeat;
    }

    /// Stops playback, keeping the current track selected.
    pub(crate) fn stop(&mut self) {
        self.is_playing = false;
        self.progress = 0.0;
    }

    /// Swaps the current playlist for a reloaded copy of itself.
    pub(crate) fn replace_playlist(&mut self, playlist: Arc<Playlist>) {
        match &self.current_track {
            Some(track) if playlist.contains(&track.id) => {
                self.current_playlist = Some(playlist);
            }
            _ => self.clear(),
        }
    }

    /// Returns to the initial snapshot, keeping volume and mode flags.
    pub(crate) fn clear(&mut self) {
        self.current_track = None;
        self.current_playlist = None;
        self.is_playing = false;
        self.progress = 0.0;
    }
}

fn clamp_unit(value: f64) -> Option<f64> {
    value.is_finite().then(|| value.clamp(0.0, 1.0))
}
