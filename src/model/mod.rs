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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application, recitation
//! tracks and the collections that group them, along with the playback
//! snapshot ([`state::PlayerState`]) and the order in which a collection is
//! walked ([`queue::PlayOrder`]).

pub(crate) mod queue;
pub(crate) mod state;

pub(crate) use queue::PlayOrder;
pub(crate) use state::PlayerState;

/// A single playable recitation.
///
/// Tracks are immutable once mapped from the table store.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Track {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) artist: String,
    pub(crate) album: String,
    pub(crate) album_art: Option<String>,
    /// Duration in seconds.
    pub(crate) duration: f64,
    pub(crate) audio_url: Option<String>,
}

/// An ordered, named collection of tracks.
///
/// The order of `tracks` is the playback order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Playlist {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) tracks: Vec<Track>,
    pub(crate) cover_art: Option<String>,
}

impl Playlist {
    /// Index of the track with the given id, if it belongs to this playlist.
    pub(crate) fn position_of(&self, track_id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == track_id)
    }

    pub(crate) fn contains(&self, track_id: &str) -> bool {
        self.position_of(track_id).is_some()
    }

    /// Sum of all track durations, in seconds.
    pub(crate) fn total_duration(&self) -> f64 {
        self.tracks.iter().map(|t| t.duration.max(0.0)).sum()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use super::{Playlist, Track};

    pub(crate) fn track(id: &str, duration: f64) -> Track {
        Track {
            id: id.to_string(),
            title: format!("Title {id}"),
            artist: format!("Reciter {id}"),
            album: "Morning Adhkar".to_string(),
            album_art: None,
            duration,
            audio_url: Some(format!("/media/{id}.mp3")),
        }
    }

    pub(crate) fn playlist(id: &str, tracks: Vec<Track>) -> Arc<Playlist> {
        Arc::new(Playlist {
            id: id.to_string(),
            name: format!("Collection {id}"),
            tracks,
            cover_art: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{playlist, track};

    #[test]
    fn position_of_finds_member_tracks() {
        let p = playlist("p1", vec![track("a", 10.0), track("b", 20.0)]);

        assert_eq!(p.position_of("b"), Some(1));
        assert_eq!(p.position_of("z"), None);
        assert!(p.contains("a"));
    }

    #[test]
    fn total_duration_ignores_negative_values() {
        let p = playlist("p1", vec![track("a", 65.5), track("b", -3.0), track("c", 4.5)]);

        assert_eq!(p.total_duration(), 70.0);
    }
}
