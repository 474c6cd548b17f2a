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

//! Database row mapping for domain models.
//!
//! Rows keep the store's column names (`albumart`, `audiourl`, `coverart`)
//! and are converted into [`Track`] and [`Playlist`] before reaching the rest
//! of the application. Nullable and blank references both map to `None`.

use rusqlite::Row;
use thiserror::Error;

use crate::model::{Playlist, Track};

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("track {id} has an invalid duration: {duration}")]
    InvalidDuration { id: String, duration: f64 },
}

/// A row of the `dzikir` table.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TrackRow {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) artist: String,
    pub(crate) album: String,
    pub(crate) albumart: Option<String>,
    pub(crate) audiourl: Option<String>,
    pub(crate) duration: f64,
}

impl TrackRow {
    /// Maps an SQLite row to a [`TrackRow`].
    ///
    /// This is a helper function designed to be used with
    /// [`rusqlite::Statement::query_map`]; columns are expected in the order
    /// `id, title, artist, album, albumart, audiourl, duration`.
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            artist: row.get(2)?,
            album: row.get(3)?,
            albumart: row.get(4)?,
            audiourl: row.get(5)?,
            duration: row.get(6)?,
        })
    }
}

impl TryFrom<TrackRow> for Track {
    type Error = StoreError;

    fn try_from(row: TrackRow) -> Result<Self, Self::Error> {
        if !row.duration.is_finite() || row.duration < 0.0 {
            return Err(StoreError::InvalidDuration {
                id: row.id,
                duration: row.duration,
            });
        }

        Ok(Track {
            id: row.id,
            title: row.title,
            artist: row.artist,
            album: row.album,
            album_art: non_blank(row.albumart),
            duration: row.duration,
            audio_url: non_blank(row.audiourl),
        })
    }
}

/// A row of the `playlists` table.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlaylistRow {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) coverart: Option<String>,
}

impl PlaylistRow {
    /// Maps an SQLite row with columns `id, name, coverart`.
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            coverart: row.get(2)?,
        })
    }

    pub(crate) fn into_playlist(self, tracks: Vec<Track>) -> Playlist {
        Playlist {
            id: self.id,
            name: self.name,
            tracks,
            cover_art: non_blank(self.coverart),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> TrackRow {
        TrackRow {
            id: "d1".to_string(),
            title: "Ayat al-Kursi".to_string(),
            artist: "Reciter".to_string(),
            album: "Morning".to_string(),
            albumart: Some("https://cdn.example/art.png".to_string()),
            audiourl: Some("https://cdn.example/d1.mp3".to_string()),
            duration: 95.0,
        }
    }

    #[test]
    fn maps_columns_onto_track_fields() {
        let track = Track::try_from(row()).expect("valid row");

        assert_eq!(track.id, "d1");
        assert_eq!(track.album_art.as_deref(), Some("https://cdn.example/art.png"));
        assert_eq!(track.audio_url.as_deref(), Some("https://cdn.example/d1.mp3"));
        assert_eq!(track.duration, 95.0);
    }

    #[test]
    fn null_and_blank_references_become_none() {
        let track = Track::try_from(TrackRow {
            albumart: None,
            audiourl: Some("  ".to_string()),
            ..row()
        })
        .expect("valid row");

        assert_eq!(track.album_art, None);
        assert_eq!(track.audio_url, None);

        let playlist = PlaylistRow {
            id: "p".to_string(),
            name: "Evening".to_string(),
            coverart: Some(String::new()),
        }
        .into_playlist(vec![]);
        assert_eq!(playlist.cover_art, None);
    }

    #[test]
    fn rejects_negative_or_nan_durations() {
        for duration in [-1.0, f64::NAN] {
            let err = Track::try_from(TrackRow { duration, ..row() }).unwrap_err();
            assert!(matches!(err, StoreError::InvalidDuration { ref id, .. } if id == "d1"));
        }
    }
}
