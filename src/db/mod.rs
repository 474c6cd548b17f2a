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

//! Data access layer.
//!
//! This module reads collections from the SQLite table store. Column names
//! follow the hosted store's lower-case convention so rows exported from it
//! can be loaded unchanged.
//!
//! # Tables
//!
//! * `dzikir` - Individual recitations with metadata and media references.
//! * `playlists` - Named collections with optional cover art.
//! * `playlist_items` - Membership of a recitation in a collection, ordered
//!   by `position`.

mod model;
pub(crate) mod scan;

use std::collections::HashMap;

use anyhow::{Context, Result};
use rusqlite::{Connection, params};

use model::{PlaylistRow, TrackRow};

use crate::model::{Playlist, Track};

/// Opens a connection to the SQLite database and configures it.
///
/// This function performs the following setup:
/// * **WAL Mode**: Enables Write-Ahead Logging so the store can be updated by
///   other tools while the player is running.
/// * **Constraints**: Enforces foreign key integrity.
/// * **Schema**: Executes [`create_schema`] to ensure all tables exist.
///
/// # Errors
///
/// Returns an error if the database file cannot be opened, the PRAGMA
/// configuration fails, or the schema cannot be created.
pub(crate) fn init_db(path: &str) -> Result<Connection> {
    let conn = Connection::open(path).with_context(|| format!("Failed to open {}", path))?;

    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
    if journal_mode != "wal" {
        anyhow::bail!(
            "Failed to switch to WAL mode. Current mode: {}",
            journal_mode
        );
    }

    conn.execute_batch(
        "
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
    ",
    )?;

    create_schema(&conn)?;

    Ok(conn)
}

/// Creates the store schema if it does not already exist.
///
/// This operation is wrapped in a single SQL transaction so the schema is
/// created atomically.
pub(crate) fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS dzikir (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            artist TEXT NOT NULL,
            album TEXT NOT NULL,
            albumart TEXT,
            audiourl TEXT,
            duration REAL NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS playlists (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            coverart TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS playlist_items (
            id TEXT PRIMARY KEY,
            playlist_id TEXT NOT NULL,
            dzikir_id TEXT NOT NULL,
            position INTEGER NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (playlist_id) REFERENCES playlists (id) ON DELETE CASCADE,
            FOREIGN KEY (dzikir_id) REFERENCES dzikir (id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_playlist_items_playlist_id
            ON playlist_items (playlist_id, position);

        COMMIT;",
    )
    .context("Failed to create schema")
}

/// Fetches every collection with its tracks.
///
/// Collections are ordered by creation time and then name; the tracks of
/// each collection follow `playlist_items.position`. Collections without
/// items are returned with an empty track list. A track row that cannot be
/// mapped (see [`model::StoreError`]) is skipped with a warning.
///
/// # Errors
///
/// Returns an error if a query fails.
pub(crate) fn fetch_collections(conn: &Connection) -> Result<Vec<Playlist>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, coverart FROM playlists ORDER BY created_at, name",
    )?;
    let playlist_rows = stmt
        .query_map([], PlaylistRow::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare_cached(
        "
        SELECT d.id, d.title, d.artist, d.album, d.albumart, d.audiourl, d.duration, pi.playlist_id
        FROM playlist_items pi
        JOIN dzikir d ON pi.dzikir_id = d.id
        ORDER BY pi.playlist_id, pi.position, pi.created_at
    ",
    )?;
    let item_rows = stmt
        .query_map([], |row| {
            let playlist_id: String = row.get(7)?;
            Ok((playlist_id, TrackRow::from_row(row)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut tracks_by_playlist: HashMap<String, Vec<Track>> = HashMap::new();
    for (playlist_id, row) in item_rows {
        match Track::try_from(row) {
            Ok(track) => tracks_by_playlist.entry(playlist_id).or_default().push(track),
            Err(e) => tracing::warn!(playlist = %playlist_id, error = %e, "Skipping track row"),
        }
    }

    let playlists = playlist_rows
        .into_iter()
        .map(|row| {
            let tracks = tracks_by_playlist.remove(&row.id).unwrap_or_default();
            row.into_playlist(tracks)
        })
        .collect();

    Ok(playlists)
}

/// Inserts or replaces a `dzikir` row.
pub(crate) fn upsert_track(conn: &Connection, track: &Track) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        "
        INSERT INTO dzikir (id, title, artist, album, albumart, audiourl, duration)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        ON CONFLICT (id) DO UPDATE SET
            title = ?2, artist = ?3, album = ?4, albumart = ?5, audiourl = ?6, duration = ?7",
    )?;
    stmt.execute(params![
        track.id,
        track.title,
        track.artist,
        track.album,
        track.album_art,
        track.audio_url,
        track.duration
    ])?;

    Ok(())
}

/// Creates the collection or renames it, then replaces its items with
/// `track_ids` in the given order.
pub(crate) fn replace_collection(
    conn: &Connection,
    id: &str,
    name: &str,
    cover_art: Option<&str>,
    track_ids: &[String],
) -> Result<()> {
    conn.execute(
        "
        INSERT INTO playlists (id, name, coverart) VALUES (?1, ?2, ?3)
        ON CONFLICT (id) DO UPDATE SET name = ?2, coverart = ?3",
        params![id, name, cover_art],
    )?;
    conn.execute("DELETE FROM playlist_items WHERE playlist_id = ?", [id])?;

    let mut stmt = conn.prepare_cached(
        "INSERT INTO playlist_items (id, playlist_id, dzikir_id, position) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for (position, track_id) in track_ids.iter().enumerate() {
        let item_id = format!("{}:{}", id, position);
        stmt.execute(params![item_id, id, track_id, position as i64])?;
    }

    Ok(())
}

#[cfg(test)]
pub(crate) fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}
