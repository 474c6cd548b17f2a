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

//! Importing a directory of recitations as a collection.
//!
//! This module discovers audio files on the local filesystem with `WalkDir`,
//! reads their tags and duration with `Lofty`, and writes them to the table
//! store as `dzikir` rows plus one collection.
//!
//! Track ids are an xxh3 hash of the file path, so importing the same
//! directory again updates rows in place instead of duplicating them.

use std::{cmp::Ordering, path::Path};

use anyhow::{Context, Result};
use lofty::prelude::*;
use lofty::probe::Probe;
use rusqlite::Connection;
use walkdir::WalkDir;
use xxhash_rust::xxh3::xxh3_64;

use crate::{db, model::Track};

const AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "m4a", "ogg", "opus", "flac", "wav"];

const UNKNOWN_ARTIST: &str = "Unknown Reciter";

/// A track read from disk together with the keys it is ordered by.
#[derive(Debug, Clone)]
struct ImportedTrack {
    track_number: Option<u32>,
    file_name: String,
    track: Track,
}

/// Imports every audio file below `root` into the collection `name`.
///
/// The collection is created if needed and its items are replaced by the
/// imported tracks, ordered by track number and then file name. Files whose
/// metadata cannot be read are skipped.
///
/// # Returns
///
/// Returns the number of tracks in the collection after the import.
///
/// # Errors
///
/// Returns an error if `root` is not a directory, if the transaction fails,
/// or if database constraints are violated during insertion.
pub(crate) fn import_collection(conn: &mut Connection, root: &Path, name: &str) -> Result<usize> {
    if !root.is_dir() {
        anyhow::bail!("{} is not a directory", root.display());
    }

    let mut imported: Vec<ImportedTrack> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_audio_file(e.path()))
        .filter_map(|e| read_track(e.path()))
        .collect();

    imported.sort_by(compare_imported);

    let album = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| name.to_string());

    let tx = conn.transaction()?;

    let mut track_ids = Vec::with_capacity(imported.len());
    for mut item in imported {
        if item.track.album.is_empty() {
            item.track.album = album.clone();
        }
        db::upsert_track(&tx, &item.track)?;
        track_ids.push(item.track.id);
    }

    db::replace_collection(&tx, &collection_id(name), name, None, &track_ids)?;

    tx.commit().context("Failed to commit import")?;

    tracing::info!(collection = name, tracks = track_ids.len(), root = %root.display(), "Imported collection");

    Ok(track_ids.len())
}

/// Stable id for a collection name.
pub(crate) fn collection_id(name: &str) -> String {
    format!("{:016x}", xxh3_64(format!("collection:{}", name.trim()).as_bytes()))
}

fn track_id(path: &Path) -> String {
    format!("{:016x}", xxh3_64(path.to_string_lossy().as_bytes()))
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

fn read_track(path: &Path) -> Option<ImportedTrack> {
    let tagged_file = match Probe::open(path).and_then(|p| p.read()) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable file");
            return None;
        }
    };

    let file_name = path.file_name()?.to_string_lossy().to_string();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.clone());

    let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag());

    let title = tag
        .and_then(|t| t.title().map(|s| s.to_string()))
        .unwrap_or(stem);
    let artist = tag
        .and_then(|t| t.artist().map(|s| s.to_string()))
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());
    let album = tag
        .and_then(|t| t.album().map(|s| s.to_string()))
        .unwrap_or_default();
    let track_number = tag.and_then(|t| t.track());

    let duration = tagged_file.properties().duration().as_secs_f64();

    Some(ImportedTrack {
        track_number,
        file_name,
        track: Track {
            id: track_id(path),
            title,
            artist,
            album,
            album_art: None,
            duration,
            audio_url: Some(path.to_string_lossy().to_string()),
        },
    })
}

// Numbered tracks first, in number order, then the rest by file name.
fn compare_imported(a: &ImportedTrack, b: &ImportedTrack) -> Ordering {
    match (a.track_number, b.track_number) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.file_name.cmp(&b.file_name)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.file_name.cmp(&b.file_name),
    }
}
