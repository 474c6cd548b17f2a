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

use std::sync::Arc;

use anyhow::Result;

use crate::{
    App, MainView, StatusMessage,
    model::{Playlist, Track},
    player::PlaybackEngine,
};

pub(super) fn handle_fatal_error(message: String) -> Result<()> {
    tracing::error!(%message, "Fatal error");
    anyhow::bail!(message)
}

pub(super) fn handle_select_track<E: PlaybackEngine>(
    app: &mut App<E>,
    track: Track,
    playlist: Arc<Playlist>,
) -> Result<()> {
    app.status = None;
    app.player.select_track(track, playlist)
}

pub(super) fn handle_collections_loaded<E: PlaybackEngine>(
    app: &mut App<E>,
    playlists: Vec<Playlist>,
) -> Result<()> {
    let playlists: Vec<Arc<Playlist>> = playlists.into_iter().map(Arc::new).collect();

    app.player.collections_replaced(&playlists)?;
    app.playlist_view.collections_changed(&playlists);
    app.playlists = playlists;

    Ok(())
}

pub(super) fn handle_set_main_view<E: PlaybackEngine>(app: &mut App<E>, main_view: MainView) {
    app.main_view = main_view;
}

pub(super) fn handle_status<E: PlaybackEngine>(app: &mut App<E>, message: String) {
    tracing::info!(%message, "Status");
    app.status = Some(StatusMessage::Info(message));
}

pub(super) fn handle_error<E: PlaybackEngine>(app: &mut App<E>, message: String) {
    tracing::warn!(%message, "Error reported");
    app.status = Some(StatusMessage::Error(message));
}
