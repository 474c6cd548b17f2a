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

//! The collections page.
//!
//! Lists every collection with its tracks, highlights the track that is
//! currently playing and offers an inline play/pause affordance on that row.
//! While a track is current, a mini now-playing bar with minimal transport
//! controls is pinned to the bottom.
//!
//! The view only reads the [`PlayerState`](crate::model::PlayerState); every
//! interaction is reported through a
//! [`PlayerControls`](crate::controls::PlayerControls) callback.

mod event;
mod render;

use std::sync::Arc;

use ratatui::{
    Frame,
    layout::{Position, Rect},
};

pub(crate) use render::render_playlists;

use crate::{
    components::audio_controls::ControlsLayout,
    model::{PlayerState, Playlist, Track},
    theme::Theme,
};

/// Which part of the cursor row receives activation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum CursorFocus {
    #[default]
    Row,
    /// The inline play/pause affordance of the current row.
    Affordance,
}

/// Keyboard cursor over the tracks of all collections.
///
/// `position` counts tracks across collections in display order, so the
/// cursor never lands on headers or placeholders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PlaylistCursor {
    position: usize,
    focus: CursorFocus,
}

impl PlaylistCursor {
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn focus(&self) -> CursorFocus {
        self.focus
    }

    pub(crate) fn move_to(&mut self, position: usize, total: usize) {
        let position = position.min(total.saturating_sub(1));
        if position != self.position {
            self.position = position;
            self.focus = CursorFocus::Row;
        }
    }

    pub(crate) fn next(&mut self, total: usize) {
        self.move_to(self.position.saturating_add(1), total);
    }

    pub(crate) fn previous(&mut self, total: usize) {
        self.move_to(self.position.saturating_sub(1), total);
    }

    pub(crate) fn first(&mut self, total: usize) {
        self.move_to(0, total);
    }

    pub(crate) fn last(&mut self, total: usize) {
        self.move_to(total.saturating_sub(1), total);
    }

    pub(crate) fn set_focus(&mut self, focus: CursorFocus) {
        self.focus = focus;
    }
}

/// Where one track row landed on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RowTarget {
    pub(crate) position: usize,
    pub(crate) area: Rect,
    /// Present on current rows only.
    pub(crate) affordance: Option<Rect>,
}

/// Click targets from the last draw.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PlaylistLayout {
    pub(crate) rows: Vec<RowTarget>,
    pub(crate) mini_controls: Option<ControlsLayout>,
}

impl PlaylistLayout {
    pub(crate) fn row_at(&self, column: u16, row: u16) -> Option<&RowTarget> {
        let position = Position::new(column, row);
        self.rows.iter().find(|target| target.area.contains(position))
    }
}

/// The collections page, holding the cursor and the last layout.
#[derive(Debug, Default)]
pub(crate) struct PlaylistView {
    pub(crate) cursor: PlaylistCursor,
    layout: PlaylistLayout,
}

impl PlaylistView {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn draw(
        &mut self,
        f: &mut Frame,
        area: Rect,
        playlists: &[Arc<Playlist>],
        state: &PlayerState,
        theme: &Theme,
    ) {
        self.layout = render_playlists(f, area, playlists, state, &self.cursor, theme);
    }

    pub(crate) fn layout(&self) -> &PlaylistLayout {
        &self.layout
    }

    /// Keeps the cursor in range after the collections were reloaded.
    pub(crate) fn collections_changed(&mut self, playlists: &[Arc<Playlist>]) {
        let total = track_count(playlists);
        self.cursor.move_to(self.cursor.position, total);
    }
}

/// Total number of track rows across `playlists`.
pub(crate) fn track_count(playlists: &[Arc<Playlist>]) -> usize {
    playlists.iter().map(|p| p.tracks.len()).sum()
}

/// Resolves a cursor position to the track and the collection it is in.
pub(crate) fn track_at(
    playlists: &[Arc<Playlist>],
    position: usize,
) -> Option<(&Arc<Playlist>, &Track)> {
    let mut remaining = position;
    for playlist in playlists {
        match playlist.tracks.get(remaining) {
            Some(track) => return Some((playlist, track)),
            None => remaining -= playlist.tracks.len(),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{playlist, track};

    fn collections() -> Vec<Arc<Playlist>> {
        vec![
            playlist("p1", vec![track("a", 1.0), track("b", 1.0)]),
            playlist("empty", vec![]),
            playlist("p2", vec![track("c", 1.0)]),
        ]
    }

    #[test]
    fn positions_span_collections() {
        let playlists = collections();

        assert_eq!(track_count(&playlists), 3);
        let (p, t) = track_at(&playlists, 2).unwrap();
        assert_eq!((p.id.as_str(), t.id.as_str()), ("p2", "c"));
        assert!(track_at(&playlists, 3).is_none());
        assert!(track_at(&[], 0).is_none());
    }

    #[test]
    fn cursor_stays_in_range() {
        let mut cursor = PlaylistCursor::default();

        cursor.previous(3);
        assert_eq!(cursor.position(), 0);
        cursor.last(3);
        assert_eq!(cursor.position(), 2);
        cursor.next(3);
        assert_eq!(cursor.position(), 2);
        cursor.first(0);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn moving_resets_focus() {
        let mut cursor = PlaylistCursor::default();
        cursor.set_focus(CursorFocus::Affordance);

        cursor.previous(3);
        assert_eq!(cursor.focus(), CursorFocus::Affordance);

        cursor.next(3);
        assert_eq!(cursor.focus(), CursorFocus::Row);
    }

    #[test]
    fn reload_clamps_the_cursor() {
        let mut view = PlaylistView::new();
        view.cursor.last(10);

        view.collections_changed(&collections());

        assert_eq!(view.cursor.position(), 2);
    }
}
