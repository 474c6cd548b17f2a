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

//! Input handling for the collections page.
//!
//! Keyboard and mouse input are mapped onto the cursor or onto exactly one
//! [`PlayerControls`] callback. Activating a row selects its track;
//! activating the inline affordance only toggles playback.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::{
    components::playlist::{CursorFocus, PlaylistView, track_at, track_count},
    controls::PlayerControls,
    model::{PlayerState, Playlist},
};

impl PlaylistView {
    /// Handles navigation and activation keys, returning whether the key was
    /// consumed. Without collections nothing is consumed.
    pub(crate) fn handle_key(
        &mut self,
        key: &KeyEvent,
        playlists: &[Arc<Playlist>],
        state: &PlayerState,
        controls: &dyn PlayerControls,
    ) -> bool {
        let total = track_count(playlists);
        if playlists.is_empty() {
            return false;
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.cursor.next(total),
            KeyCode::Char('k') | KeyCode::Up => self.cursor.previous(total),
            KeyCode::Char('g') | KeyCode::Home => self.cursor.first(total),
            KeyCode::Char('G') | KeyCode::End => self.cursor.last(total),

            KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => {
                if self.cursor_on_current(playlists, state) {
                    self.cursor.set_focus(CursorFocus::Affordance);
                }
            }
            KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => {
                self.cursor.set_focus(CursorFocus::Row)
            }

            KeyCode::Enter => self.activate(playlists, state, controls),

            _ => return false,
        }

        true
    }

    /// Handles clicks and the scroll wheel over the last drawn layout.
    pub(crate) fn handle_mouse(
        &mut self,
        mouse: &MouseEvent,
        playlists: &[Arc<Playlist>],
        state: &PlayerState,
        controls: &dyn PlayerControls,
    ) -> bool {
        let total = track_count(playlists);

        match mouse.kind {
            MouseEventKind::ScrollDown if total > 0 => self.cursor.next(total),
            MouseEventKind::ScrollUp if total > 0 => self.cursor.previous(total),

            MouseEventKind::Down(MouseButton::Left) => {
                let (column, row) = (mouse.column, mouse.row);

                if let Some(mini_controls) = &self.layout().mini_controls {
                    if mini_controls.click(column, row, state, controls) {
                        return true;
                    }
                }

                let Some(target) = self.layout().row_at(column, row).copied() else {
                    return false;
                };
                let Some((playlist, track)) = track_at(playlists, target.position) else {
                    return false;
                };

                self.cursor.move_to(target.position, total);

                let on_affordance = target
                    .affordance
                    .is_some_and(|area| area.contains((column, row).into()));
                if on_affordance {
                    self.cursor.set_focus(CursorFocus::Affordance);
                    controls.on_play_pause();
                } else {
                    controls.on_select_track(track, playlist);
                }
            }

            _ => return false,
        }

        true
    }

    fn cursor_on_current(&self, playlists: &[Arc<Playlist>], state: &PlayerState) -> bool {
        track_at(playlists, self.cursor.position()).is_some_and(|(_, track)| state.is_current(&track.id))
    }

    fn activate(
        &mut self,
        playlists: &[Arc<Playlist>],
        state: &PlayerState,
        controls: &dyn PlayerControls,
    ) {
        let Some((playlist, track)) = track_at(playlists, self.cursor.position()) else {
            return;
        };

        if self.cursor.focus() == CursorFocus::Affordance && state.is_current(&track.id) {
            controls.on_play_pause();
        } else {
            self.cursor.set_focus(CursorFocus::Row);
            controls.on_select_track(track, playlist);
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyModifiers, MouseEvent};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::{
        components::playlist::render::tests::{collections, playing},
        controls::testing::{Call, RecordingControls},
        theme::Theme,
    };

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn drawn(playlists: &[Arc<Playlist>], state: &PlayerState) -> PlaylistView {
        let mut view = PlaylistView::new();
        redraw(&mut view, playlists, state);
        view
    }

    fn redraw(view: &mut PlaylistView, playlists: &[Arc<Playlist>], state: &PlayerState) {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                view.draw(f, area, playlists, state, &Theme::default());
            })
            .unwrap();
    }

    fn select(track_id: &str, playlist_id: &str) -> Call {
        Call::SelectTrack {
            track_id: track_id.to_string(),
            playlist_id: playlist_id.to_string(),
        }
    }

    #[test]
    fn enter_selects_the_cursor_track_once() {
        let playlists = collections();
        let mut view = PlaylistView::new();
        let controls = RecordingControls::default();
        let state = PlayerState::default();

        for code in [KeyCode::Char('j'), KeyCode::Char('j'), KeyCode::Enter] {
            assert!(view.handle_key(&key(code), &playlists, &state, &controls));
        }

        assert_eq!(controls.calls(), vec![select("c", "p2")]);
    }

    #[test]
    fn affordance_focus_only_toggles_playback() {
        let playlists = collections();
        let state = playing(&playlists, 0);
        let mut view = PlaylistView::new();
        let controls = RecordingControls::default();

        view.handle_key(&key(KeyCode::Tab), &playlists, &state, &controls);
        assert_eq!(view.cursor.focus(), CursorFocus::Affordance);
        view.handle_key(&key(KeyCode::Enter), &playlists, &state, &controls);

        view.handle_key(&key(KeyCode::BackTab), &playlists, &state, &controls);
        view.handle_key(&key(KeyCode::Enter), &playlists, &state, &controls);

        assert_eq!(controls.calls(), vec![Call::PlayPause, select("a", "p1")]);
    }

    #[test]
    fn affordance_is_unreachable_on_other_rows() {
        let playlists = collections();
        let state = playing(&playlists, 2);
        let mut view = PlaylistView::new();
        let controls = RecordingControls::default();

        view.handle_key(&key(KeyCode::Char('l')), &playlists, &state, &controls);

        assert_eq!(view.cursor.focus(), CursorFocus::Row);
    }

    #[test]
    fn clicks_split_between_row_and_affordance() {
        let playlists = collections();
        let state = playing(&playlists, 1);
        let mut view = drawn(&playlists, &state);
        let controls = RecordingControls::default();

        let row = view.layout().rows[1];
        let affordance = row.affordance.unwrap();

        assert!(view.handle_mouse(&click(affordance.x, affordance.y), &playlists, &state, &controls));
        assert_eq!(controls.calls(), vec![Call::PlayPause]);

        let title_column = affordance.right() + 2;
        assert!(view.handle_mouse(&click(title_column, row.area.y), &playlists, &state, &controls));
        assert_eq!(controls.calls(), vec![Call::PlayPause, select("b", "p1")]);
        assert_eq!(view.cursor.position(), 1);
    }

    #[test]
    fn clicking_a_plain_row_selects_it() {
        let playlists = collections();
        let state = PlayerState::default();
        let mut view = drawn(&playlists, &state);
        let controls = RecordingControls::default();

        let row = view.layout().rows[2];
        view.handle_mouse(&click(row.area.x + 8, row.area.y), &playlists, &state, &controls);

        assert_eq!(controls.calls(), vec![select("c", "p2")]);
        assert_eq!(view.cursor.position(), 2);
    }

    #[test]
    fn mini_bar_clicks_reach_the_transport() {
        let playlists = collections();
        let state = playing(&playlists, 0);
        let mut view = drawn(&playlists, &state);
        let controls = RecordingControls::default();

        let next = view.layout().mini_controls.as_ref().unwrap().buttons[2].1;
        view.handle_mouse(&click(next.x + 1, next.y), &playlists, &state, &controls);

        assert_eq!(controls.calls(), vec![Call::Next]);
    }

    #[test]
    fn without_collections_input_is_ignored() {
        let mut view = drawn(&[], &PlayerState::default());
        let controls = RecordingControls::default();

        assert!(!view.handle_key(&key(KeyCode::Enter), &[], &PlayerState::default(), &controls));
        assert!(!view.handle_mouse(&click(10, 5), &[], &PlayerState::default(), &controls));
        assert!(controls.calls().is_empty());
    }
}
