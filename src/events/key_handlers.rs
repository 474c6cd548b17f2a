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

//! Keyboard and mouse routing.
//!
//! Input is offered to each consumer in turn until one takes it:
//!
//! 1. The command line, which swallows everything while open.
//! 2. The collections page (navigation and activation), when shown.
//! 3. The transport key bindings.
//! 4. Global keys: view switching and quitting.

use anyhow::Result;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::{App, MainView, components::handle_transport_key, events::AppEvent, player::PlaybackEngine};

/// Maps a key press to application actions and player callbacks.
///
/// # Errors
///
/// Returns an error if an event or task cannot be sent.
pub(super) fn process_key_event<E: PlaybackEngine>(app: &mut App<E>, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    let controls = &app.event_tx;
    let state = app.player.state();

    if app
        .commander
        .handle_event(&Event::Key(key), controls, &app.event_tx, &app.task_tx)?
    {
        return Ok(());
    }

    if app.main_view == MainView::Collections
        && app
            .playlist_view
            .handle_key(&key, &app.playlists, state, controls)
    {
        return Ok(());
    }

    if handle_transport_key(&key, state, &app.config, controls) {
        return Ok(());
    }

    process_global_key_event(app, key)
}

fn process_global_key_event<E: PlaybackEngine>(app: &mut App<E>, key: KeyEvent) -> Result<()> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.event_tx.send(AppEvent::ExitApplication)?
        }

        (KeyCode::Char('1'), _) => app
            .event_tx
            .send(AppEvent::SetMainView(MainView::Collections))?,
        (KeyCode::Char('2'), _) => app
            .event_tx
            .send(AppEvent::SetMainView(MainView::NowPlaying))?,

        (KeyCode::Esc, _) => app.status = None,

        _ => {}
    }

    Ok(())
}

/// Routes mouse input to the component under the pointer.
pub(super) fn process_mouse_event<E: PlaybackEngine>(app: &mut App<E>, mouse: MouseEvent) {
    let controls = &app.event_tx;
    let state = app.player.state();

    match app.main_view {
        MainView::Collections => {
            app.playlist_view
                .handle_mouse(&mouse, &app.playlists, state, controls);
        }
        MainView::NowPlaying => {
            if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                app.now_playing_controls
                    .click(mouse.column, mouse.row, state, controls);
            }
        }
    }
}
