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

//! Application event distribution and orchestration.
//!
//! This module defines the central event-handling logic for the application,
//! bridging user input (keyboard, mouse), background worker updates (store,
//! audio engine) and the UI rendering pipeline.
//!
//! # Architecture
//!
//! The system follows a reactive event-loop pattern:
//!
//! 1. **Capture**: Events are received as [`AppEvent`]s through a channel fed
//!    by the input, tick, audio and task threads, and by the
//!    [`PlayerControls`](crate::controls::PlayerControls) callbacks.
//! 2. **Process**: [`handle_event`] updates the [`App`]; player transitions
//!    go through the [`MusicPlayer`](crate::player::MusicPlayer), the only
//!    writer of the player state.
//! 3. **Render**: After each event is processed, the UI is re-drawn.

mod handlers;
mod key_handlers;

use std::{io::Stdout, sync::Arc};

use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App, MainView,
    model::{Playlist, Track},
    player::PlaybackEngine,
    render::draw,
};
use handlers::*;
use key_handlers::{process_key_event, process_mouse_event};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),

    // Transport requests, one per player callback
    PlayPause,
    Next,
    Previous,
    Seek(f64),
    VolumeChange(f64),
    ToggleShuffle,
    ToggleRepeat,
    SelectTrack(Track, Arc<Playlist>),

    // Audio engine reports
    TimeChanged(f64),
    TrackFinished,

    CollectionsLoaded(Vec<Playlist>),

    SetMainView(MainView),

    Tick,

    ExitApplication,

    Status(String),
    Error(String),
    FatalError(String),
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
///
/// # Errors
///
/// Returns an error on a fatal event, or if handling an event or drawing the
/// terminal fails.
pub(crate) fn process_events<E: PlaybackEngine>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<E>,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        if !handle_event(app, event)? {
            break;
        }

        // Render after every event processed
        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

/// Applies a single event to the application, returning `false` once the
/// application should exit.
pub(crate) fn handle_event<E: PlaybackEngine>(app: &mut App<E>, event: AppEvent) -> Result<bool> {
    match event {
        AppEvent::ExitApplication => return Ok(false),
        AppEvent::FatalError(message) => handle_fatal_error(message)?,

        AppEvent::Key(key) => process_key_event(app, key)?,
        AppEvent::Mouse(mouse) => process_mouse_event(app, mouse),

        AppEvent::PlayPause => app.player.play_pause()?,
        AppEvent::Next => app.player.next()?,
        AppEvent::Previous => app.player.previous()?,
        AppEvent::Seek(position) => app.player.seek(position)?,
        AppEvent::VolumeChange(volume) => app.player.set_volume(volume)?,
        AppEvent::ToggleShuffle => app.player.toggle_shuffle(),
        AppEvent::ToggleRepeat => app.player.toggle_repeat(),
        AppEvent::SelectTrack(track, playlist) => handle_select_track(app, track, playlist)?,

        AppEvent::TimeChanged(seconds) => app.player.progress_changed(seconds),
        AppEvent::TrackFinished => app.player.track_finished()?,

        AppEvent::CollectionsLoaded(playlists) => handle_collections_loaded(app, playlists)?,
        AppEvent::SetMainView(view) => handle_set_main_view(app, view),

        AppEvent::Status(message) => handle_status(app, message),
        AppEvent::Error(message) => handle_error(app, message),

        AppEvent::Tick => {}
    }

    Ok(true)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{collections::VecDeque, sync::mpsc};

    use super::*;
    use crate::{config::AppConfig, player::testing::RecordingEngine, tasks::AppTask};

    /// An application wired to a recording engine, with the task channel
    /// receiver kept alive for inspection.
    pub(crate) fn app() -> (App<RecordingEngine>, mpsc::Receiver<AppTask>) {
        let (event_tx, event_rx) = mpsc::channel();
        let (task_tx, task_rx) = mpsc::channel();
        let app = App::new(
            AppConfig::default(),
            event_tx,
            event_rx,
            task_tx,
            RecordingEngine::default(),
        )
        .unwrap();
        (app, task_rx)
    }

    /// Handles `event` and then every event it queued, like the main loop
    /// would. Returns `false` if the application asked to exit.
    pub(crate) fn run(app: &mut App<RecordingEngine>, event: AppEvent) -> bool {
        let mut pending = VecDeque::from([event]);
        while let Some(event) = pending.pop_front() {
            if !handle_event(app, event).unwrap() {
                return false;
            }
            pending.extend(app.event_rx.try_iter());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{testing::*, *};
    use crate::{
        model::fixtures::{playlist, track},
        player::testing::EngineCall,
    };

    fn loaded() -> Vec<Playlist> {
        let p = playlist("p", vec![track("a", 30.0), track("b", 40.0)]);
        vec![(*p).clone()]
    }

    #[test]
    fn selecting_through_the_channel_updates_the_player() {
        let (mut app, _tasks) = app();
        run(&mut app, AppEvent::CollectionsLoaded(loaded()));

        let playlist = Arc::clone(&app.playlists[0]);
        run(&mut app, AppEvent::SelectTrack(playlist.tracks[1].clone(), playlist));

        let state = app.player.state();
        assert_eq!(state.current_track().map(|t| t.id.as_str()), Some("b"));
        assert!(state.is_playing());
    }

    #[test]
    fn engine_reports_drive_progress_and_advance() {
        let (mut app, _tasks) = app();
        run(&mut app, AppEvent::CollectionsLoaded(loaded()));
        let playlist = Arc::clone(&app.playlists[0]);
        run(&mut app, AppEvent::SelectTrack(playlist.tracks[0].clone(), playlist));

        run(&mut app, AppEvent::TimeChanged(12.0));
        assert_eq!(app.player.state().progress(), 12.0);

        run(&mut app, AppEvent::TrackFinished);
        assert_eq!(app.player.state().current_track().map(|t| t.id.as_str()), Some("b"));
        assert_eq!(
            app.player.engine_mut().take().last(),
            Some(&EngineCall::Load("/media/b.mp3".to_string()))
        );
    }

    #[test]
    fn exit_and_fatal_events_stop_the_loop() {
        let (mut app, _tasks) = app();

        assert!(!handle_event(&mut app, AppEvent::ExitApplication).unwrap());
        assert!(handle_event(&mut app, AppEvent::FatalError("mpv".to_string())).is_err());
    }
}
