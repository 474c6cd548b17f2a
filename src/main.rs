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

//! # Dzikir player TUI.
//!
//! A terminal player for collections of short recitations.
//!
//! This application coordinates a TUI frontend built with `ratatui` and a
//! background processing layer.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, UI rendering and the
//!   single player state.
//! * **Background Workers** handle store access and audio playback, reporting
//!   back with events.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and background workers is handled via `std::sync::mpsc`
//! channels.

mod commander;
mod components;
mod config;
mod controls;
mod db;
mod events;
mod logging;
mod model;
mod player;
mod render;
mod tasks;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    sync::{
        Arc,
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::Duration,
};

use crate::{
    commander::Commander,
    components::{ControlsLayout, PlaylistView},
    config::AppConfig,
    events::{AppEvent, process_events},
    model::Playlist,
    player::{AudioPlayer, MusicPlayer, PlaybackEngine},
    tasks::AppTask,
    theme::Theme,
};

const TICK_RATE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MainView {
    Collections,
    NowPlaying,
}

/// Message shown on the bottom line until replaced.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StatusMessage {
    Info(String),
    Error(String),
}

/// Application state.
pub(crate) struct App<E: PlaybackEngine> {
    pub config: AppConfig,

    pub theme: Theme,
    pub main_view: MainView,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub task_tx: Sender<AppTask>,

    /// Sole owner and writer of the player state.
    pub player: MusicPlayer<E>,

    pub playlists: Vec<Arc<Playlist>>,

    pub playlist_view: PlaylistView,
    pub now_playing_controls: ControlsLayout,

    pub commander: Commander,
    pub status: Option<StatusMessage>,
}

impl<E: PlaybackEngine> App<E> {
    /// Create a new instance of application state.
    pub fn new(
        config: AppConfig,
        event_tx: Sender<AppEvent>,
        event_rx: Receiver<AppEvent>,
        task_tx: Sender<AppTask>,
        engine: E,
    ) -> Result<Self> {
        let player = MusicPlayer::new(engine, config.default_volume)
            .context("Failed to apply initial volume")?;

        Ok(Self {
            config,
            theme: Theme::default(),
            main_view: MainView::Collections,
            event_tx,
            event_rx,
            task_tx,
            player,
            playlists: Vec::new(),
            playlist_view: PlaylistView::new(),
            now_playing_controls: ControlsLayout::default(),
            commander: Commander::new(),
            status: None,
        })
    }
}

/// The entry point of the application.
///
/// Loads the configuration, starts logging, sets up the communication
/// channels, initializes the application state, manages the terminal
/// lifecycle, and returns an error if any part of the execution fails.
fn main() -> Result<()> {
    let loaded_config = config::load_config();
    let config = loaded_config.as_ref().cloned().unwrap_or_default();

    let _log_guard = logging::init_logging(&config.log_dir)?;
    if let Err(e) = &loaded_config {
        tracing::warn!(error = ?e, "Using default configuration");
    }
    tracing::info!(?config, "Starting");

    let (event_tx, event_rx) = mpsc::channel();
    let (task_tx, task_rx) = mpsc::channel();

    let audio_player = AudioPlayer::new(event_tx.clone());
    let mut app = App::new(config, event_tx, event_rx, task_tx, audio_player)
        .context("Failed to initialise application")?;

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, task_rx);
    restore_terminal(&mut terminal);

    if let Err(e) = &res {
        tracing::error!(error = ?e, "Application error");
    }

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
/// * Enables mouse capture so rows and controls can be clicked.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal<E: PlaybackEngine>(app: &App<E>) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    if let Some(hex) = Theme::to_hex(app.theme.background_colour) {
        util::term::set_terminal_bg(&hex).ok();
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode and mouse capture, leaving the alternate screen, and resetting
/// the background color. It also ensures the cursor is made visible again.
///
/// This function is designed to be "best-effort" and does not return a result,
/// as it is typically called during cleanup or panic handling.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg().ok();
    terminal.show_cursor().ok();
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A task worker to process store [`AppTask`]s.
/// * An input thread to poll for keyboard and mouse events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// After spawning the workers, it requests the initial collections and hands
/// control to [`process_events`] to manage the UI and state updates.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run<E: PlaybackEngine>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<E>,
    task_rx: Receiver<AppTask>,
) -> Result<()> {
    // Spawn a background worker to process application tasks asynchronously.
    tasks::spawn_task_worker(&app.config, task_rx, app.event_tx.clone());

    // Spawn a thread to translate raw terminal events to application events.
    let tx_input = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let app_event = match event::read() {
                Ok(Event::Key(key)) => AppEvent::Key(key),
                Ok(Event::Mouse(mouse)) => AppEvent::Mouse(mouse),
                // Anything else only needs a redraw
                Ok(_) => AppEvent::Tick,
                Err(e) => {
                    tracing::error!(error = ?e, "Failed to read terminal input");
                    break;
                }
            };
            if tx_input.send(app_event).is_err() {
                break;
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(TICK_RATE);
        }
    });

    // Initial trigger to populate the collections from the store
    app.task_tx
        .send(AppTask::LoadCollections)
        .context("Failed to request collections")?;

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
