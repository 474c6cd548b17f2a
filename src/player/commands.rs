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

//! MPV-backed audio playback engine and event processing.
//!
//! This module drives `libmpv` from a background worker thread.
//!
//! # Architecture
//!
//! The engine operates using a dual-channel communication pattern:
//! 1. **Command Channel**: Receives [`AudioPlayerCommand`]s from the
//!    [`AudioPlayer`](super::AudioPlayer) handle (load, pause, seek and so on).
//! 2. **Event Channel**: Reports playback progress, end of file and media
//!    failures to the main loop as [`AppEvent`]s.

use anyhow::{Context, Result};
use mpv::Format;
use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};

use crate::events::AppEvent;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AudioPlayerCommand {
    Load(String),
    SetPause(bool),
    SeekTo(f64),
    SetVolume(f64),
    Stop,
}

/// Spawns the audio worker thread to process playback commands.
///
/// If the worker returns an error, it is broadcast as a fatal application
/// event.
///
/// # Arguments
///
/// * `command_rx` - The receiving end of the player command channel.
/// * `event_tx` - The channel used to broadcast playback updates and errors.
pub(crate) fn spawn_player_worker(
    command_rx: Receiver<AudioPlayerCommand>,
    event_tx: Sender<AppEvent>,
) {
    let error_tx = event_tx.clone();

    thread::spawn(move || {
        if let Err(e) = audio_player_worker(command_rx, event_tx) {
            tracing::error!(error = ?e, "MPV worker failed");
            let _ = error_tx.send(AppEvent::FatalError(format!("MPV worker failure: {:?}", e)));
        }
    });
}

/// The primary execution loop for the audio player backend.
///
/// Initialises a local `libmpv` context and alternates between draining
/// commands and waiting briefly for MPV events.
///
/// # Errors
///
/// Returns an error if the MPV context fails to initialise or an event
/// cannot be forwarded. A disconnected command channel ends the loop
/// normally.
fn audio_player_worker(
    command_rx: Receiver<AudioPlayerCommand>,
    event_tx: Sender<AppEvent>,
) -> Result<()> {
    let mut handler = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder
            .set_option("vo", "null")
            .context("Failed to set no video output")?;
        builder.build().context("Failed to build MPV handler")
    })()?;

    handler
        .observe_property::<f64>("time-pos", 0)
        .context("Failed to observe time-pos")?;

    loop {
        if !process_commands(&mut handler, &command_rx)? {
            tracing::debug!("Player command channel closed, stopping worker");
            return Ok(());
        }
        process_mpv_events(&mut handler, &event_tx)?;
    }
}

/// Drains and executes all pending commands, returning `false` once the
/// command channel has been closed.
///
/// A command MPV rejects (seeking while idle, an unreachable source) is
/// logged and skipped; it does not stop the worker.
fn process_commands(
    handler: &mut mpv::MpvHandler,
    command_rx: &Receiver<AudioPlayerCommand>,
) -> Result<bool> {
    loop {
        let command = match command_rx.try_recv() {
            Ok(command) => command,
            Err(std::sync::mpsc::TryRecvError::Empty) => return Ok(true),
            Err(std::sync::mpsc::TryRecvError::Disconnected) => return Ok(false),
        };

        tracing::trace!(?command, "Player command");

        if let Err(e) = execute_command(handler, &command) {
            tracing::warn!(?command, error = ?e, "Player command failed");
        }
    }
}

fn execute_command(handler: &mut mpv::MpvHandler, command: &AudioPlayerCommand) -> Result<()> {
    match command {
        AudioPlayerCommand::Load(source) => {
            handler
                .command(&["loadfile", source.as_str(), "replace"])
                .with_context(|| format!("Failed to load: {}", source))?;
            handler.set_property("pause", false)?;
        }
        AudioPlayerCommand::SetPause(pause) => {
            handler.set_property("pause", *pause)?;
        }
        AudioPlayerCommand::SeekTo(position) => {
            handler.command(&["seek", &position.to_string(), "absolute"])?;
        }
        AudioPlayerCommand::SetVolume(volume) => {
            handler.set_property("volume", *volume)?;
        }
        AudioPlayerCommand::Stop => {
            handler.command(&["stop"])?;
        }
    }

    Ok(())
}

/// Polls for MPV events and forwards the ones the main loop cares about.
///
/// This function waits for up to 50ms for an event from the MPV context.
fn process_mpv_events(handler: &mut mpv::MpvHandler, event_tx: &Sender<AppEvent>) -> Result<()> {
    if let Some(mpv_event) = handler.wait_event(0.05) {
        let app_event = match mpv_event {
            mpv::Event::PropertyChange { name, change, .. } => match (name, change) {
                ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => {
                    Some(AppEvent::TimeChanged(seconds))
                }
                _ => None,
            },
            mpv::Event::EndFile(result) => match result {
                Ok(mpv::EndFileReason::MPV_END_FILE_REASON_EOF) => Some(AppEvent::TrackFinished),
                Ok(mpv::EndFileReason::MPV_END_FILE_REASON_ERROR) => {
                    Some(AppEvent::Error("Failed to play media".to_string()))
                }
                Ok(_) => None,
                Err(e) => Some(AppEvent::Error(format!("Failed to play media: {:?}", e))),
            },
            _ => None,
        };

        if let Some(event) = app_event {
            event_tx.send(event).context("Failed to send event")?;
        }
    }

    Ok(())
}
