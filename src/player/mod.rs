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

//! Audio playback control and state management.
//!
//! This module provides two layers:
//!
//! * [`AudioPlayer`] is a handle to a background worker thread that drives the
//!   underlying audio library (MPV), so heavy audio operations never block
//!   the main application thread.
//! * [`MusicPlayer`] owns the [`PlayerState`](crate::model::PlayerState) and
//!   turns each transport request into a state transition plus the matching
//!   engine commands.

mod commands;
mod music_player;

use std::sync::mpsc;

use anyhow::Result;

pub(crate) use music_player::MusicPlayer;

use crate::{events::AppEvent, player::commands::AudioPlayerCommand};

/// The media engine as seen by the [`MusicPlayer`].
pub(crate) trait PlaybackEngine {
    /// Replaces the current media with `source` and starts playing it.
    fn load(&mut self, source: &str) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn resume(&mut self) -> Result<()>;
    /// Moves to an absolute position, in seconds.
    fn seek_to(&mut self, position: f64) -> Result<()>;
    /// Sets the output volume, `0.0..=100.0`.
    fn set_volume(&mut self, volume: f64) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
}

/// A handle to the audio playback engine.
///
/// This struct acts as a command proxy; it does not perform audio processing
/// itself but instead sends instructions to a background worker thread.
pub(crate) struct AudioPlayer {
    /// Channel for sending commands to the background worker thread.
    command_tx: mpsc::Sender<AudioPlayerCommand>,
}

impl AudioPlayer {
    /// Spawns the audio worker thread and returns a new player handle.
    ///
    /// # Arguments
    ///
    /// * `event_tx` - A channel to send application-level events (progress
    ///   updates, end of file, errors) back to the main event loop.
    pub(crate) fn new(event_tx: mpsc::Sender<AppEvent>) -> Self {
        let (command_tx, command_rx) = mpsc::channel::<AudioPlayerCommand>();

        commands::spawn_player_worker(command_rx, event_tx);

        Self { command_tx }
    }

    fn send(&self, command: AudioPlayerCommand) -> Result<()> {
        self.command_tx.send(command)?;
        Ok(())
    }
}

impl PlaybackEngine for AudioPlayer {
    fn load(&mut self, source: &str) -> Result<()> {
        self.send(AudioPlayerCommand::Load(source.to_string()))
    }

    fn pause(&mut self) -> Result<()> {
        self.send(AudioPlayerCommand::SetPause(true))
    }

    fn resume(&mut self) -> Result<()> {
        self.send(AudioPlayerCommand::SetPause(false))
    }

    fn seek_to(&mut self, position: f64) -> Result<()> {
        self.send(AudioPlayerCommand::SeekTo(position))
    }

    fn set_volume(&mut self, volume: f64) -> Result<()> {
        self.send(AudioPlayerCommand::SetVolume(volume))
    }

    fn stop(&mut self) -> Result<()> {
        self.send(AudioPlayerCommand::Stop)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_calls_become_worker_commands() {
        let (command_tx, command_rx) = mpsc::channel();
        let mut player = AudioPlayer { command_tx };

        player.load("/media/a.mp3").unwrap();
        player.pause().unwrap();
        player.seek_to(12.5).unwrap();
        player.set_volume(40.0).unwrap();

        let commands: Vec<_> = command_rx.try_iter().collect();
        assert_eq!(
            commands,
            vec![
                AudioPlayerCommand::Load("/media/a.mp3".to_string()),
                AudioPlayerCommand::SetPause(true),
                AudioPlayerCommand::SeekTo(12.5),
                AudioPlayerCommand::SetVolume(40.0),
            ]
        );
    }

    #[test]
    fn stopped_worker_is_reported() {
        let (command_tx, command_rx) = mpsc::channel();
        drop(command_rx);
        let mut player = AudioPlayer { command_tx };

        assert!(player.stop().is_err());
    }
}
