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

//! Command-line input logic and state management.
//!
//! This module implements the `:` command line. Typing is delegated to a
//! `tui-input` component; when a command is submitted it is parsed and
//! dispatched, player commands through [`PlayerControls`] and everything
//! else as an application event or background task.

use std::{path::PathBuf, sync::mpsc::Sender};

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use thiserror::Error;
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{MainView, controls::PlayerControls, events::AppEvent, tasks::AppTask, util::format::parse_time};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    Quit,
    ShowView(MainView),
    PlayPause,
    Next,
    Previous,
    /// Absolute position in seconds.
    Seek(f64),
    /// Volume in `0.0..=1.0`.
    Volume(f64),
    Shuffle,
    Repeat,
    Reload,
    Import { dir: PathBuf, name: String },
}

#[derive(Debug, Error, PartialEq)]
pub(crate) enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid {what}: {value}")]
    InvalidArgument { what: &'static str, value: String },
}

/// Parses a submitted command line, without the leading `:`.
pub(crate) fn parse_command(buffer: &str) -> Result<Command, CommandError> {
    let parts: Vec<&str> = buffer.split_whitespace().collect();

    let command = match parts.as_slice() {
        ["q"] | ["quit"] => Command::Quit,

        ["1"] => Command::ShowView(MainView::Collections),
        ["2"] => Command::ShowView(MainView::NowPlaying),

        ["play"] => Command::PlayPause,
        ["next"] => Command::Next,
        ["prev"] => Command::Previous,
        ["shuffle"] => Command::Shuffle,
        ["repeat"] => Command::Repeat,
        ["reload"] => Command::Reload,

        ["seek", position] => match parse_time(position) {
            Some(seconds) => Command::Seek(seconds),
            None => {
                return Err(CommandError::InvalidArgument {
                    what: "position",
                    value: position.to_string(),
                });
            }
        },
        ["seek", ..] => return Err(CommandError::Usage("seek <M:SS|seconds>")),

        ["vol", percent] => match percent.parse::<u8>() {
            Ok(percent) if percent <= 100 => Command::Volume(f64::from(percent) / 100.0),
            _ => {
                return Err(CommandError::InvalidArgument {
                    what: "volume",
                    value: percent.to_string(),
                });
            }
        },
        ["vol", ..] => return Err(CommandError::Usage("vol <0-100>")),

        ["import", dir, name @ ..] if !name.is_empty() => Command::Import {
            dir: PathBuf::from(dir),
            name: name.join(" "),
        },
        ["import", ..] => return Err(CommandError::Usage("import <dir> <name>")),

        [cmd, ..] => return Err(CommandError::Unknown(cmd.to_string())),
        [] => return Err(CommandError::Usage(":<command>")),
    };

    Ok(command)
}

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Consumes the event if the command line is open, or if it opens it.
    pub(crate) fn handle_event(
        &mut self,
        event: &Event,
        controls: &dyn PlayerControls,
        event_tx: &Sender<AppEvent>,
        task_tx: &Sender<AppTask>,
    ) -> Result<bool> {
        let Event::Key(key_event) = event else {
            return Ok(false);
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return Ok(true);
            }
            return Ok(false);
        }

        match key_event.code {
            KeyCode::Esc => {
                self.active = false;
                self.input.reset();
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                self.active = false;
                self.input.reset();

                if !buffer.is_empty() {
                    match parse_command(&buffer) {
                        Ok(command) => dispatch(command, controls, event_tx, task_tx)?,
                        Err(e) => event_tx.send(AppEvent::Error(e.to_string()))?,
                    }
                }
            }

            _ => {
                // Delegate all other key events to the managed input component.
                self.input.handle_event(event);
            }
        }

        Ok(true)
    }
}

fn dispatch(
    command: Command,
    controls: &dyn PlayerControls,
    event_tx: &Sender<AppEvent>,
    task_tx: &Sender<AppTask>,
) -> Result<()> {
    tracing::debug!(?command, "Running command");

    match command {
        Command::Quit => event_tx.send(AppEvent::ExitApplication)?,
        Command::ShowView(view) => event_tx.send(AppEvent::SetMainView(view))?,
        Command::PlayPause => controls.on_play_pause(),
        Command::Next => controls.on_next(),
        Command::Previous => controls.on_previous(),
        Command::Seek(position) => controls.on_seek(position),
        Command::Volume(volume) => controls.on_volume_change(volume),
        Command::Shuffle => controls.on_toggle_shuffle(),
        Command::Repeat => controls.on_toggle_repeat(),
        Command::Reload => task_tx.send(AppTask::LoadCollections)?,
        Command::Import { dir, name } => task_tx.send(AppTask::Import { dir, name })?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;
    use crate::controls::testing::{Call, RecordingControls};

    fn type_line(commander: &mut Commander, line: &str, controls: &RecordingControls) -> (Vec<AppEvent>, Vec<AppTask>) {
        let (event_tx, event_rx) = mpsc::channel();
        let (task_tx, task_rx) = mpsc::channel();

        let keys = std::iter::once(KeyCode::Char(':'))
            .chain(line.chars().map(KeyCode::Char))
            .chain(std::iter::once(KeyCode::Enter));
        for code in keys {
            let event = Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
            assert!(commander.handle_event(&event, controls, &event_tx, &task_tx).unwrap());
        }

        (event_rx.try_iter().collect(), task_rx.try_iter().collect())
    }

    #[test]
    fn parses_player_commands() {
        assert_eq!(parse_command("play"), Ok(Command::PlayPause));
        assert_eq!(parse_command("seek 1:30"), Ok(Command::Seek(90.0)));
        assert_eq!(parse_command("seek 42"), Ok(Command::Seek(42.0)));
        assert_eq!(parse_command("vol 35"), Ok(Command::Volume(0.35)));
        assert_eq!(parse_command(" 2 "), Ok(Command::ShowView(MainView::NowPlaying)));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert_eq!(
            parse_command("vol 120"),
            Err(CommandError::InvalidArgument {
                what: "volume",
                value: "120".to_string()
            })
        );
        assert!(matches!(parse_command("seek 1:75"), Err(CommandError::InvalidArgument { .. })));
        assert_eq!(parse_command("seek"), Err(CommandError::Usage("seek <M:SS|seconds>")));
        assert_eq!(parse_command("import /tmp"), Err(CommandError::Usage("import <dir> <name>")));
        assert_eq!(parse_command("dance"), Err(CommandError::Unknown("dance".to_string())));
    }

    #[test]
    fn import_joins_the_collection_name() {
        assert_eq!(
            parse_command("import /srv/adhkar Morning Adhkar"),
            Ok(Command::Import {
                dir: PathBuf::from("/srv/adhkar"),
                name: "Morning Adhkar".to_string()
            })
        );
    }

    #[test]
    fn typed_commands_are_dispatched() {
        let mut commander = Commander::new();
        let controls = RecordingControls::default();

        let (events, tasks) = type_line(&mut commander, "next", &controls);
        assert!(events.is_empty() && tasks.is_empty());
        assert_eq!(controls.calls(), vec![Call::Next]);
        assert!(!commander.active());

        let (_, tasks) = type_line(&mut commander, "reload", &controls);
        assert!(matches!(tasks.as_slice(), [AppTask::LoadCollections]));

        let (events, _) = type_line(&mut commander, "q", &controls);
        assert!(matches!(events.as_slice(), [AppEvent::ExitApplication]));
    }

    #[test]
    fn errors_are_reported_as_events() {
        let mut commander = Commander::new();
        let controls = RecordingControls::default();

        let (events, _) = type_line(&mut commander, "vol loud", &controls);

        assert!(matches!(events.as_slice(), [AppEvent::Error(msg)] if msg == "Invalid volume: loud"));
        assert!(controls.calls().is_empty());
    }

    #[test]
    fn keys_pass_through_while_closed() {
        let mut commander = Commander::new();
        let (event_tx, _event_rx) = mpsc::channel();
        let (task_tx, _task_rx) = mpsc::channel();
        let event = Event::Key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE));

        let handled = commander
            .handle_event(&event, &RecordingControls::default(), &event_tx, &task_tx)
            .unwrap();

        assert!(!handled);
    }
}
