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

//! Asynchronous application task processing.
//!
//! This module implements the command pattern used to offload potentially
//! blocking store access from the main UI thread. A dedicated worker owns
//! the database connection, translates [`AppTask`] requests into store
//! operations and broadcasts the results back to the application via
//! [`AppEvent`]s.
//!
//! Only actions that may block, or may take more than a trivial amount of time
//! to process, should be implemented as tasks. Other actions are likely more
//! suited to events.

mod handlers;

use std::{
    path::PathBuf,
    sync::mpsc::{Receiver, Sender},
    thread,
};

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::{config::AppConfig, db, events::AppEvent};

#[derive(Debug)]
pub(crate) enum AppTask {
    /// Reads every collection from the store.
    LoadCollections,
    /// Imports a directory of audio files as a collection, then reloads.
    Import { dir: PathBuf, name: String },
}

/// Spawns a background thread to process application tasks.
///
/// This worker thread opens its own database connection and enters a
/// blocking loop, listening for incoming [`AppTask`]s. Failing to open the
/// database is fatal; failures of individual tasks are reported as
/// [`AppEvent::Error`] and the worker carries on.
///
/// # Arguments
///
/// * `config` - The application configuration.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(
    config: &AppConfig,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) {
    let database_file = config.database_file.clone();

    thread::spawn(move || {
        let mut conn = match open_database(&database_file) {
            Ok(conn) => conn,
            Err(e) => {
                tracing::error!(error = ?e, "Task worker failed to start");
                let _ = event_tx.send(AppEvent::FatalError(format!("{:#}", e)));
                return;
            }
        };

        while let Ok(task) = task_rx.recv() {
            let mut ctx = TaskContext {
                event_tx: &event_tx,
                conn: &mut conn,
            };

            tracing::debug!(?task, "Running task");

            if let Err(e) = handle_task(task, &mut ctx) {
                tracing::warn!(error = ?e, "Task failed");
                let _ = event_tx.send(AppEvent::Error(format!("{:#}", e)));
            }
        }

        tracing::debug!("Task channel closed, stopping worker");
    });
}

fn open_database(path: &str) -> Result<Connection> {
    db::init_db(path).with_context(|| format!("Failed to initialise database {}", path))
}

/// Bundles shared resources required by task handlers to simplify resource
/// passing when invoking those handler functions.
pub(crate) struct TaskContext<'a> {
    pub(crate) event_tx: &'a Sender<AppEvent>,
    pub(crate) conn: &'a mut Connection,
}

/// Orchestrates the execution of a single task.
fn handle_task(task: AppTask, ctx: &mut TaskContext) -> Result<()> {
    match task {
        AppTask::LoadCollections => handlers::load_collections(ctx),
        AppTask::Import { dir, name } => handlers::import(ctx, &dir, &name),
    }
}
