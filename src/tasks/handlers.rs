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

use std::path::Path;

use anyhow::Result;

use crate::{
    db::{self, scan},
    events::AppEvent,
    tasks::TaskContext,
};

pub(super) fn load_collections(ctx: &mut TaskContext) -> Result<()> {
    let collections = db::fetch_collections(ctx.conn)?;
    tracing::info!(count = collections.len(), "Loaded collections");
    ctx.event_tx.send(AppEvent::CollectionsLoaded(collections))?;

    Ok(())
}

pub(super) fn import(ctx: &mut TaskContext, dir: &Path, name: &str) -> Result<()> {
    ctx.event_tx
        .send(AppEvent::Status(format!("Importing {}...", dir.display())))?;

    let count = scan::import_collection(ctx.conn, dir, name)?;
    ctx.event_tx
        .send(AppEvent::Status(format!("Imported {} dzikir into {}", count, name)))?;

    load_collections(ctx)
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn import_reports_progress_then_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let mut conn = db::open_in_memory().unwrap();
        let (event_tx, event_rx) = mpsc::channel();
        let mut ctx = TaskContext {
            event_tx: &event_tx,
            conn: &mut conn,
        };

        import(&mut ctx, dir.path(), "Evening").unwrap();

        let events: Vec<_> = event_rx.try_iter().collect();
        assert!(matches!(&events[..], [
            AppEvent::Status(_),
            AppEvent::Status(done),
            AppEvent::CollectionsLoaded(collections),
        ] if done == "Imported 0 dzikir into Evening" && collections[0].name == "Evening"));
    }

    #[test]
    fn failed_import_sends_no_collections() {
        let dir = tempfile::tempdir().unwrap();
        let mut conn = db::open_in_memory().unwrap();
        let (event_tx, event_rx) = mpsc::channel();
        let mut ctx = TaskContext {
            event_tx: &event_tx,
            conn: &mut conn,
        };

        assert!(import(&mut ctx, &dir.path().join("nope"), "X").is_err());
        assert!(!event_rx.try_iter().any(|e| matches!(e, AppEvent::CollectionsLoaded(_))));
    }
}
