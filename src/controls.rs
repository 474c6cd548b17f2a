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

//! Transport callback contract.
//!
//! Views never touch the [`PlayerState`](crate::model::PlayerState) they
//! render. Instead every user interaction is reported through exactly one
//! [`PlayerControls`] callback, and the state owner decides what happens.
//!
//! In the running application the callbacks are implemented by the event
//! channel sender, so each interaction becomes an [`AppEvent`] handled by the
//! main loop.

use std::sync::{Arc, mpsc::Sender};

use crate::{
    events::AppEvent,
    model::{Playlist, Track},
};

pub(crate) trait PlayerControls {
    fn on_play_pause(&self);
    fn on_next(&self);
    fn on_previous(&self);
    /// Requests playback at `position` seconds into the current track.
    fn on_seek(&self, position: f64);
    /// Requests a volume in `0.0..=1.0`.
    fn on_volume_change(&self, volume: f64);
    fn on_toggle_shuffle(&self);
    fn on_toggle_repeat(&self);
    fn on_select_track(&self, track: &Track, playlist: &Arc<Playlist>);
}

// A closed channel means the loop is shutting down, nothing is left to notify.
impl PlayerControls for Sender<AppEvent> {
    fn on_play_pause(&self) {
        let _ = self.send(AppEvent::PlayPause);
    }

    fn on_next(&self) {
        let _ = self.send(AppEvent::Next);
    }

    fn on_previous(&self) {
        let _ = self.send(AppEvent::Previous);
    }

    fn on_seek(&self, position: f64) {
        let _ = self.send(AppEvent::Seek(position));
    }

    fn on_volume_change(&self, volume: f64) {
        let _ = self.send(AppEvent::VolumeChange(volume));
    }

    fn on_toggle_shuffle(&self) {
        let _ = self.send(AppEvent::ToggleShuffle);
    }

    fn on_toggle_repeat(&self) {
        let _ = self.send(AppEvent::ToggleRepeat);
    }

    fn on_select_track(&self, track: &Track, playlist: &Arc<Playlist>) {
        let _ = self.send(AppEvent::SelectTrack(track.clone(), Arc::clone(playlist)));
    }
}


#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::model::fixtures::{playlist, track};

    #[test]
    fn sender_forwards_each_callback_as_one_event() {
        let (tx, rx) = mpsc::channel();
        let p = playlist("p", vec![track("a", 10.0)]);

        tx.on_select_track(&p.tracks[0], &p);
        tx.on_seek(4.0);
        tx.on_toggle_repeat();

        assert!(matches!(rx.try_recv(), Ok(AppEvent::SelectTrack(t, pl)) if t.id == "a" && pl.id == "p"));
        assert!(matches!(rx.try_recv(), Ok(AppEvent::Seek(pos)) if pos == 4.0));
        assert!(matches!(rx.try_recv(), Ok(AppEvent::ToggleRepeat)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closed_channel_is_ignored() {
        let (tx, rx) = mpsc::channel::<AppEvent>();
        drop(rx);

        tx.on_play_pause();
    }
}
