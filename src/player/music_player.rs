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

//! The player state container.
//!
//! [`MusicPlayer`] owns the single [`PlayerState`] instance and is the only
//! code that mutates it. Every transport callback maps to exactly one method
//! here; each method applies the state transition first and then tells the
//! [`PlaybackEngine`] what to do, so the next render always sees the new
//! snapshot even if the engine later fails.
//!
//! The engine only accepts pause, resume and seek while it holds media. Once
//! a collection has played out, or a track without a source was selected,
//! the engine is idle and transport requests change the state alone; playing
//! again loads the current track afresh.

use std::sync::Arc;

use anyhow::Result;

use crate::{
    model::{PlayOrder, PlayerState, Playlist, Track},
    player::PlaybackEngine,
};

/// Progress after which "previous" restarts the current track instead of
/// moving back.
const RESTART_THRESHOLD_SECS: f64 = 3.0;

pub(crate) struct MusicPlayer<E: PlaybackEngine> {
    state: PlayerState,
    order: PlayOrder,
    engine: E,
    /// Whether the engine currently holds media for the current track.
    loaded: bool,
}

impl<E: PlaybackEngine> MusicPlayer<E> {
    /// Creates the player with an initial volume and applies it to the engine.
    pub(crate) fn new(engine: E, volume: f64) -> Result<Self> {
        let mut player = Self {
            state: PlayerState::new(volume),
            order: PlayOrder::default(),
            engine,
            loaded: false,
        };
        let volume = player.state.volume();
        player.engine.set_volume(volume * 100.0)?;

        Ok(player)
    }

    /// Read-only snapshot handed to the views.
    pub(crate) fn state(&self) -> &PlayerState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Makes `track` current within `playlist` and starts it from the top.
    pub(crate) fn select_track(&mut self, track: Track, playlist: Arc<Playlist>) -> Result<()> {
        let same_playlist = self
            .state
            .current_playlist()
            .is_some_and(|p| Arc::ptr_eq(p, &playlist));

        tracing::debug!(track = %track.id, playlist = %playlist.id, "Selecting track");

        let source = track.audio_url.clone();
        self.state.select(track, Some(playlist));

        if !same_playlist || self.order.len() != self.playlist_len() {
            self.rebuild_order();
        }

        match source {
            Some(source) => {
                self.loaded = true;
                self.engine.load(&source)
            }
            None => {
                tracing::warn!("Selected track has no audio source");
                self.unload()
            }
        }
    }

    pub(crate) fn play_pause(&mut self) -> Result<()> {
        let Some(track) = self.state.current_track() else {
            return Ok(());
        };
        let source = track.audio_url.clone();

        self.state.toggle_playing();

        if self.loaded {
            return if self.state.is_playing() {
                self.engine.resume()
            } else {
                self.engine.pause()
            };
        }

        // Idle engine: playing restarts the track from the top.
        match source {
            Some(source) if self.state.is_playing() => {
                tracing::debug!("Reloading idle track");
                self.state.seek(0.0);
                self.loaded = true;
                self.engine.load(&source)
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn next(&mut self) -> Result<()> {
        match self.neighbour(|order, i, repeat| order.next_after(i, repeat)) {
            Some((track, playlist)) => self.select_track(track, playlist),
            None => Ok(()),
        }
    }

    pub(crate) fn previous(&mut self) -> Result<()> {
        if self.state.current_track().is_none() {
            return Ok(());
        }

        if self.state.progress() > RESTART_THRESHOLD_SECS {
            return self.seek(0.0);
        }

        match self.neighbour(|order, i, repeat| order.previous_before(i, repeat)) {
            Some((track, playlist)) => self.select_track(track, playlist),
            None => self.seek(0.0),
        }
    }

    pub(crate) fn seek(&mut self, position: f64) -> Result<()> {
        if self.state.current_track().is_none() {
            return Ok(());
        }

        let position = self.state.seek(position);
        if !self.loaded {
            return Ok(());
        }
        self.engine.seek_to(position)
    }

    pub(crate) fn set_volume(&mut self, volume: f64) -> Result<()> {
        let volume = self.state.set_volume(volume);
        self.engine.set_volume(volume * 100.0)
    }

    pub(crate) fn toggle_shuffle(&mut self) {
        self.state.toggle_shuffle();
        self.rebuild_order();
    }

    pub(crate) fn toggle_repeat(&mut self) {
        self.state.toggle_repeat();
    }

    /// Engine progress report, in seconds.
    pub(crate) fn progress_changed(&mut self, seconds: f64) {
        self.state.seek(seconds);
    }

    /// The engine reached the end of the current media.
    pub(crate) fn track_finished(&mut self) -> Result<()> {
        if self.state.current_track().is_none() {
            return Ok(());
        }

        match self.neighbour(|order, i, repeat| order.next_after(i, repeat)) {
            Some((track, playlist)) => self.select_track(track, playlist),
            None => {
                tracing::debug!("End of collection");
                self.state.stop();
                self.loaded = false;
                Ok(())
            }
        }
    }

    /// Reconciles the state with a freshly loaded set of collections.
    pub(crate) fn collections_replaced(&mut self, playlists: &[Arc<Playlist>]) -> Result<()> {
        let Some(current_id) = self.state.current_playlist().map(|p| p.id.clone()) else {
            return Ok(());
        };

        match playlists.iter().find(|p| p.id == current_id) {
            Some(playlist) => self.state.replace_playlist(Arc::clone(playlist)),
            None => self.state.clear(),
        }

        if self.state.current_track().is_none() {
            tracing::info!(playlist = %current_id, "Current collection is gone, stopping");
            self.order = PlayOrder::default();
            return self.unload();
        }

        self.rebuild_order();
        Ok(())
    }

    fn unload(&mut self) -> Result<()> {
        self.loaded = false;
        self.engine.stop()
    }

    fn playlist_len(&self) -> usize {
        self.state
            .current_playlist()
            .map(|p| p.tracks.len())
            .unwrap_or(0)
    }

    fn current_index(&self) -> Option<usize> {
        let track = self.state.current_track()?;
        self.state.current_playlist()?.position_of(&track.id)
    }

    fn rebuild_order(&mut self) {
        let len = self.playlist_len();
        self.order = if self.state.is_shuffle() {
            PlayOrder::shuffled(len, self.current_index())
        } else {
            PlayOrder::sequential(len)
        };
    }

    fn neighbour(
        &self,
        step: impl Fn(&PlayOrder, usize, bool) -> Option<usize>,
    ) -> Option<(Track, Arc<Playlist>)> {
        let playlist = self.state.current_playlist()?;
        let current = self.current_index()?;
        let index = step(&self.order, current, self.state.is_repeat())?;
        let track = playlist.tracks.get(index)?.clone();

        Some((track, Arc::clone(playlist)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::fixtures::{playlist, track},
        player::testing::{EngineCall, RecordingEngine},
    };

    fn player() -> MusicPlayer<RecordingEngine> {
        let mut player = MusicPlayer::new(RecordingEngine::default(), 0.5).unwrap();
        player.engine_mut().take();
        player
    }

    fn collection() -> Arc<Playlist> {
        playlist("p", vec![track("a", 30.0), track("b", 40.0), track("c", 50.0)])
    }

    fn current_id(player: &MusicPlayer<RecordingEngine>) -> Option<String> {
        player.state().current_track().map(|t| t.id.clone())
    }

    #[test]
    fn initial_volume_is_applied_to_the_engine() {
        let mut player = MusicPlayer::new(RecordingEngine::default(), 0.5).unwrap();

        assert_eq!(player.engine_mut().take(), vec![EngineCall::SetVolume(50.0)]);
        assert!(player.state().current_track().is_none());
    }

    #[test]
    fn selecting_a_track_starts_it_from_zero() {
        let mut player = player();
        let p = collection();

        player.select_track(p.tracks[1].clone(), p.clone()).unwrap();

        let state = player.state();
        assert_eq!(current_id(&player).as_deref(), Some("b"));
        assert_eq!(state.current_playlist().map(|p| p.id.as_str()), Some("p"));
        assert_eq!(state.progress(), 0.0);
        assert!(state.is_playing());
        assert_eq!(
            player.engine_mut().take(),
            vec![EngineCall::Load("/media/b.mp3".to_string())]
        );
    }

    #[test]
    fn selecting_a_track_without_source_still_selects_it() {
        let mut player = player();
        let mut silent = track("s", 10.0);
        silent.audio_url = None;
        let p = playlist("p", vec![silent.clone()]);

        player.select_track(silent, p).unwrap();

        assert!(player.state().is_playing());
        assert_eq!(player.engine_mut().take(), vec![EngineCall::Stop]);
    }

    #[test]
    fn transport_on_a_track_without_source_leaves_the_engine_alone() {
        let mut player = player();
        let mut silent = track("s", 10.0);
        silent.audio_url = None;
        let p = playlist("p", vec![silent.clone()]);
        player.select_track(silent, p).unwrap();
        player.engine_mut().take();

        player.seek(4.0).unwrap();
        player.play_pause().unwrap();
        player.play_pause().unwrap();

        assert_eq!(player.state().progress(), 4.0);
        assert!(player.state().is_playing());
        assert!(player.engine_mut().take().is_empty());
    }

    #[test]
    fn play_pause_toggles_and_drives_the_engine() {
        let mut player = player();
        player.play_pause().unwrap();
        assert!(player.engine_mut().take().is_empty());

        let p = collection();
        player.select_track(p.tracks[0].clone(), p).unwrap();
        player.engine_mut().take();

        player.play_pause().unwrap();
        assert!(!player.state().is_playing());
        player.play_pause().unwrap();
        assert!(player.state().is_playing());
        assert_eq!(
            player.engine_mut().take(),
            vec![EngineCall::Pause, EngineCall::Resume]
        );
    }

    #[test]
    fn next_stops_at_the_end_unless_repeating() {
        let mut player = player();
        let p = collection();
        player.select_track(p.tracks[1].clone(), p.clone()).unwrap();

        player.next().unwrap();
        assert_eq!(current_id(&player).as_deref(), Some("c"));

        player.next().unwrap();
        assert_eq!(current_id(&player).as_deref(), Some("c"));

        player.toggle_repeat();
        player.next().unwrap();
        assert_eq!(current_id(&player).as_deref(), Some("a"));
    }

    #[test]
    fn previous_restarts_after_threshold() {
        let mut player = player();
        let p = collection();
        player.select_track(p.tracks[1].clone(), p.clone()).unwrap();
        player.progress_changed(10.0);
        player.engine_mut().take();

        player.previous().unwrap();

        assert_eq!(current_id(&player).as_deref(), Some("b"));
        assert_eq!(player.state().progress(), 0.0);
        assert_eq!(player.engine_mut().take(), vec![EngineCall::SeekTo(0.0)]);

        player.previous().unwrap();
        assert_eq!(current_id(&player).as_deref(), Some("a"));

        player.previous().unwrap();
        assert_eq!(current_id(&player).as_deref(), Some("a"));

        player.toggle_repeat();
        player.previous().unwrap();
        assert_eq!(current_id(&player).as_deref(), Some("c"));
    }

    #[test]
    fn seek_is_clamped_before_reaching_the_engine() {
        let mut player = player();
        player.seek(5.0).unwrap();
        assert!(player.engine_mut().take().is_empty());

        let p = collection();
        player.select_track(p.tracks[0].clone(), p).unwrap();
        player.engine_mut().take();

        player.seek(99.0).unwrap();

        assert_eq!(player.state().progress(), 30.0);
        assert_eq!(player.engine_mut().take(), vec![EngineCall::SeekTo(30.0)]);
    }

    #[test]
    fn volume_is_clamped_and_scaled() {
        let mut player = player();

        player.set_volume(1.4).unwrap();
        player.set_volume(0.25).unwrap();

        assert_eq!(player.state().volume(), 0.25);
        assert_eq!(
            player.engine_mut().take(),
            vec![EngineCall::SetVolume(100.0), EngineCall::SetVolume(25.0)]
        );
    }

    #[test]
    fn shuffle_visits_every_track_once_before_stopping() {
        let mut player = player();
        let p = playlist("p", (0..6).map(|i| track(&i.to_string(), 10.0)).collect());
        player.toggle_shuffle();
        player.select_track(p.tracks[2].clone(), p.clone()).unwrap();

        let mut seen = vec![current_id(&player).unwrap()];
        for _ in 0..5 {
            player.next().unwrap();
            seen.push(current_id(&player).unwrap());
        }
        player.next().unwrap();

        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 6);
        assert!(player.state().is_shuffle());
    }

    #[test]
    fn finished_track_advances_or_stops() {
        let mut player = player();
        let p = collection();
        player.select_track(p.tracks[1].clone(), p.clone()).unwrap();

        player.track_finished().unwrap();
        assert_eq!(current_id(&player).as_deref(), Some("c"));
        assert!(player.state().is_playing());

        player.progress_changed(20.0);
        player.track_finished().unwrap();
        assert_eq!(current_id(&player).as_deref(), Some("c"));
        assert!(!player.state().is_playing());
        assert_eq!(player.state().progress(), 0.0);
    }

    #[test]
    fn playing_after_the_end_reloads_the_track() {
        let mut player = player();
        let p = playlist("p", vec![track("a", 30.0)]);
        player.select_track(p.tracks[0].clone(), p).unwrap();
        player.track_finished().unwrap();
        player.engine_mut().take();

        player.seek(10.0).unwrap();
        assert_eq!(player.state().progress(), 10.0);
        assert!(player.engine_mut().take().is_empty());

        player.play_pause().unwrap();
        assert!(player.state().is_playing());
        assert_eq!(player.state().progress(), 0.0);
        assert_eq!(
            player.engine_mut().take(),
            vec![EngineCall::Load("/media/a.mp3".to_string())]
        );

        player.seek(10.0).unwrap();
        player.play_pause().unwrap();
        assert_eq!(
            player.engine_mut().take(),
            vec![EngineCall::SeekTo(10.0), EngineCall::Pause]
        );
    }

    #[test]
    fn progress_reports_are_clamped() {
        let mut player = player();
        let p = collection();
        player.select_track(p.tracks[0].clone(), p).unwrap();

        player.progress_changed(31.5);

        assert_eq!(player.state().progress(), 30.0);
    }

    #[test]
    fn reload_keeps_or_clears_the_selection() {
        let mut player = player();
        let p = collection();
        player.select_track(p.tracks[0].clone(), p).unwrap();
        player.engine_mut().take();

        let reloaded = playlist("p", vec![track("a", 30.0), track("z", 5.0)]);
        player.collections_replaced(&[reloaded.clone()]).unwrap();
        assert!(Arc::ptr_eq(player.state().current_playlist().unwrap(), &reloaded));
        player.next().unwrap();
        assert_eq!(current_id(&player).as_deref(), Some("z"));

        player.engine_mut().take();
        player.collections_replaced(&[]).unwrap();
        assert!(player.state().current_track().is_none());
        assert!(!player.state().is_playing());
        assert_eq!(player.engine_mut().take(), vec![EngineCall::Stop]);
    }
}
