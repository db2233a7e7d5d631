use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::catalog::{Catalog, Track};
use crate::config::Settings;
use crate::error::Result;
use crate::metadata::DurationProber;
use crate::playlist::{Playlist, RepeatMode};
use crate::session::PlaybackSession;
use crate::transport::Transport;

/// The sequencer: owns the playlist and the current playback session and
/// decides what plays after what.
///
/// The player is single-threaded by design. Hosts call [`Player::poll`] at
/// their own cadence (an event loop tick is plenty); everything that happens
/// off-thread - the session's position sampler, duration probing - funnels
/// back into the player through `poll` rather than mutating it directly.
pub struct Player {
    playlist: Playlist,
    session: Option<PlaybackSession>,
    transport: Box<dyn Transport>,
    catalog: Option<Arc<dyn Catalog>>,
    prober: Option<Arc<dyn DurationProber>>,
    volume: f32,
    previous_volume: f32,
    /// One-shot target for the next automatic advance, armed when the
    /// currently playing song is removed from the playlist.
    pending_override: Option<usize>,
    tick: Duration,
    /// Incremented whenever the playlist is replaced wholesale; duration
    /// batches probed against an older generation are discarded.
    epoch: u64,
    enrich_tx: Sender<(u64, Vec<Track>)>,
    enrich_rx: Receiver<(u64, Vec<Track>)>,
}

impl Player {
    pub fn new(transport: Box<dyn Transport>, settings: &Settings) -> Self {
        let mut playlist = Playlist::new();
        playlist.set_repeat(RepeatMode::from(settings.playback.repeat));

        let volume = round_volume(settings.playback.volume);
        let (enrich_tx, enrich_rx) = mpsc::channel();

        Self {
            playlist,
            session: None,
            transport,
            catalog: None,
            prober: None,
            volume,
            previous_volume: volume,
            pending_override: None,
            tick: Duration::from_millis(settings.session.position_tick_ms),
            epoch: 0,
            enrich_tx,
            enrich_rx,
        }
    }

    /// Attach a catalog so probed durations get persisted back to it.
    pub fn with_catalog(mut self, catalog: Arc<dyn Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Attach a prober that back-fills missing track durations off-thread.
    pub fn with_prober(mut self, prober: Arc<dyn DurationProber>) -> Self {
        self.prober = Some(prober);
        self
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_playing())
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Replace the playlist with `songs` and start playing from the top.
    ///
    /// Tracks with an unknown duration are handed to the prober; results come
    /// back through [`poll`](Self::poll).
    pub fn play_songs(&mut self, songs: Vec<Track>) -> Result<()> {
        self.epoch += 1;
        self.pending_override = None;
        self.request_enrichment(&songs);
        self.playlist.set_songs(songs);
        self.start_current()
    }

    /// Append to the playlist without interrupting what's playing.
    pub fn add_songs(&mut self, songs: Vec<Track>) {
        self.request_enrichment(&songs);
        self.playlist.add_songs(songs);
    }

    /// Jump to `index` and play it. Out-of-range indexes are ignored.
    pub fn play_from_playlist_at(&mut self, index: usize) -> Result<()> {
        if self.playlist.select_song(index).is_none() {
            return Ok(());
        }
        self.pending_override = None;
        self.start_current()
    }

    /// Skip forward. At the end of the playlist with repeat off this is a
    /// no-op and whatever session exists is left alone.
    pub fn play_next(&mut self) -> Result<()> {
        self.pending_override = None;
        if self.playlist.go_to_next().is_none() {
            return Ok(());
        }
        self.start_current()
    }

    pub fn play_previous(&mut self) -> Result<()> {
        self.pending_override = None;
        if self.playlist.go_to_prev().is_none() {
            return Ok(());
        }
        self.start_current()
    }

    /// Remove the tracks at `indexes` from the playlist.
    ///
    /// Removing the currently playing song does not interrupt it; instead the
    /// next automatic advance is redirected to whatever slid into the removed
    /// slot, once. Removing the current song from the tail leaves nothing in
    /// its slot, so the advance falls back to normal cursor rules.
    pub fn remove_songs_from_playlist(&mut self, indexes: &[usize]) {
        let removed_current = self
            .playlist
            .current_index()
            .is_some_and(|current| indexes.contains(&current));
        let slot = self.playlist.current_index().map(|current| {
            current
                - indexes
                    .iter()
                    .filter(|&&i| i < current)
                    .collect::<std::collections::HashSet<_>>()
                    .len()
        });

        self.playlist.remove_songs_at(indexes);

        if removed_current {
            self.pending_override = slot.filter(|&s| s < self.playlist.len());
        }
    }

    /// Reshuffle the playlist and start playing from the top.
    pub fn shuffle(&mut self) -> Result<()> {
        if self.playlist.is_empty() {
            return Ok(());
        }
        self.pending_override = None;
        self.playlist.shuffle();
        self.start_current()
    }

    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.playlist.set_repeat(mode);
    }

    pub fn toggle_repeat(&mut self) {
        self.playlist.toggle_repeat();
    }

    /// Set the volume, clamped to `[0, 1]` and rounded to two decimals so the
    /// value survives display round-trips. Applies to the live session and to
    /// every session started afterwards.
    pub fn set_volume(&mut self, volume: f32) {
        self.apply_volume(round_volume(volume));
    }

    /// Mute, or restore the volume that was live before the last mute.
    /// Toggling while already at zero restores the remembered volume.
    pub fn toggle_mute(&mut self) {
        if self.volume > 0.0 {
            self.previous_volume = self.volume;
            self.apply_volume(0.0);
        } else {
            self.apply_volume(self.previous_volume);
        }
    }

    /// Toggle pause on the current session. Returns whether anything is
    /// playing afterwards.
    pub fn play_pause(&self) -> bool {
        match &self.session {
            Some(session) => session.toggle_pause(),
            None => false,
        }
    }

    pub fn pause(&self) {
        if let Some(session) = &self.session {
            session.pause();
        }
    }

    pub fn resume(&self) {
        if let Some(session) = &self.session {
            session.play();
        }
    }

    /// Stop playback and drop the session. The playlist and cursor stay put.
    pub fn stop(&mut self) {
        self.session = None;
    }

    pub fn seek_to(&self, to: Duration) -> Result<()> {
        match &self.session {
            Some(session) => session.seek_to(to),
            None => Ok(()),
        }
    }

    /// Drive the player forward: fold in finished duration probes and advance
    /// the playlist when the current track has played to its end.
    ///
    /// Hosts call this from their event loop; nothing here blocks.
    pub fn poll(&mut self) {
        while let Ok((epoch, enriched)) = self.enrich_rx.try_recv() {
            if epoch != self.epoch {
                debug!(epoch, current = self.epoch, "dropping stale duration batch");
                continue;
            }
            self.playlist.merge_durations(&enriched);
            if let Some(catalog) = &self.catalog {
                if let Err(err) = catalog.persist_durations(&enriched) {
                    warn!(%err, "could not persist probed durations");
                }
            }
        }

        let ended = self.session.as_mut().is_some_and(|s| s.take_ended());
        if ended {
            if let Some(index) = self.pending_override.take() {
                if self.playlist.select_song(index).is_some() {
                    let _ = self.start_current();
                }
            } else {
                let _ = self.play_next();
            }
        }
    }

    /// Load and play the song under the cursor, replacing any live session.
    /// On transport failure no session remains and the error propagates.
    fn start_current(&mut self) -> Result<()> {
        let Some(track) = self.playlist.current_song().cloned() else {
            self.session = None;
            return Ok(());
        };

        // Release the previous session (and its sampler) before loading.
        self.session = None;
        match PlaybackSession::load(self.transport.as_ref(), track, self.volume, self.tick) {
            Ok(session) => {
                self.session = Some(session);
                Ok(())
            }
            Err(err) => {
                warn!(%err, "could not start playback");
                Err(err)
            }
        }
    }

    fn apply_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(session) = &self.session {
            session.set_volume(volume);
        }
    }

    /// Hand tracks with an unknown duration to the prober, tagged with the
    /// current playlist generation.
    fn request_enrichment(&mut self, songs: &[Track]) {
        let Some(prober) = &self.prober else {
            return;
        };
        let pending: Vec<Track> = songs
            .iter()
            .filter(|t| t.duration.is_none())
            .cloned()
            .collect();
        if pending.is_empty() {
            return;
        }

        let prober = prober.clone();
        let tx = self.enrich_tx.clone();
        let epoch = self.epoch;
        thread::spawn(move || {
            let enriched = prober.probe(&pending);
            // The player may be gone by the time probing finishes.
            let _ = tx.send((epoch, enriched));
        });
    }
}

fn round_volume(volume: f32) -> f32 {
    (volume.clamp(0.0, 1.0) * 100.0).round() / 100.0
}
