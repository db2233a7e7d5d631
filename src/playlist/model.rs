use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::catalog::{Track, TrackId};
use crate::error::PlayerError;

/// Governs what `go_to_next`/`go_to_prev` do at the queue edges.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Do not wrap at the end of the playlist.
    #[default]
    Off,
    /// Wrap around to the start of the playlist.
    RepeatAll,
    /// Repeat the current song when it ends.
    RepeatOne,
}

impl FromStr for RepeatMode {
    type Err = PlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "repeat-all" | "repeat_all" | "repeatAll" => Ok(Self::RepeatAll),
            "repeat-one" | "repeat_one" | "repeatOne" => Ok(Self::RepeatOne),
            other => Err(PlayerError::InvalidArgument(format!(
                "expected a repeat mode (off, repeat-all, repeat-one) but got: {other}"
            ))),
        }
    }
}

/// An ordered, mutable sequence of tracks plus a "current position" cursor.
///
/// The cursor is `None` when the playlist is empty or after the current track
/// was removed; every mutation keeps it either `None` or in bounds. `songs` is
/// replaced wholesale on structural change rather than patched in place, so
/// observers holding a previous snapshot never see a half-applied mutation.
#[derive(Debug, Default)]
pub struct Playlist {
    songs: Vec<Track>,
    current_index: Option<usize>,
    repeat_mode: RepeatMode,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn songs(&self) -> &[Track] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    pub fn is_first_song(&self) -> bool {
        self.current_index == Some(0)
    }

    pub fn is_last_song(&self) -> bool {
        !self.is_empty() && self.current_index == Some(self.songs.len() - 1)
    }

    pub fn current_song(&self) -> Option<&Track> {
        self.current_index.and_then(|i| self.songs.get(i))
    }

    /// Replace the whole playlist; the cursor resets to the first track.
    pub fn set_songs(&mut self, songs: Vec<Track>) {
        self.current_index = if songs.is_empty() { None } else { Some(0) };
        self.songs = songs;
    }

    /// Append without touching the cursor.
    pub fn add_songs(&mut self, songs: Vec<Track>) {
        if songs.is_empty() {
            return;
        }
        let mut next = self.songs.clone();
        next.extend(songs);
        self.songs = next;
    }

    pub fn clear(&mut self) {
        self.songs = Vec::new();
        self.current_index = None;
    }

    /// Move the cursor to `index` and return the track there.
    ///
    /// Out-of-range selection is not an error: the cursor stays put and the
    /// query returns no track.
    pub fn select_song(&mut self, index: usize) -> Option<&Track> {
        if index >= self.songs.len() {
            return None;
        }
        self.current_index = Some(index);
        self.current_song()
    }

    /// Advance the cursor and return its new position, or `None` when the end
    /// of the playlist is reached with repeat off (cursor stays parked at the
    /// boundary).
    pub fn go_to_next(&mut self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        match self.repeat_mode {
            RepeatMode::RepeatOne => self.current_index,
            _ => match self.current_index {
                // An invalidated cursor re-enters at the top.
                None => {
                    self.current_index = Some(0);
                    self.current_index
                }
                Some(i) if i + 1 < self.songs.len() => {
                    self.current_index = Some(i + 1);
                    self.current_index
                }
                Some(_) if self.repeat_mode == RepeatMode::RepeatAll => {
                    self.current_index = Some(0);
                    self.current_index
                }
                Some(_) => None,
            },
        }
    }

    /// Symmetric counterpart of [`go_to_next`](Self::go_to_next).
    pub fn go_to_prev(&mut self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        match self.repeat_mode {
            RepeatMode::RepeatOne => self.current_index,
            _ => match self.current_index {
                Some(i) if i > 0 => {
                    self.current_index = Some(i - 1);
                    self.current_index
                }
                _ if self.repeat_mode == RepeatMode::RepeatAll => {
                    self.current_index = Some(self.songs.len() - 1);
                    self.current_index
                }
                _ => None,
            },
        }
    }

    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat_mode = mode;
    }

    /// Parse-and-set for callers holding a repeat mode as text (config,
    /// presentation). An unknown value fails and leaves the mode unchanged.
    pub fn set_repeat_from_str(&mut self, value: &str) -> Result<(), PlayerError> {
        self.repeat_mode = value.parse()?;
        Ok(())
    }

    /// Cycle off -> repeat-all -> repeat-one -> off.
    pub fn toggle_repeat(&mut self) {
        self.repeat_mode = match self.repeat_mode {
            RepeatMode::Off => RepeatMode::RepeatAll,
            RepeatMode::RepeatAll => RepeatMode::RepeatOne,
            RepeatMode::RepeatOne => RepeatMode::Off,
        };
    }

    /// Uniformly permute the playlist and reset the cursor to the top.
    ///
    /// The identity of "currently playing" is not preserved: whatever lands at
    /// position 0 becomes current. Callers that want to keep the same track
    /// current must re-locate it themselves.
    pub fn shuffle(&mut self) {
        if self.songs.is_empty() {
            return;
        }
        let mut shuffled = self.songs.clone();
        shuffled.shuffle(&mut thread_rng());
        self.songs = shuffled;
        self.current_index = Some(0);
    }

    /// Merge back-filled durations into matching songs by track id, keeping
    /// order and cursor untouched. Songs absent from `enriched` are left
    /// alone, so a batch computed against an older list cannot corrupt a
    /// newer one.
    pub fn merge_durations(&mut self, enriched: &[Track]) {
        let durations: HashMap<TrackId, Duration> = enriched
            .iter()
            .filter_map(|t| t.duration.map(|d| (t.id, d)))
            .collect();
        if durations.is_empty() {
            return;
        }
        self.songs = self
            .songs
            .iter()
            .map(|song| {
                let mut song = song.clone();
                if let Some(&d) = durations.get(&song.id) {
                    song.duration = Some(d);
                }
                song
            })
            .collect();
    }

    /// Remove the tracks at `indexes` in one atomic operation.
    ///
    /// The cursor policy is computed from the original index set, never
    /// re-derived per removal: if the current index is in the set the cursor
    /// becomes `None` (the owner decides what plays next); otherwise it shifts
    /// left by the number of removed indexes strictly below it, so the same
    /// logical track stays current. Out-of-range indexes are ignored.
    pub fn remove_songs_at(&mut self, indexes: &[usize]) {
        let next_index = match self.current_index {
            Some(current) if indexes.contains(&current) => None,
            Some(current) => {
                let shift = indexes
                    .iter()
                    .filter(|&&i| i < current && i < self.songs.len())
                    .collect::<std::collections::HashSet<_>>()
                    .len();
                Some(current - shift)
            }
            None => None,
        };

        self.songs = self
            .songs
            .iter()
            .enumerate()
            .filter(|(i, _)| !indexes.contains(i))
            .map(|(_, t)| t.clone())
            .collect();
        self.current_index = next_index;
    }
}
