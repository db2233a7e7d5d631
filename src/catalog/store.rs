use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::Result;

use super::model::{Album, AlbumId, Artist, ArtistId, Track, TrackId};

/// Queryable, mutable track store consumed by the sequencing core.
///
/// Query results are ordered for display: album queries by track number,
/// artist queries grouped by album (release year ascending, unknown years
/// last) and by track number within each album.
pub trait Catalog: Send + Sync {
    fn find_artist_songs(&self, artist_id: ArtistId) -> Vec<Track>;

    fn find_album_songs(&self, album_id: AlbumId) -> Vec<Track>;

    /// Merge back-filled durations into the store, keyed by track id.
    /// Tracks without a duration and unknown ids are skipped.
    fn persist_durations(&self, tracks: &[Track]) -> Result<()>;
}

#[derive(Debug, Default)]
struct Inner {
    artists: Vec<Artist>,
    albums: Vec<Album>,
    tracks: Vec<Track>,
    artist_by_name: HashMap<String, ArtistId>,
    album_by_key: HashMap<(ArtistId, String), AlbumId>,
}

/// In-memory [`Catalog`] implementation.
///
/// Interior mutability lets it be shared as `Arc<dyn Catalog>` between the
/// player and whatever owns the library view.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    inner: Mutex<Inner>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or look up an artist by (case-insensitive) name.
    pub fn add_artist(&self, name: &str) -> ArtistId {
        let mut inner = self.inner.lock().unwrap();
        let key = name.trim().to_lowercase();
        if let Some(&id) = inner.artist_by_name.get(&key) {
            return id;
        }
        let id = inner.artists.len() as ArtistId + 1;
        inner.artists.push(Artist {
            id,
            name: name.trim().to_string(),
        });
        inner.artist_by_name.insert(key, id);
        id
    }

    /// Insert or look up an album by artist + (case-insensitive) title.
    /// A year on a later insert fills a previously unknown one.
    pub fn add_album(&self, artist_id: ArtistId, title: &str, year: Option<i32>) -> AlbumId {
        let mut inner = self.inner.lock().unwrap();
        let key = (artist_id, title.trim().to_lowercase());
        if let Some(&id) = inner.album_by_key.get(&key) {
            if let Some(y) = year {
                let album = &mut inner.albums[(id - 1) as usize];
                if album.year.is_none() {
                    album.year = Some(y);
                }
            }
            return id;
        }
        let id = inner.albums.len() as AlbumId + 1;
        inner.albums.push(Album {
            id,
            artist_id,
            title: title.trim().to_string(),
            year,
        });
        inner.album_by_key.insert(key, id);
        id
    }

    pub fn add_track(
        &self,
        title: &str,
        artist_id: ArtistId,
        album_id: AlbumId,
        track_nr: u32,
        path: PathBuf,
        duration: Option<Duration>,
    ) -> TrackId {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.tracks.len() as TrackId + 1;
        inner.tracks.push(Track {
            id,
            title: title.to_string(),
            artist_id,
            album_id,
            track_nr,
            path,
            duration,
        });
        id
    }

    pub fn artists(&self) -> Vec<Artist> {
        self.inner.lock().unwrap().artists.clone()
    }

    pub fn albums(&self) -> Vec<Album> {
        self.inner.lock().unwrap().albums.clone()
    }

    pub fn tracks(&self) -> Vec<Track> {
        self.inner.lock().unwrap().tracks.clone()
    }

    pub fn track(&self, id: TrackId) -> Option<Track> {
        let inner = self.inner.lock().unwrap();
        inner.tracks.iter().find(|t| t.id == id).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().tracks.is_empty()
    }
}

impl Catalog for MemoryCatalog {
    fn find_artist_songs(&self, artist_id: ArtistId) -> Vec<Track> {
        let inner = self.inner.lock().unwrap();

        let year_of = |album_id: AlbumId| -> Option<i32> {
            inner
                .albums
                .iter()
                .find(|a| a.id == album_id)
                .and_then(|a| a.year)
        };

        let mut songs: Vec<Track> = inner
            .tracks
            .iter()
            .filter(|t| t.artist_id == artist_id)
            .cloned()
            .collect();

        // Albums in release order (unknown years last), track order within.
        songs.sort_by_key(|t| {
            let year = year_of(t.album_id);
            (year.is_none(), year, t.album_id, t.track_nr)
        });
        songs
    }

    fn find_album_songs(&self, album_id: AlbumId) -> Vec<Track> {
        let inner = self.inner.lock().unwrap();
        let mut songs: Vec<Track> = inner
            .tracks
            .iter()
            .filter(|t| t.album_id == album_id)
            .cloned()
            .collect();
        songs.sort_by_key(|t| t.track_nr);
        songs
    }

    fn persist_durations(&self, tracks: &[Track]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        for enriched in tracks {
            let Some(duration) = enriched.duration else {
                continue;
            };
            if let Some(stored) = inner.tracks.iter_mut().find(|t| t.id == enriched.id) {
                stored.duration = Some(duration);
            }
        }
        Ok(())
    }
}
