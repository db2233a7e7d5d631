use std::path::PathBuf;
use std::time::Duration;

pub type ArtistId = u64;
pub type AlbumId = u64;
pub type TrackId = u64;

/// A single song. Identity is by `id`; the playlist stores copies and never
/// re-derives identity from position.
///
/// `duration` starts as `None` for formats the scanner could not probe and may
/// be back-filled asynchronously after the track is first loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist_id: ArtistId,
    pub album_id: AlbumId,
    /// Position of the track on its album, 0 when unknown.
    pub track_nr: u32,
    pub path: PathBuf,
    pub duration: Option<Duration>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Album {
    pub id: AlbumId,
    pub artist_id: ArtistId,
    pub title: String,
    /// Release year, when the tags carried one.
    pub year: Option<i32>,
}
