use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::{AudioFile, ItemKey, TaggedFileExt};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::store::MemoryCatalog;

const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNKNOWN_ALBUM: &str = "Unknown Album";

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Track numbers are commonly tagged as "3" or "3/12".
fn parse_track_nr(raw: &str) -> u32 {
    raw.split('/')
        .next()
        .and_then(|n| n.trim().parse().ok())
        .unwrap_or(0)
}

struct ScannedTags {
    title: String,
    artist: Option<String>,
    album: Option<String>,
    track_nr: u32,
    year: Option<i32>,
    duration: Option<Duration>,
}

fn read_tags(path: &Path) -> ScannedTags {
    let default_title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();

    let mut tags = ScannedTags {
        title: default_title,
        artist: None,
        album: None,
        track_nr: 0,
        year: None,
        duration: None,
    };

    if let Ok(tagged) = lofty::read_from_path(path) {
        tags.duration = Some(tagged.properties().duration());

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.get_string(&ItemKey::TrackTitle) {
                if !v.trim().is_empty() {
                    tags.title = v.to_string();
                }
            }
            if let Some(v) = tag.get_string(&ItemKey::TrackArtist) {
                let v = v.trim();
                if !v.is_empty() {
                    tags.artist = Some(v.to_string());
                }
            }
            if let Some(v) = tag.get_string(&ItemKey::AlbumTitle) {
                let v = v.trim();
                if !v.is_empty() {
                    tags.album = Some(v.to_string());
                }
            }
            if let Some(v) = tag.get_string(&ItemKey::TrackNumber) {
                tags.track_nr = parse_track_nr(v);
            }
            if let Some(v) = tag.get_string(&ItemKey::Year) {
                tags.year = v.trim().parse().ok();
            }
        }
    }

    tags
}

/// Walk `dir` and build a normalized in-memory catalog from the audio files
/// found there. Files whose tags cannot be read still become tracks, titled
/// after their file stem and filed under the unknown-artist/album buckets.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> MemoryCatalog {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut paths: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| {
            let path = e.path();
            path.is_file()
                && (settings.include_hidden || !is_hidden(path))
                && is_audio_file(path, settings)
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    // Deterministic ids regardless of directory iteration order.
    paths.sort();

    let catalog = MemoryCatalog::new();
    for path in paths {
        let tags = read_tags(&path);
        let artist_id = catalog.add_artist(tags.artist.as_deref().unwrap_or(UNKNOWN_ARTIST));
        let album_id = catalog.add_album(
            artist_id,
            tags.album.as_deref().unwrap_or(UNKNOWN_ALBUM),
            tags.year,
        );
        catalog.add_track(
            &tags.title,
            artist_id,
            album_id,
            tags.track_nr,
            path,
            tags.duration,
        );
    }
    catalog
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let settings = LibrarySettings::default();
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a.txt"), &settings));
        assert!(!is_audio_file(Path::new("/tmp/a"), &settings));
    }

    #[test]
    fn parse_track_nr_handles_slash_totals() {
        assert_eq!(parse_track_nr("3"), 3);
        assert_eq!(parse_track_nr("3/12"), 3);
        assert_eq!(parse_track_nr(" 7 / 9 "), 7);
        assert_eq!(parse_track_nr("garbage"), 0);
    }
}
