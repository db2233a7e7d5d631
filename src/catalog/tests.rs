use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::tempdir;

use crate::config::LibrarySettings;

use super::*;

fn catalog_with_two_albums() -> MemoryCatalog {
    let catalog = MemoryCatalog::new();
    let artist = catalog.add_artist("Ensemble");
    let late = catalog.add_album(artist, "Late Works", Some(1999));
    let early = catalog.add_album(artist, "Early Works", Some(1971));

    // Insert out of order on purpose; queries must sort.
    catalog.add_track("Late II", artist, late, 2, PathBuf::from("/m/l2.mp3"), None);
    catalog.add_track("Early I", artist, early, 1, PathBuf::from("/m/e1.mp3"), None);
    catalog.add_track("Late I", artist, late, 1, PathBuf::from("/m/l1.mp3"), None);
    catalog.add_track("Early II", artist, early, 2, PathBuf::from("/m/e2.mp3"), None);
    catalog
}

#[test]
fn album_songs_are_ordered_by_track_number() {
    let catalog = catalog_with_two_albums();
    let late = catalog.albums()[0].id;

    let songs = catalog.find_album_songs(late);
    let titles: Vec<&str> = songs.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Late I", "Late II"]);
}

#[test]
fn artist_songs_group_albums_by_year_then_track_number() {
    let catalog = catalog_with_two_albums();
    let artist = catalog.artists()[0].id;

    let songs = catalog.find_artist_songs(artist);
    let titles: Vec<&str> = songs.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Early I", "Early II", "Late I", "Late II"]);
}

#[test]
fn artist_songs_put_albums_with_unknown_year_last() {
    let catalog = MemoryCatalog::new();
    let artist = catalog.add_artist("Solo");
    let undated = catalog.add_album(artist, "Bootleg", None);
    let dated = catalog.add_album(artist, "Debut", Some(2005));
    catalog.add_track("B1", artist, undated, 1, PathBuf::from("/m/b1.mp3"), None);
    catalog.add_track("D1", artist, dated, 1, PathBuf::from("/m/d1.mp3"), None);

    let songs = catalog.find_artist_songs(artist);
    let titles: Vec<&str> = songs.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["D1", "B1"]);
}

#[test]
fn artists_and_albums_are_deduplicated_case_insensitively() {
    let catalog = MemoryCatalog::new();
    let a1 = catalog.add_artist("The Band");
    let a2 = catalog.add_artist("the band");
    assert_eq!(a1, a2);

    let al1 = catalog.add_album(a1, "Record", None);
    let al2 = catalog.add_album(a1, "RECORD", Some(1984));
    assert_eq!(al1, al2);
    // The later insert back-filled the year.
    assert_eq!(catalog.albums()[0].year, Some(1984));
}

#[test]
fn persist_durations_merges_by_track_id() {
    let catalog = MemoryCatalog::new();
    let artist = catalog.add_artist("A");
    let album = catalog.add_album(artist, "B", None);
    let id = catalog.add_track("T", artist, album, 1, PathBuf::from("/m/t.mp3"), None);

    let mut enriched = catalog.track(id).unwrap();
    enriched.duration = Some(Duration::from_secs(181));

    // Unknown ids and duration-less entries are skipped, not errors.
    let mut ghost = enriched.clone();
    ghost.id = 999;
    let mut undetermined = enriched.clone();
    undetermined.duration = None;

    catalog
        .persist_durations(&[enriched, ghost, undetermined])
        .unwrap();

    assert_eq!(
        catalog.track(id).unwrap().duration,
        Some(Duration::from_secs(181))
    );
}

#[test]
fn scan_filters_non_audio_and_assigns_stable_ids() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("a.ogg"), b"not a real ogg").unwrap();
    fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

    let catalog = scan(dir.path(), &LibrarySettings::default());
    let tracks = catalog.tracks();

    // Unreadable tags fall back to the file stem; ids follow sorted path order.
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].title, "a");
    assert_eq!(tracks[0].id, 1);
    assert_eq!(tracks[1].title, "b");
    assert_eq!(tracks[1].id, 2);

    // Everything untagged lands in the unknown buckets.
    assert_eq!(catalog.artists().len(), 1);
    assert_eq!(catalog.albums().len(), 1);
}

#[test]
fn scan_respects_include_hidden_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
    fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

    let settings = LibrarySettings {
        include_hidden: false,
        ..LibrarySettings::default()
    };
    let catalog = scan(dir.path(), &settings);
    assert_eq!(catalog.tracks().len(), 1);
    assert_eq!(catalog.tracks()[0].title, "visible");
}

#[test]
fn scan_respects_recursive_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.mp3"), b"not real").unwrap();

    let settings = LibrarySettings {
        recursive: false,
        ..LibrarySettings::default()
    };
    let catalog = scan(dir.path(), &settings);
    assert_eq!(catalog.tracks().len(), 1);
    assert_eq!(catalog.tracks()[0].title, "root");
}
