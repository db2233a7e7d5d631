//! Duration enrichment: annotate tracks whose length the scanner could not
//! determine up front.

use lofty::AudioFile;

use crate::catalog::Track;

/// Given a batch of tracks missing their duration, return the same tracks
/// annotated with it where determinable. Latency is unbounded; the player
/// calls this off-thread and never blocks playback on it.
pub trait DurationProber: Send + Sync {
    fn probe(&self, tracks: &[Track]) -> Vec<Track>;
}

/// Probes durations from audio properties via lofty.
#[derive(Debug, Default)]
pub struct LoftyProber;

impl DurationProber for LoftyProber {
    fn probe(&self, tracks: &[Track]) -> Vec<Track> {
        tracks
            .iter()
            .map(|track| {
                let mut track = track.clone();
                if track.duration.is_none() {
                    if let Ok(tagged) = lofty::read_from_path(&track.path) {
                        track.duration = Some(tagged.properties().duration());
                    }
                }
                track
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn unreadable_files_keep_an_unknown_duration() {
        let track = Track {
            id: 1,
            title: "T".into(),
            artist_id: 1,
            album_id: 1,
            track_nr: 1,
            path: PathBuf::from("/nonexistent/t.mp3"),
            duration: None,
        };

        let probed = LoftyProber.probe(&[track.clone()]);
        assert_eq!(probed.len(), 1);
        assert_eq!(probed[0].id, track.id);
        assert_eq!(probed[0].duration, None);
    }

    #[test]
    fn already_known_durations_are_left_alone() {
        let track = Track {
            id: 2,
            title: "T".into(),
            artist_id: 1,
            album_id: 1,
            track_nr: 1,
            path: PathBuf::from("/nonexistent/t.mp3"),
            duration: Some(std::time::Duration::from_secs(7)),
        };

        let probed = LoftyProber.probe(&[track]);
        assert_eq!(probed[0].duration, Some(std::time::Duration::from_secs(7)));
    }
}
