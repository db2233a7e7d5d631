use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use crate::catalog::Track;
use crate::transport::NullTransport;

use super::*;

const TICK: Duration = Duration::from_millis(5);

fn track(duration: Option<Duration>) -> Track {
    Track {
        id: 1,
        title: "T".into(),
        artist_id: 1,
        album_id: 1,
        track_nr: 1,
        path: PathBuf::from("/m/t.mp3"),
        duration,
    }
}

fn wait_for(mut cond: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if cond() {
            return true;
        }
        thread::sleep(TICK);
    }
    false
}

#[test]
fn load_auto_plays_at_the_given_volume() {
    let transport = NullTransport::new();
    let session =
        PlaybackSession::load(&transport, track(Some(Duration::from_secs(100))), 0.25, TICK)
            .unwrap();

    assert!(session.is_playing());
    let handle = transport.last_handle().unwrap();
    assert!(handle.is_playing());
    assert_eq!(handle.volume(), 0.25);
}

#[test]
fn toggle_pause_flips_playing_state() {
    let transport = NullTransport::new();
    let session = PlaybackSession::load(&transport, track(None), 1.0, TICK).unwrap();

    assert!(!session.toggle_pause());
    assert!(!session.is_playing());
    assert!(!transport.last_handle().unwrap().is_playing());

    assert!(session.toggle_pause());
    assert!(session.is_playing());
}

#[test]
fn seek_clamps_to_duration_and_updates_position_immediately() {
    let transport = NullTransport::new();
    let session =
        PlaybackSession::load(&transport, track(Some(Duration::from_secs(100))), 1.0, TICK)
            .unwrap();
    session.pause();

    session.seek_to(Duration::from_secs(42)).unwrap();
    assert_eq!(session.position(), Duration::from_secs(42));

    session.seek_to(Duration::from_secs(500)).unwrap();
    assert_eq!(session.position(), Duration::from_secs(100));
}

#[test]
fn unknown_duration_falls_back_to_the_placeholder() {
    let transport = NullTransport::new();
    let session = PlaybackSession::load(&transport, track(None), 1.0, TICK).unwrap();

    assert_eq!(session.duration(), DURATION_PLACEHOLDER);
    // Guarded against division by zero.
    assert_eq!(session.position_percent(), 0.0);
}

#[test]
fn position_percent_is_derived_from_position_and_duration() {
    let transport = NullTransport::new();
    let session =
        PlaybackSession::load(&transport, track(Some(Duration::from_secs(200))), 1.0, TICK)
            .unwrap();
    session.pause();

    session.seek_to(Duration::from_secs(50)).unwrap();
    assert_eq!(session.position_percent(), 25.0);
}

#[test]
fn time_parts_format_as_minutes_and_padded_seconds() {
    assert_eq!(
        TimeParts::from_duration(Duration::from_secs(125)).to_string(),
        "2:05"
    );
    assert_eq!(
        TimeParts::from_duration(Duration::from_secs(59)).to_string(),
        "0:59"
    );
    assert_eq!(
        TimeParts::from_duration(Duration::from_secs(600)).to_string(),
        "10:00"
    );

    let transport = NullTransport::new();
    let session =
        PlaybackSession::load(&transport, track(Some(Duration::from_secs(185))), 1.0, TICK)
            .unwrap();
    assert_eq!(
        session.duration_min_sec(),
        TimeParts {
            minutes: 3,
            seconds: 5
        }
    );
}

#[test]
fn take_ended_fires_exactly_once_per_natural_end() {
    let transport = NullTransport::new();
    let mut session =
        PlaybackSession::load(&transport, track(Some(Duration::from_secs(1))), 1.0, TICK).unwrap();

    transport.last_handle().unwrap().finish();
    assert!(wait_for(|| !session.is_playing()));

    assert!(session.take_ended());
    assert!(!session.take_ended());
}

#[test]
fn stopped_session_never_reports_ended() {
    let transport = NullTransport::new();
    let mut session = PlaybackSession::load(&transport, track(None), 1.0, TICK).unwrap();

    session.stop();
    assert!(!session.is_playing());
    assert!(transport.last_handle().unwrap().is_stopped());

    thread::sleep(TICK * 3);
    assert!(!session.take_ended());
}
