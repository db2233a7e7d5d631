use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::catalog::Track;
use crate::error::Result;
use crate::transport::{Transport, TransportHandle};

/// Duration placeholder used until the transport or enrichment reports a real
/// one. Non-zero so position-percentage math never divides by zero.
pub const DURATION_PLACEHOLDER: Duration = Duration::from_millis(10);

/// Minute:second breakdown of a position or duration, for display.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimeParts {
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeParts {
    pub fn from_duration(d: Duration) -> Self {
        let total = d.as_secs();
        Self {
            minutes: total / 60,
            seconds: total % 60,
        }
    }
}

impl fmt::Display for TimeParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes, self.seconds)
    }
}

#[derive(Debug)]
struct SessionState {
    position: Duration,
    duration: Duration,
    playing: bool,
    ended: bool,
}

/// Transport state bound to exactly one loaded track.
///
/// A sampler thread refreshes position/duration from the transport at a fixed
/// cadence while playing and latches `ended` when the track plays out. The
/// sampler is stopped and joined when the session stops or is dropped, so a
/// replaced session can never be sampled into by a stale timer.
pub struct PlaybackSession {
    track: Track,
    handle: Arc<dyn TransportHandle>,
    state: Arc<Mutex<SessionState>>,
    stop_flag: Arc<AtomicBool>,
    sampler: Option<JoinHandle<()>>,
    ended_handled: bool,
}

impl PlaybackSession {
    /// Load `track` through `transport` and start playing it at `volume`.
    pub fn load(
        transport: &dyn Transport,
        track: Track,
        volume: f32,
        tick: Duration,
    ) -> Result<Self> {
        let handle = transport.load(&track)?;
        handle.set_volume(volume);

        let duration = handle
            .duration()
            .or(track.duration)
            .unwrap_or(DURATION_PLACEHOLDER);

        let state = Arc::new(Mutex::new(SessionState {
            position: Duration::ZERO,
            duration,
            playing: true,
            ended: false,
        }));

        // Play immediately when a new track is selected.
        handle.play();

        let stop_flag = Arc::new(AtomicBool::new(false));
        let sampler = spawn_sampler(handle.clone(), state.clone(), stop_flag.clone(), tick);

        Ok(Self {
            track,
            handle,
            state,
            stop_flag,
            sampler: Some(sampler),
            ended_handled: false,
        })
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn play(&self) {
        self.handle.play();
        self.state.lock().unwrap().playing = true;
    }

    pub fn pause(&self) {
        self.handle.pause();
        self.state.lock().unwrap().playing = false;
    }

    /// Returns whether the session is playing afterwards.
    pub fn toggle_pause(&self) -> bool {
        if self.is_playing() {
            self.pause();
            false
        } else {
            self.play();
            true
        }
    }

    /// Halt playback and release the transport. The sampler is stopped first,
    /// so a session stopped before its natural end never reports `ended`.
    pub fn stop(&mut self) {
        self.halt_sampler();
        self.handle.stop();
        self.state.lock().unwrap().playing = false;
    }

    /// Seek to an absolute position, clamped to `[0, duration]`. The exposed
    /// position updates immediately rather than on the next sample tick.
    pub fn seek_to(&self, to: Duration) -> Result<()> {
        let clamped = to.min(self.duration());
        self.handle.seek(clamped)?;
        self.state.lock().unwrap().position = clamped;
        Ok(())
    }

    pub fn set_volume(&self, volume: f32) {
        self.handle.set_volume(volume);
    }

    pub fn is_playing(&self) -> bool {
        self.state.lock().unwrap().playing
    }

    pub fn position(&self) -> Duration {
        self.state.lock().unwrap().position
    }

    pub fn duration(&self) -> Duration {
        self.state.lock().unwrap().duration
    }

    /// Edge-triggered end-of-track observation: true at most once, after the
    /// track played to its natural end.
    pub fn take_ended(&mut self) -> bool {
        let ended = self.state.lock().unwrap().ended;
        if ended && !self.ended_handled {
            self.ended_handled = true;
            true
        } else {
            false
        }
    }

    pub fn position_percent(&self) -> f64 {
        let state = self.state.lock().unwrap();
        // `duration` is never zero thanks to the placeholder.
        state.position.as_secs_f64() / state.duration.as_secs_f64() * 100.0
    }

    pub fn position_min_sec(&self) -> TimeParts {
        TimeParts::from_duration(self.position())
    }

    pub fn duration_min_sec(&self) -> TimeParts {
        TimeParts::from_duration(self.duration())
    }

    fn halt_sampler(&mut self) {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(sampler) = self.sampler.take() {
            let _ = sampler.join();
        }
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.stop();
    }
}

fn spawn_sampler(
    handle: Arc<dyn TransportHandle>,
    state: Arc<Mutex<SessionState>>,
    stop_flag: Arc<AtomicBool>,
    tick: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        loop {
            thread::sleep(tick);
            if stop_flag.load(Ordering::SeqCst) {
                break;
            }
            let mut state = state.lock().unwrap();
            if !state.playing {
                continue;
            }
            state.position = handle.position();
            if let Some(d) = handle.duration() {
                state.duration = d;
            }
            if handle.ended() {
                state.ended = true;
                state.playing = false;
            }
        }
    })
}
