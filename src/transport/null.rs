use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::catalog::Track;
use crate::error::Result;
use crate::transport::{Transport, TransportHandle};

/// A silent transport for headless hosts and tests.
///
/// Handles report the track's cataloged duration, record volume/position/state
/// changes, and can be finished manually to simulate a track playing to its
/// end.
#[derive(Default)]
pub struct NullTransport {
    last: Mutex<Option<Arc<NullHandle>>>,
}

impl NullTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// The handle created by the most recent `load`, if any.
    pub fn last_handle(&self) -> Option<Arc<NullHandle>> {
        self.last.lock().unwrap().clone()
    }
}

impl Transport for NullTransport {
    fn load(&self, track: &Track) -> Result<Arc<dyn TransportHandle>> {
        let handle = Arc::new(NullHandle {
            duration: track.duration,
            state: Mutex::new(NullState::default()),
        });
        *self.last.lock().unwrap() = Some(handle.clone());
        Ok(handle)
    }
}

#[derive(Debug, Default)]
struct NullState {
    position: Duration,
    playing: bool,
    ended: bool,
    stopped: bool,
    volume: f32,
}

#[derive(Debug)]
pub struct NullHandle {
    duration: Option<Duration>,
    state: Mutex<NullState>,
}

impl NullHandle {
    /// Simulate the track reaching its natural end.
    pub fn finish(&self) {
        let mut state = self.state.lock().unwrap();
        if !state.stopped {
            state.ended = true;
            state.playing = false;
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state.lock().unwrap().playing
    }

    pub fn is_stopped(&self) -> bool {
        self.state.lock().unwrap().stopped
    }

    pub fn volume(&self) -> f32 {
        self.state.lock().unwrap().volume
    }
}

impl TransportHandle for NullHandle {
    fn play(&self) {
        self.state.lock().unwrap().playing = true;
    }

    fn pause(&self) {
        self.state.lock().unwrap().playing = false;
    }

    fn stop(&self) {
        let mut state = self.state.lock().unwrap();
        state.playing = false;
        state.stopped = true;
    }

    fn seek(&self, to: Duration) -> Result<()> {
        self.state.lock().unwrap().position = to;
        Ok(())
    }

    fn set_volume(&self, volume: f32) {
        self.state.lock().unwrap().volume = volume;
    }

    fn position(&self) -> Duration {
        self.state.lock().unwrap().position
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn ended(&self) -> bool {
        self.state.lock().unwrap().ended
    }
}
