//! Transport seam: the opaque single-track audio engine the session drives.
//!
//! The sequencing core only ever talks to these two traits. `RodioTransport`
//! is the real audio output; `NullTransport` is a silent engine for headless
//! hosts and tests.

mod null;
mod sink;

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::Track;
use crate::error::Result;

pub use null::{NullHandle, NullTransport};
pub use sink::RodioTransport;

/// Creates one playback handle per loaded track.
pub trait Transport {
    fn load(&self, track: &Track) -> Result<Arc<dyn TransportHandle>>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn load(&self, track: &Track) -> Result<Arc<dyn TransportHandle>> {
        (**self).load(track)
    }
}

/// Transport state for exactly one loaded track.
///
/// Handles are shared with the session's position sampler thread, hence the
/// `Send + Sync` bound.
pub trait TransportHandle: Send + Sync {
    fn play(&self);

    fn pause(&self);

    /// Halt playback and release the underlying resource. The handle is dead
    /// afterwards; `ended` is unspecified once stopped.
    fn stop(&self);

    fn seek(&self, to: Duration) -> Result<()>;

    fn set_volume(&self, volume: f32);

    /// Current playback position.
    fn position(&self) -> Duration;

    /// Total duration, when the engine knows it.
    fn duration(&self) -> Option<Duration>;

    /// True once the track has played to its natural end.
    fn ended(&self) -> bool;
}
