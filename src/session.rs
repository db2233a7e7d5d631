//! Playback session: live transport state for exactly one loaded track.

mod model;

pub use model::{DURATION_PLACEHOLDER, PlaybackSession, TimeParts};

#[cfg(test)]
mod tests;
