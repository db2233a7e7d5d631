//! Playlist model: ordered tracks, a play cursor and repeat-aware navigation.
//!
//! Pure data + transition logic; the playlist knows nothing about transports
//! or audio output.

mod model;

pub use model::{Playlist, RepeatMode};
