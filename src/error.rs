//! Error types for the sequencing core.

use thiserror::Error;

/// Errors surfaced by playlist/player operations.
///
/// Out-of-range navigation is deliberately *not* represented here: walking past
/// the end of a playlist or selecting a bad index is a no-op query result, not
/// a failure.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// A caller-supplied value was rejected (e.g. an unknown repeat mode).
    /// State is left unchanged.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The underlying audio engine could not load, decode or control a track.
    #[error("transport error: {0}")]
    Transport(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for playlist/player operations.
pub type Result<T> = std::result::Result<T, PlayerError>;
