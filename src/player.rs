//! Player: binds playlist transitions to playback-session lifecycle.

mod model;

pub use model::Player;
