//! attacca - playlist and playback sequencing for music library frontends.
//!
//! The crate is the "what plays next" core of a player: an ordered playlist
//! with a cursor and repeat modes, a playback session that tracks position
//! and end-of-track, and a [`Player`] that ties the two together (automatic
//! advance, one-shot redirects after removals, volume and mute, off-thread
//! duration enrichment). Audio output sits behind the [`transport::Transport`]
//! seam; [`transport::RodioTransport`] is the real engine and
//! [`transport::NullTransport`] a silent one for headless hosts and tests.
//!
//! A minimal host looks like:
//!
//! ```no_run
//! use attacca::config::Settings;
//! use attacca::player::Player;
//! use attacca::transport::RodioTransport;
//!
//! # fn main() -> attacca::error::Result<()> {
//! let settings = Settings::load().unwrap_or_default();
//! let transport = RodioTransport::new()?;
//! let mut player = Player::new(Box::new(transport), &settings);
//!
//! let catalog = attacca::catalog::scan(std::path::Path::new("/music"), &settings.library);
//! player.play_songs(catalog.tracks())?;
//! loop {
//!     player.poll();
//!     std::thread::sleep(std::time::Duration::from_millis(50));
//! }
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod metadata;
pub mod player;
pub mod playlist;
pub mod session;
pub mod transport;

pub use catalog::{Album, Artist, Catalog, MemoryCatalog, Track};
pub use config::Settings;
pub use error::{PlayerError, Result};
pub use metadata::{DurationProber, LoftyProber};
pub use player::Player;
pub use playlist::{Playlist, RepeatMode};
pub use session::{PlaybackSession, TimeParts};
pub use transport::{NullTransport, RodioTransport, Transport, TransportHandle};
