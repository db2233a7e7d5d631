use serde::Deserialize;

use crate::playlist::RepeatMode;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/attacca/config.toml` or
/// `~/.config/attacca/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ATTACCA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub session: SessionSettings,
    pub library: LibrarySettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Initial volume, 0.0 to 1.0.
    pub volume: f32,
    /// Initial repeat mode.
    pub repeat: RepeatSetting,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            volume: 0.3,
            repeat: RepeatSetting::Off,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Cadence of the position sampler while a track plays (milliseconds).
    pub position_tick_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            position_tick_ms: 100,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepeatSetting {
    #[default]
    Off,
    #[serde(alias = "repeatall", alias = "repeat_all", alias = "repeatAll")]
    RepeatAll,
    #[serde(alias = "repeatone", alias = "repeat_one", alias = "repeatOne")]
    RepeatOne,
}

impl From<RepeatSetting> for RepeatMode {
    fn from(setting: RepeatSetting) -> Self {
        match setting {
            RepeatSetting::Off => RepeatMode::Off,
            RepeatSetting::RepeatAll => RepeatMode::RepeatAll,
            RepeatSetting::RepeatOne => RepeatMode::RepeatOne,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
        }
    }
}
