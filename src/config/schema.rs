use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::library::Track;

use super::defaults::{default_moods, default_playlists};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/frvttae/config.toml` or `~/.config/frvttae/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `FRVTTAE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub library: LibrarySettings,
    pub catalog: CatalogSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Mode the player starts in.
    pub mode: PlayModeSetting,

    /// Fade-out length when quitting while a track plays. `0` stops at once.
    pub quit_fade_out_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            mode: PlayModeSetting::None,
            quit_fade_out_ms: 500,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayModeSetting {
    #[default]
    #[serde(alias = "off", alias = "normal", alias = "sequential")]
    None,
    #[serde(alias = "random")]
    Shuffle,
    #[serde(
        alias = "repeatone",
        alias = "repeat_one",
        alias = "loop-one",
        alias = "loop_one"
    )]
    RepeatOne,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_seconds: 5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Whether the cursor starts in "follow playback" mode.
    pub follow_playback: bool,

    /// The text rendered inside the top header box.
    pub header_text: String,

    /// Which track fields to show in the "now playing" line, and in what order.
    ///
    /// Example: ["title", "artist"]
    pub now_playing_track_fields: Vec<TrackDisplayField>,

    /// Separator used to join `now_playing_track_fields`.
    pub now_playing_track_separator: String,

    /// Which time fields to show next to the progress bar, and in what order.
    pub now_playing_time_fields: Vec<TimeField>,

    /// Separator used to join `now_playing_time_fields`.
    pub now_playing_time_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            follow_playback: true,
            header_text: " ~ frvttae ~ ".to_string(),
            now_playing_track_fields: vec![TrackDisplayField::Title, TrackDisplayField::Artist],
            now_playing_track_separator: " - ".to_string(),
            now_playing_time_fields: vec![TimeField::Elapsed, TimeField::Total],
            now_playing_time_separator: " / ".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeField {
    Elapsed,
    Total,
    Remaining,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    Title,
    Artist,
    Source,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory that relative track sources are resolved against.
    pub music_root: PathBuf,
    /// Directory scanned when importing local uploads (`u`).
    pub uploads_dir: Option<PathBuf>,
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
    /// Artist label given to uploaded tracks.
    pub local_artist: String,
    /// Catalog id of the playlist that collects uploads.
    pub local_playlist: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            music_root: PathBuf::from("."),
            uploads_dir: None,
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
            local_artist: "Local Frvttae".to_string(),
            local_playlist: "personal".to_string(),
        }
    }
}

/// Static playlist and mood tables.
///
/// Supplying `[catalog.playlists.*]` or `[catalog.moods]` in the config file
/// replaces the corresponding built-in table as a whole.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub playlists: BTreeMap<String, PlaylistEntry>,
    pub moods: BTreeMap<String, Vec<Track>>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            playlists: default_playlists(),
            moods: default_moods(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlaylistEntry {
    /// Display title shown in the playlist picker.
    pub title: String,
    pub artist: String,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive, overridden by `RUST_LOG` when set.
    pub level: String,
    /// Log file. Defaults to `frvttae.log` next to the state file.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
