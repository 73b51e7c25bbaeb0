//! Small types shared by the playback engine and media hosts.

use std::time::Duration;

use crate::config::PlayModeSetting;
use crate::library::Track;

/// Shuffle and repeat-one as one value, so both can never be on at once.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum PlayMode {
    /// Advance sequentially, wrapping at both ends.
    #[default]
    None,
    /// Advance to a random other track.
    Shuffle,
    /// Restart the active track instead of advancing.
    RepeatOne,
}

impl PlayMode {
    pub fn is_shuffle(self) -> bool {
        self == Self::Shuffle
    }

    pub fn is_repeat_one(self) -> bool {
        self == Self::RepeatOne
    }
}

impl From<PlayModeSetting> for PlayMode {
    fn from(s: PlayModeSetting) -> Self {
        match s {
            PlayModeSetting::None => Self::None,
            PlayModeSetting::Shuffle => Self::Shuffle,
            PlayModeSetting::RepeatOne => Self::RepeatOne,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineState {
    /// No playlist, or an empty one.
    Empty,
    /// Playlist loaded, paused.
    Ready,
    Playing,
}

/// Identifies one source load on the media resource.
///
/// Every source switch issues a new binding; events tagged with an older one
/// belong to a superseded source.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Binding(pub u64);

impl Binding {
    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MediaEventKind {
    /// The source is decodable and reports this total length.
    MetadataLoaded(Duration),
    /// Current playback position.
    TimeUpdate(Duration),
    /// The source played to its end.
    Ended,
    /// The source could not be opened or decoded.
    Failed(String),
}

/// A notification from the media resource.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEvent {
    pub binding: Binding,
    pub kind: MediaEventKind,
}

impl MediaEvent {
    pub fn new(binding: Binding, kind: MediaEventKind) -> Self {
        Self { binding, kind }
    }
}

/// Read-only view of the engine for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub state: EngineState,
    pub index: Option<usize>,
    pub track: Option<Track>,
    pub playlist_name: String,
    pub playlist_len: usize,
    pub mode: PlayMode,
    pub elapsed: Duration,
    pub duration: Option<Duration>,
}

impl PlaybackSnapshot {
    /// Fraction of the track played, in `[0, 1]`; zero while the duration is unknown.
    pub fn progress_ratio(&self) -> f64 {
        match self.duration {
            Some(d) if !d.is_zero() => (self.elapsed.as_secs_f64() / d.as_secs_f64()).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == EngineState::Playing
    }
}
