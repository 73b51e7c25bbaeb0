//! The playback state machine.
//!
//! `PlaybackEngine` owns the active playlist, the current index, play/pause,
//! the play mode and elapsed/duration. It is the only writer of the media
//! resource's source, position and loop flag. User commands run
//! synchronously; media notifications arrive through `handle_media_event`
//! and are applied atomically, after a binding check that discards events
//! from superseded sources.
//!
//! Every transport command is a no-op while the playlist is empty, and
//! invalid selections are ignored rather than reported.

use std::time::Duration;

use tracing::{debug, warn};

use crate::library::{Playlist, Track};

use super::media::MediaResource;
use super::picker::{IndexPicker, ThreadPicker};
use super::types::{
    Binding, Direction, EngineState, MediaEvent, MediaEventKind, PlayMode, PlaybackSnapshot,
};

pub struct PlaybackEngine<M: MediaResource, P: IndexPicker = ThreadPicker> {
    media: M,
    picker: P,
    playlist: Playlist,
    index: usize,
    playing: bool,
    mode: PlayMode,
    elapsed: Duration,
    duration: Option<Duration>,
    binding: Binding,
}

impl<M: MediaResource> PlaybackEngine<M> {
    pub fn new(media: M) -> Self {
        Self::with_picker(media, ThreadPicker)
    }
}

impl<M: MediaResource, P: IndexPicker> PlaybackEngine<M, P> {
    /// An engine in the `Empty` state.
    pub fn with_picker(media: M, picker: P) -> Self {
        Self {
            media,
            picker,
            playlist: Playlist::empty(),
            index: 0,
            playing: false,
            mode: PlayMode::None,
            elapsed: Duration::ZERO,
            duration: None,
            binding: Binding::default(),
        }
    }

    pub fn state(&self) -> EngineState {
        if self.playlist.is_empty() {
            EngineState::Empty
        } else if self.playing {
            EngineState::Playing
        } else {
            EngineState::Ready
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Index of the active track; `None` while the playlist is empty.
    pub fn current_index(&self) -> Option<usize> {
        (!self.playlist.is_empty()).then_some(self.index)
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.get(self.index)
    }

    #[cfg(test)]
    pub(crate) fn is_playing(&self) -> bool {
        self.state() == EngineState::Playing
    }

    #[cfg(test)]
    pub(crate) fn mode(&self) -> PlayMode {
        self.mode
    }

    #[cfg(test)]
    pub(crate) fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Track length, once the media resource has reported it.
    #[cfg(test)]
    pub(crate) fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Binding of the source currently on the media resource.
    #[cfg(test)]
    pub(crate) fn binding(&self) -> Binding {
        self.binding
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            state: self.state(),
            index: self.current_index(),
            track: self.current_track().cloned(),
            playlist_name: self.playlist.name.clone(),
            playlist_len: self.playlist.len(),
            mode: self.mode,
            elapsed: self.elapsed,
            duration: self.duration,
        }
    }

    /// Replace the active playlist. The index resets to 0 and playback is
    /// left paused; an empty list puts the engine in `Empty`.
    pub fn load_playlist(&mut self, playlist: Playlist) {
        debug!(name = %playlist.name, len = playlist.len(), "load playlist");
        self.playlist = playlist;
        self.index = 0;
        self.playing = false;

        if self.playlist.is_empty() {
            // Still bump the binding so in-flight events for the old source go stale.
            self.binding = self.binding.next();
            self.elapsed = Duration::ZERO;
            self.duration = None;
            self.media.unload();
        } else {
            self.bind_current();
        }
    }

    /// Load `playlist` and start playing its first track.
    pub fn play_playlist(&mut self, playlist: Playlist) {
        self.load_playlist(playlist);
        if !self.playlist.is_empty() {
            self.start();
        }
    }

    /// Append tracks to the active playlist without moving the current index.
    pub fn append_tracks(&mut self, tracks: Vec<Track>) {
        if tracks.is_empty() {
            return;
        }
        let was_empty = self.playlist.is_empty();
        self.playlist.tracks.extend(tracks);
        if was_empty {
            self.index = 0;
            self.bind_current();
        }
    }

    pub fn toggle_play_pause(&mut self) {
        match self.state() {
            EngineState::Empty => {}
            EngineState::Ready => self.start(),
            EngineState::Playing => {
                self.media.pause();
                self.playing = false;
            }
        }
    }

    /// Make `index` the active track and start playing it.
    pub fn select_track(&mut self, index: usize) {
        if index >= self.playlist.len() {
            debug!(index, len = self.playlist.len(), "ignoring out-of-range selection");
            return;
        }
        self.index = index;
        self.bind_current();
        self.start();
    }

    pub fn advance(&mut self, direction: Direction) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }

        let next = match self.mode {
            PlayMode::RepeatOne => {
                self.restart_current();
                return;
            }
            PlayMode::Shuffle => self.picker.pick(len, self.index),
            PlayMode::None => match direction {
                Direction::Next => (self.index + 1) % len,
                Direction::Previous => (self.index + len - 1) % len,
            },
        };

        let was_playing = self.playing;
        self.index = next;
        self.bind_current();
        if was_playing {
            self.start();
        }
    }

    /// Jump to `seconds` into the active track.
    ///
    /// Targets outside `[0, duration]` are clamped. Non-finite targets and
    /// seeks before the duration is known are refused.
    pub fn seek(&mut self, seconds: f64) {
        if self.playlist.is_empty() || !seconds.is_finite() {
            return;
        }
        let Some(duration) = self.duration else {
            debug!("ignoring seek before metadata");
            return;
        };
        let target = Duration::from_secs_f64(seconds.clamp(0.0, duration.as_secs_f64()));
        self.media.seek(target);
        self.elapsed = target;
    }

    /// Seek relative to the current position.
    pub fn seek_by(&mut self, delta_seconds: f64) {
        self.seek(self.elapsed.as_secs_f64() + delta_seconds);
    }

    pub fn set_shuffle(&mut self, on: bool) {
        if on {
            self.set_mode(PlayMode::Shuffle);
        } else if self.mode.is_shuffle() {
            self.set_mode(PlayMode::None);
        }
    }

    pub fn set_repeat_one(&mut self, on: bool) {
        if on {
            self.set_mode(PlayMode::RepeatOne);
        } else if self.mode.is_repeat_one() {
            self.set_mode(PlayMode::None);
        }
    }

    pub fn toggle_shuffle(&mut self) {
        self.set_shuffle(!self.mode.is_shuffle());
    }

    pub fn toggle_repeat_one(&mut self) {
        self.set_repeat_one(!self.mode.is_repeat_one());
    }

    pub fn set_mode(&mut self, mode: PlayMode) {
        self.mode = mode;
        self.media.set_loop(mode.is_repeat_one());
    }

    /// Apply a media notification, unless it belongs to a superseded source.
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        if event.binding != self.binding {
            debug!(
                stale = event.binding.0,
                current = self.binding.0,
                "dropping stale media event"
            );
            return;
        }
        match event.kind {
            MediaEventKind::MetadataLoaded(d) => self.media_metadata_loaded(d),
            MediaEventKind::TimeUpdate(p) => self.media_time_update(p),
            MediaEventKind::Ended => self.media_ended(),
            MediaEventKind::Failed(reason) => self.media_failed(&reason),
        }
    }

    fn media_ended(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        if self.mode.is_repeat_one() {
            self.restart_current();
        } else {
            self.advance(Direction::Next);
        }
    }

    fn media_metadata_loaded(&mut self, duration: Duration) {
        self.duration = Some(duration);
        self.elapsed = self.elapsed.min(duration);
    }

    fn media_time_update(&mut self, position: Duration) {
        self.elapsed = match self.duration {
            Some(d) => position.min(d),
            None => position,
        };
    }

    fn media_failed(&mut self, reason: &str) {
        warn!(
            source = self.current_track().map(|t| t.source.as_str()).unwrap_or(""),
            reason, "media failed, pausing"
        );
        if self.playing {
            self.media.pause();
            self.playing = false;
        }
    }

    /// Bind the active track's source under a fresh binding.
    fn bind_current(&mut self) {
        let Some(track) = self.playlist.get(self.index) else {
            return;
        };
        self.binding = self.binding.next();
        self.elapsed = Duration::ZERO;
        self.duration = None;
        debug!(index = self.index, source = %track.source, binding = self.binding.0, "bind source");
        self.media.load(&track.source, self.binding);
    }

    fn restart_current(&mut self) {
        self.media.seek(Duration::ZERO);
        self.elapsed = Duration::ZERO;
        self.start();
    }

    fn start(&mut self) {
        self.media.play();
        self.playing = true;
    }

    #[cfg(test)]
    pub(crate) fn media(&self) -> &M {
        &self.media
    }

    /// The media resource, for host-level control such as shutdown.
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }
}
