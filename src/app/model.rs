//! Application model: the engine plus what the screen needs around it.
//!
//! `App` owns the playback engine, the catalog, the mood table and the
//! cursor/picker state of the terminal UI. The runtime turns key presses into
//! calls on `App`; the UI only reads from it.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::library::{Catalog, CatalogEntry};
use crate::mood::MoodRecommender;
use crate::player::{
    Direction, IndexPicker, MediaEvent, MediaResource, PlaybackEngine, ThreadPicker,
};
use crate::store::SelectionStore;

/// Which list a popup picker shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PickerKind {
    Playlists,
    Moods,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Picker {
    pub kind: PickerKind,
    pub selected: usize,
}

/// The main application model.
pub struct App<M: MediaResource, P: IndexPicker = ThreadPicker> {
    pub engine: PlaybackEngine<M, P>,
    catalog: Catalog,
    moods: MoodRecommender,
    store: Option<SelectionStore>,

    /// Cursor row in the track list.
    pub selected: usize,
    /// Cursor follows the active track until the user moves it.
    pub follow_playback: bool,
    pub picker: Option<Picker>,
    /// One-line message shown under the track list.
    pub status: Option<String>,
}

impl<M: MediaResource, P: IndexPicker> App<M, P> {
    pub fn new(engine: PlaybackEngine<M, P>, catalog: Catalog, moods: MoodRecommender) -> Self {
        Self {
            engine,
            catalog,
            moods,
            store: None,
            selected: 0,
            follow_playback: true,
            picker: None,
            status: None,
        }
    }

    /// Persist catalog playlist switches to `store`.
    pub fn with_store(mut self, store: SelectionStore) -> Self {
        self.store = Some(store);
        self
    }

    #[cfg(test)]
    pub(crate) fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Number of rows in the track list.
    pub fn track_count(&self) -> usize {
        self.engine.playlist().len()
    }

    /// Load catalog playlist `id`, starting playback when `autoplay`.
    ///
    /// Returns `false` for an unknown id. The id is written to the
    /// selection store.
    pub fn open_playlist(&mut self, id: &str, autoplay: bool) -> bool {
        let Some(playlist) = self.catalog.get_playlist(id) else {
            debug!(id, "unknown playlist");
            return false;
        };
        info!(id, tracks = playlist.len(), autoplay, "opening playlist");
        self.status = Some(format!("Playlist: {}", playlist.name));
        if autoplay {
            self.engine.play_playlist(playlist);
        } else {
            self.engine.load_playlist(playlist);
        }
        self.selected = 0;
        self.follow_playback = true;
        self.persist(id);
        true
    }

    /// Play the picks for `mood`. Unknown moods are ignored.
    pub fn open_mood(&mut self, mood: &str) -> bool {
        let Some(playlist) = self.moods.recommend(mood) else {
            debug!(mood, "unknown mood");
            return false;
        };
        info!(mood, tracks = playlist.len(), "playing mood");
        self.status = Some(format!("Mood: {mood}"));
        self.engine.play_playlist(playlist);
        self.selected = 0;
        self.follow_playback = true;
        true
    }

    /// Add `files` to the local uploads playlist and to the current list.
    ///
    /// Returns how many tracks were added.
    pub fn import_files<F: AsRef<Path>>(&mut self, files: &[F]) -> usize {
        let added = self.catalog.append_local_tracks(files);
        let n = added.len();
        if n > 0 {
            self.engine.append_tracks(added);
        }
        self.status = Some(match n {
            0 => "No files to import".to_string(),
            1 => "Imported 1 file".to_string(),
            n => format!("Imported {n} files"),
        });
        n
    }

    fn persist(&self, id: &str) {
        if let Some(store) = self.store.as_ref() {
            if let Err(e) = store.save(id) {
                warn!(error = %e, "cannot save last playlist");
            }
        }
    }

    pub fn on_media_event(&mut self, event: MediaEvent) {
        self.engine.handle_media_event(event);
        self.sync_follow();
    }

    /// Move the cursor onto the active track when following playback.
    pub fn sync_follow(&mut self) {
        if !self.follow_playback {
            return;
        }
        if let Some(idx) = self.engine.current_index() {
            self.selected = idx;
        }
    }

    /// Move the cursor down, wrapping at the end.
    pub fn next(&mut self) {
        if let Some(p) = self.picker.as_mut() {
            let len = picker_len(&self.catalog, &self.moods, p.kind);
            if len > 0 {
                p.selected = (p.selected + 1) % len;
            }
            return;
        }
        let len = self.track_count();
        if len > 0 {
            self.follow_playback = false;
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move the cursor up, wrapping at the start.
    pub fn prev(&mut self) {
        if let Some(p) = self.picker.as_mut() {
            let len = picker_len(&self.catalog, &self.moods, p.kind);
            if len > 0 {
                p.selected = (p.selected + len - 1) % len;
            }
            return;
        }
        let len = self.track_count();
        if len > 0 {
            self.follow_playback = false;
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn open_picker(&mut self, kind: PickerKind) {
        let selected = match kind {
            PickerKind::Playlists => self
                .engine
                .playlist()
                .catalog_id()
                .and_then(|id| self.catalog.playlist_ids().position(|p| p == id))
                .unwrap_or(0),
            PickerKind::Moods => 0,
        };
        self.picker = Some(Picker { kind, selected });
    }

    pub fn close_picker(&mut self) {
        self.picker = None;
    }

    /// `enter`: choose the highlighted picker row, or play the track under
    /// the cursor.
    pub fn activate(&mut self) {
        match self.picker.take() {
            Some(Picker {
                kind: PickerKind::Playlists,
                selected,
            }) => {
                let id = self.catalog.playlist_ids().nth(selected).map(str::to_string);
                if let Some(id) = id {
                    self.open_playlist(&id, true);
                }
            }
            Some(Picker {
                kind: PickerKind::Moods,
                selected,
            }) => {
                let mood = self.moods.moods().get(selected).map(|m| m.to_string());
                if let Some(mood) = mood {
                    self.open_mood(&mood);
                }
            }
            None => {
                if self.track_count() > 0 {
                    self.follow_playback = true;
                    self.engine.select_track(self.selected);
                    self.sync_follow();
                }
            }
        }
    }

    pub fn play_pause(&mut self) {
        self.follow_playback = true;
        self.engine.toggle_play_pause();
        self.sync_follow();
    }

    pub fn skip(&mut self, direction: Direction) {
        self.follow_playback = true;
        self.engine.advance(direction);
        self.sync_follow();
    }

    pub fn scrub(&mut self, delta_seconds: f64) {
        self.engine.seek_by(delta_seconds);
    }

    pub fn toggle_shuffle(&mut self) {
        self.engine.toggle_shuffle();
    }

    pub fn toggle_repeat_one(&mut self) {
        self.engine.toggle_repeat_one();
    }

    /// Picker rows as display labels.
    pub fn picker_rows(&self, kind: PickerKind) -> Vec<String> {
        match kind {
            PickerKind::Playlists => self.catalog.entries().iter().map(playlist_row).collect(),
            PickerKind::Moods => self.moods.moods().into_iter().map(str::to_string).collect(),
        }
    }
}

fn picker_len(catalog: &Catalog, moods: &MoodRecommender, kind: PickerKind) -> usize {
    match kind {
        PickerKind::Playlists => catalog.playlist_ids().count(),
        PickerKind::Moods => moods.moods().len(),
    }
}

fn playlist_row(e: &CatalogEntry) -> String {
    let tracks = if e.len == 1 { "track" } else { "tracks" };
    if e.artist.is_empty() {
        format!("{} ({} {tracks})", e.title, e.len)
    } else {
        format!("{} - {} ({} {tracks})", e.title, e.artist, e.len)
    }
}
