//! Read-only playlist catalog plus the one mutable "local uploads" playlist.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{CatalogSettings, LibrarySettings, PlaylistEntry};

use super::model::{Playlist, Track};

/// One row in the playlist picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub len: usize,
}

pub struct Catalog {
    playlists: BTreeMap<String, PlaylistEntry>,
    local_id: String,
    local_artist: String,
}

impl Catalog {
    /// Build a catalog from injected tables. The local uploads playlist is
    /// created if the tables do not already name it.
    pub fn new(catalog: &CatalogSettings, library: &LibrarySettings) -> Self {
        let mut playlists = catalog.playlists.clone();
        playlists
            .entry(library.local_playlist.clone())
            .or_insert_with(|| PlaylistEntry {
                title: library.local_playlist.clone(),
                artist: library.local_artist.clone(),
                tracks: Vec::new(),
            });

        Self {
            playlists,
            local_id: library.local_playlist.clone(),
            local_artist: library.local_artist.clone(),
        }
    }

    /// Look up a playlist by id.
    pub fn get_playlist(&self, id: &str) -> Option<Playlist> {
        let entry = self.playlists.get(id)?;
        let name = if entry.title.trim().is_empty() {
            id.to_string()
        } else {
            entry.title.clone()
        };
        Some(Playlist::catalog(id, name, entry.tracks.clone()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.playlists.contains_key(id)
    }

    pub fn playlist_ids(&self) -> impl Iterator<Item = &str> {
        self.playlists.keys().map(String::as_str)
    }

    /// Picker rows in id order.
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.playlists
            .iter()
            .map(|(id, p)| CatalogEntry {
                id: id.clone(),
                title: if p.title.trim().is_empty() {
                    id.clone()
                } else {
                    p.title.clone()
                },
                artist: p.artist.clone(),
                len: p.tracks.len(),
            })
            .collect()
    }

    /// Turn `files` into tracks, add them to the local uploads playlist and
    /// return just the new tracks.
    ///
    /// Titles are the file names without their extension; sources are
    /// `file://` references to the absolute path. Paths that are not valid
    /// UTF-8 cannot be stored as a source and are skipped.
    pub fn append_local_tracks<P: AsRef<Path>>(&mut self, files: &[P]) -> Vec<Track> {
        let delta: Vec<Track> = files
            .iter()
            .filter_map(|f| local_track(f.as_ref(), &self.local_artist))
            .collect();

        if let Some(local) = self.playlists.get_mut(&self.local_id) {
            local.tracks.extend(delta.iter().cloned());
            debug!(
                added = delta.len(),
                total = local.tracks.len(),
                "appended local tracks"
            );
        }
        delta
    }
}

fn local_track(path: &Path, artist: &str) -> Option<Track> {
    let Some(source) = file_uri(path) else {
        debug!(path = %path.display(), "skipping upload with non UTF-8 path");
        return None;
    };
    let title = path
        .file_stem()
        .filter(|s| !s.is_empty())
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "UNKNOWN".to_string());

    Some(Track::new(title, artist, source))
}

fn file_uri(path: &Path) -> Option<String> {
    let abs: PathBuf = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    abs.to_str().map(|p| format!("file://{p}"))
}
