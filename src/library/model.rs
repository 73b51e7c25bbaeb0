use serde::{Deserialize, Serialize};

/// A playable track descriptor.
///
/// `source` is a URI understood by the media host: a path relative to the
/// configured music root, an absolute path, or a `file://` reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub source: String,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            source: source.into(),
        }
    }
}

/// Where a playlist came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// Reconstructible from the catalog by id.
    Catalog(String),
    /// Lives only for this session (mood picks, uploads).
    Ephemeral(String),
}

/// An ordered list of tracks plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub name: String,
    pub provenance: Provenance,
    pub tracks: Vec<Track>,
}

impl Playlist {
    pub fn catalog(id: impl Into<String>, name: impl Into<String>, tracks: Vec<Track>) -> Self {
        Self {
            name: name.into(),
            provenance: Provenance::Catalog(id.into()),
            tracks,
        }
    }

    pub fn ephemeral(label: impl Into<String>, tracks: Vec<Track>) -> Self {
        let label = label.into();
        Self {
            name: label.clone(),
            provenance: Provenance::Ephemeral(label),
            tracks,
        }
    }

    /// An ephemeral playlist with no tracks.
    pub fn empty() -> Self {
        Self::ephemeral("", Vec::new())
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// The catalog id, if this playlist can be rebuilt from the catalog.
    pub fn catalog_id(&self) -> Option<&str> {
        match &self.provenance {
            Provenance::Catalog(id) => Some(id),
            Provenance::Ephemeral(_) => None,
        }
    }
}
