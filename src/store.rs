//! The persisted "last selected playlist" slot.
//!
//! A tiny TOML file holding one key. The path comes from
//! `FRVTTAE_STATE_PATH`, else `$XDG_STATE_HOME/frvttae/state.toml`, else
//! `~/.local/state/frvttae/state.toml`.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::xdg_dir;
use crate::library::Catalog;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed state file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("cannot encode state: {0}")]
    Encode(#[from] toml::ser::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    last_playlist: Option<String>,
}

pub struct SelectionStore {
    path: PathBuf,
}

impl SelectionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// A store at the default state path, if one can be determined.
    pub fn at_default_path() -> Option<Self> {
        resolve_state_path().map(Self::new)
    }

    /// The stored playlist id. A missing file reads as `None`.
    pub fn load(&self) -> Result<Option<String>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        let state: StateFile = toml::from_str(&text).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(state.last_playlist.filter(|id| !id.trim().is_empty()))
    }

    pub fn save(&self, playlist_id: &str) -> Result<(), StoreError> {
        let state = StateFile {
            last_playlist: Some(playlist_id.to_string()),
        };
        let text = toml::to_string(&state)?;
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, text).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(playlist_id, path = %self.path.display(), "saved last playlist");
        Ok(())
    }
}

/// Resolve the state path from `FRVTTAE_STATE_PATH` or XDG defaults.
pub fn resolve_state_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("FRVTTAE_STATE_PATH") {
        return Some(PathBuf::from(p));
    }
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("frvttae").join("state.toml"))
}

/// Pick the playlist to start with: the navigation override wins over the
/// persisted slot, and ids the catalog does not know are skipped.
pub fn initial_playlist(
    override_id: Option<&str>,
    persisted_id: Option<&str>,
    catalog: &Catalog,
) -> Option<String> {
    [override_id, persisted_id]
        .into_iter()
        .flatten()
        .find(|id| catalog.contains(id))
        .map(str::to_string)
}
