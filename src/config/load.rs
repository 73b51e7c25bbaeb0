use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `FRVTTAE__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("FRVTTAE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.controls.scrub_seconds == 0 {
            return Err("controls.scrub_seconds must be >= 1".to_string());
        }
        if self.library.local_playlist.trim().is_empty() {
            return Err("library.local_playlist must not be empty".to_string());
        }
        for (mood, tracks) in &self.catalog.moods {
            if tracks.is_empty() {
                return Err(format!("catalog.moods.{mood} has no tracks"));
            }
        }
        let playlists = self.catalog.playlists.iter().map(|(id, p)| (id, &p.tracks));
        let moods = self.catalog.moods.iter();
        for (id, tracks) in playlists.chain(moods) {
            if tracks.iter().any(|t| t.source.trim().is_empty()) {
                return Err(format!("catalog entry {id} has a track without a source"));
            }
        }
        Ok(())
    }
}

/// Resolve the config path from `FRVTTAE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("FRVTTAE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/frvttae/config.toml`
/// or `~/.config/frvttae/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("frvttae").join("config.toml"))
}

/// `$<var>` if set, else `$HOME/<fallback>`.
pub(crate) fn xdg_dir(var: &str, fallback: &str) -> Option<PathBuf> {
    if let Some(dir) = env::var_os(var) {
        Some(PathBuf::from(dir))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(fallback))
    }
}
