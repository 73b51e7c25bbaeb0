use tracing::{info, warn};

use crate::app::App;
use crate::config::Settings;
use crate::library::Catalog;
use crate::mood::MoodRecommender;
use crate::player::{IndexPicker, MediaResource, PlayMode, PlaybackEngine};
use crate::store::{SelectionStore, initial_playlist};

/// Assemble the app around `engine` and open the first playlist.
///
/// `override_id` (from `--playlist`) wins over the stored selection. Nothing
/// plays until the user asks.
pub fn build_app<M: MediaResource, P: IndexPicker>(
    mut engine: PlaybackEngine<M, P>,
    settings: &Settings,
    store: Option<SelectionStore>,
    override_id: Option<&str>,
) -> App<M, P> {
    engine.set_mode(PlayMode::from(settings.playback.mode));

    let catalog = Catalog::new(&settings.catalog, &settings.library);
    let moods = MoodRecommender::new(settings.catalog.moods.clone());

    let persisted = store.as_ref().and_then(|s| match s.load() {
        Ok(id) => id,
        Err(e) => {
            warn!(error = %e, "ignoring stored selection");
            None
        }
    });
    let first = initial_playlist(override_id, persisted.as_deref(), &catalog);

    let mut app = App::new(engine, catalog, moods);
    if let Some(store) = store {
        app = app.with_store(store);
    }

    match first {
        Some(id) => {
            info!(id = %id, "starting with playlist");
            app.open_playlist(&id, false);
        }
        None => {
            app.status = Some("Press a to pick a playlist or m for a mood".to_string());
        }
    }
    app.follow_playback = settings.ui.follow_playback;
    app
}
