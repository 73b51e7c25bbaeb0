//! Mood → playlist lookup.

use std::collections::BTreeMap;

use crate::library::{Playlist, Track};

pub struct MoodRecommender {
    table: BTreeMap<String, Vec<Track>>,
}

impl MoodRecommender {
    pub fn new(table: BTreeMap<String, Vec<Track>>) -> Self {
        Self { table }
    }

    /// The ordered picks for `mood` as an ephemeral playlist, or `None` for
    /// an unknown label.
    pub fn recommend(&self, mood: &str) -> Option<Playlist> {
        self.table
            .get(mood)
            .map(|tracks| Playlist::ephemeral(mood, tracks.clone()))
    }

    /// Known mood labels in a stable order.
    pub fn moods(&self) -> Vec<&str> {
        self.table.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogSettings;

    #[test]
    fn recommend_returns_tracks_in_table_order() {
        let r = MoodRecommender::new(CatalogSettings::default().moods);
        let p = r.recommend("triste").unwrap();
        let titles: Vec<&str> = p.tracks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["I Bet on Losing Dogs", "A Burning Hill", "Murders"]);
        assert_eq!(p.catalog_id(), None);
        assert_eq!(p.name, "triste");
    }

    #[test]
    fn unknown_mood_is_none() {
        let r = MoodRecommender::new(CatalogSettings::default().moods);
        assert!(r.recommend("enojado").is_none());
        assert!(r.recommend("").is_none());
    }

    #[test]
    fn moods_are_listed_sorted() {
        let r = MoodRecommender::new(CatalogSettings::default().moods);
        assert_eq!(
            r.moods(),
            vec!["energico", "feliz", "melancolico", "relajado", "triste"]
        );
    }

    #[test]
    fn injected_table_replaces_defaults() {
        let mut table = BTreeMap::new();
        table.insert("calm".to_string(), vec![Track::new("Rain", "N", "rain.mp3")]);
        let r = MoodRecommender::new(table);
        assert_eq!(r.moods(), vec!["calm"]);
        assert!(r.recommend("feliz").is_none());
    }
}
