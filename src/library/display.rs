use crate::config::TrackDisplayField;

use super::model::Track;

/// Build a display string for `track` according to `fields` and `sep`.
///
/// Empty fields are skipped; falls back to the title when nothing was produced.
pub fn display_from_fields(track: &Track, fields: &[TrackDisplayField], sep: &str) -> String {
    let parts: Vec<&str> = fields
        .iter()
        .map(|f| match f {
            TrackDisplayField::Title => track.title.trim(),
            TrackDisplayField::Artist => track.artist.trim(),
            TrackDisplayField::Source => track.source.trim(),
        })
        .filter(|s| !s.is_empty())
        .collect();

    if parts.is_empty() {
        track.title.clone()
    } else {
        parts.join(sep)
    }
}

/// The playlist row format: `Title - Artist`.
pub fn list_label(track: &Track) -> String {
    display_from_fields(
        track,
        &[TrackDisplayField::Title, TrackDisplayField::Artist],
        " - ",
    )
}
