//! Built-in catalog and mood tables used when the config file supplies none.

use std::collections::BTreeMap;

use crate::library::Track;

use super::schema::PlaylistEntry;

const HAWAII: [&str; 12] = [
    "Introduction to the Snow",
    "Isle Into Thyself",
    "Black Rainbows",
    "White Ball",
    "Murders",
    "宇宙ステーションのレベル7",
    "The Mind Electric",
    "Labyrinth",
    "Time Machine",
    "Stranded Lullaby",
    "Dream Sweet In Sea Major",
    "Variations on a Cloud",
];

const SKITZOFRENIA: [&str; 14] = [
    "My Fvcked Up Head",
    "I Break My Heart & Yours",
    "Looming.Sorrow.Descent",
    "I Bleed",
    "Restlessness",
    "Existing Everywhere",
    "Car Accident",
    "Purple Hearts In Her Eyes",
    "Slvtcrvsher",
    "Ecocide Suite",
    "Antidepressant",
    "Never Existed",
    "Blooming Iridescent Flower",
    "With You Forever",
];

const PUBERTY_2: [&str; 11] = [
    "Happy",
    "Dan the Dancer",
    "Once More to See You",
    "Fireworks",
    "Your Best American Girl",
    "I Bet on Losing Dogs",
    "My Body's Made of Crushed Little Stars",
    "Thursday Girl",
    "A Loving Feeling",
    "A Burning Hill",
    "Crack Baby",
];

/// Tracks numbered `01.mp3`, `02.mp3`, ... under `music/<dir>/`.
fn album(dir: &str, artist: &str, titles: &[&str]) -> Vec<Track> {
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| Track::new(*title, artist, format!("music/{dir}/{:02}.mp3", i + 1)))
        .collect()
}

fn entry(title: &str, artist: &str, tracks: Vec<Track>) -> PlaylistEntry {
    PlaylistEntry {
        title: title.to_string(),
        artist: artist.to_string(),
        tracks,
    }
}

pub(super) fn default_playlists() -> BTreeMap<String, PlaylistEntry> {
    let mut map = BTreeMap::new();
    map.insert(
        "hawaii".to_string(),
        entry(
            "Hawaii: Part II",
            "Miracle Musical",
            album("hawaii", "Miracle Musical", &HAWAII),
        ),
    );
    map.insert(
        "skitzofrenia".to_string(),
        entry(
            "Skitzofrenia Simulation",
            "Sewerslvt",
            album("ss", "Sewerslvt", &SKITZOFRENIA),
        ),
    );
    map.insert(
        "puberty_2".to_string(),
        entry("Puberty 2", "Mitski", album("puberty_2", "Mitski", &PUBERTY_2)),
    );
    map.insert(
        "personal".to_string(),
        entry("Mi Colección", "Varios Artistas", Vec::new()),
    );
    map
}

pub(super) fn default_moods() -> BTreeMap<String, Vec<Track>> {
    let mitski = |n: usize| Track::new(PUBERTY_2[n - 1], "Mitski", format!("music/puberty_2/{n:02}.mp3"));
    let miracle = |n: usize| Track::new(HAWAII[n - 1], "Miracle Musical", format!("music/hawaii/{n:02}.mp3"));
    let sewer = |n: usize| Track::new(SKITZOFRENIA[n - 1], "Sewerslvt", format!("music/ss/{n:02}.mp3"));

    let mut map = BTreeMap::new();
    map.insert("feliz".to_string(), vec![mitski(1), mitski(7), miracle(2)]);
    map.insert("triste".to_string(), vec![mitski(6), mitski(10), miracle(5)]);
    map.insert("energico".to_string(), vec![sewer(9), miracle(7), mitski(5)]);
    map.insert("relajado".to_string(), vec![miracle(10), miracle(11), mitski(3)]);
    map.insert("melancolico".to_string(), vec![sewer(2), sewer(14), mitski(11)]);
    map
}
