//! Track and playlist model, the playlist catalog and the uploads scanner.

mod catalog;
mod display;
mod model;
mod scan;

pub use catalog::{Catalog, CatalogEntry};
pub use display::{display_from_fields, list_label};
pub use model::{Playlist, Track};
pub use scan::scan_uploads;
