//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and wraps the playback engine with
//! the cursor, picker and status state the screen needs.

mod model;

pub use model::*;
