//! The media resource seam.
//!
//! The engine is the only caller of these methods. Implementations report
//! back through `MediaEvent`s tagged with the binding passed to `load`.

use std::time::Duration;

use super::types::Binding;

pub trait MediaResource {
    /// Replace the current source. The new source starts paused at 0;
    /// readiness arrives later as a `MetadataLoaded` event.
    fn load(&mut self, source: &str, binding: Binding);
    /// Drop the current source without binding a new one.
    fn unload(&mut self);
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, position: Duration);
    /// When set, the resource restarts the source itself at its end.
    fn set_loop(&mut self, enabled: bool);
}
