//! Playback engine and media hosts.
//!
//! `engine` holds the state machine; `host` drives a real output device
//! through `rodio`. They only meet through the `MediaResource` trait and the
//! `MediaEvent` stream.

mod engine;
mod error;
mod host;
mod media;
mod picker;
mod sink;
mod types;

pub use engine::PlaybackEngine;
pub use host::RodioMedia;
pub use media::MediaResource;
pub use picker::{IndexPicker, ThreadPicker};
pub use types::*;

#[cfg(test)]
pub(crate) mod fake;
#[cfg(test)]
mod tests;
