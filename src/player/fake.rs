//! Recording media resource and scripted picker for tests.

use std::collections::VecDeque;
use std::time::Duration;

use super::media::MediaResource;
use super::picker::IndexPicker;
use super::types::Binding;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Load(String, Binding),
    Unload,
    Play,
    Pause,
    Seek(Duration),
    SetLoop(bool),
}

#[derive(Default)]
pub(crate) struct FakeMedia {
    pub(crate) calls: Vec<Call>,
    pub(crate) source: Option<String>,
    pub(crate) playing: bool,
    pub(crate) looping: bool,
    pub(crate) position: Duration,
}

impl MediaResource for FakeMedia {
    fn load(&mut self, source: &str, binding: Binding) {
        self.calls.push(Call::Load(source.to_string(), binding));
        self.source = Some(source.to_string());
        self.playing = false;
        self.position = Duration::ZERO;
    }
    fn unload(&mut self) {
        self.calls.push(Call::Unload);
        self.source = None;
        self.playing = false;
    }
    fn play(&mut self) {
        self.calls.push(Call::Play);
        self.playing = true;
    }
    fn pause(&mut self) {
        self.calls.push(Call::Pause);
        self.playing = false;
    }
    fn seek(&mut self, position: Duration) {
        self.calls.push(Call::Seek(position));
        self.position = position;
    }
    fn set_loop(&mut self, enabled: bool) {
        self.calls.push(Call::SetLoop(enabled));
        self.looping = enabled;
    }
}

/// Returns scripted indices, panicking if the engine asks for more.
pub(crate) struct ScriptedPicker(VecDeque<usize>);

impl ScriptedPicker {
    pub(crate) fn new(picks: &[usize]) -> Self {
        Self(picks.iter().copied().collect())
    }
}

impl IndexPicker for ScriptedPicker {
    fn pick(&mut self, len: usize, exclude: usize) -> usize {
        let i = self.0.pop_front().expect("no scripted pick left");
        assert!(i < len);
        assert!(len == 1 || i != exclude);
        i
    }
}
