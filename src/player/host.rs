//! `rodio`-backed media resource.
//!
//! The output stream and sink live on a dedicated thread. `RodioMedia` only
//! forwards commands over a channel; the thread reports back through
//! `MediaEvent`s tagged with the binding of the source they concern.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, SyncSender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, info, warn};

use super::error::MediaError;
use super::media::MediaResource;
use super::sink::create_sink_at;
use super::types::{Binding, MediaEvent, MediaEventKind};

/// How often the host reports position and checks for end of track.
const TICK: Duration = Duration::from_millis(200);

#[derive(Debug)]
enum HostCmd {
    Load { path: PathBuf, binding: Binding },
    Unload,
    Play,
    Pause,
    Seek(Duration),
    SetLoop(bool),
    Quit { fade_out_ms: u64 },
}

pub struct RodioMedia {
    tx: Sender<HostCmd>,
    music_root: PathBuf,
    join: Option<JoinHandle<()>>,
}

impl RodioMedia {
    /// Open the default output device on a new thread.
    ///
    /// Relative track sources are resolved against `music_root`.
    pub fn spawn(music_root: PathBuf) -> Result<(Self, Receiver<MediaEvent>), MediaError> {
        let (tx, rx) = mpsc::channel::<HostCmd>();
        let (event_tx, event_rx) = mpsc::channel::<MediaEvent>();
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<(), MediaError>>(1);

        let join = spawn_host_thread(rx, event_tx, ready_tx);
        ready_rx.recv().map_err(|_| MediaError::HostGone)??;
        info!(root = %music_root.display(), "audio host ready");

        Ok((
            Self {
                tx,
                music_root,
                join: Some(join),
            },
            event_rx,
        ))
    }

    /// Fade out, stop the host thread and wait for it.
    pub fn quit_softly(&mut self, fade_out: Duration) {
        let _ = self.tx.send(HostCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }

    fn send(&self, cmd: HostCmd) {
        if self.tx.send(cmd).is_err() {
            warn!("audio host is gone, dropping command");
        }
    }
}

impl MediaResource for RodioMedia {
    fn load(&mut self, source: &str, binding: Binding) {
        let path = resolve_source(source, &self.music_root);
        self.send(HostCmd::Load { path, binding });
    }

    fn unload(&mut self) {
        self.send(HostCmd::Unload);
    }

    fn play(&mut self) {
        self.send(HostCmd::Play);
    }

    fn pause(&mut self) {
        self.send(HostCmd::Pause);
    }

    fn seek(&mut self, position: Duration) {
        self.send(HostCmd::Seek(position));
    }

    fn set_loop(&mut self, enabled: bool) {
        self.send(HostCmd::SetLoop(enabled));
    }
}

/// Map a track source to a file path.
///
/// `file://` references and absolute paths are used as-is; anything else is
/// relative to `music_root`.
pub fn resolve_source(source: &str, music_root: &Path) -> PathBuf {
    if let Some(rest) = source.strip_prefix("file://") {
        return PathBuf::from(rest);
    }
    let path = Path::new(source);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        music_root.join(path)
    }
}

fn spawn_host_thread(
    rx: Receiver<HostCmd>,
    events: Sender<MediaEvent>,
    ready: SyncSender<Result<(), MediaError>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let _ = ready.send(Err(MediaError::NoOutputDevice(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));

        let mut host = HostState::new(events);
        loop {
            match rx.recv_timeout(TICK) {
                Ok(HostCmd::Quit { fade_out_ms }) => {
                    host.quit(fade_out_ms);
                    break;
                }
                Ok(cmd) => host.apply(cmd, &stream),
                Err(RecvTimeoutError::Timeout) => host.tick(&stream),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        debug!("audio host stopped");
    })
}

struct HostState {
    events: Sender<MediaEvent>,
    sink: Option<Sink>,
    path: Option<PathBuf>,
    binding: Binding,
    paused: bool,
    looping: bool,
    /// `Ended` was already reported for the current sink.
    ended: bool,
    /// Position the current sink started at; `get_pos` counts from there.
    offset: Duration,
}

impl HostState {
    fn new(events: Sender<MediaEvent>) -> Self {
        Self {
            events,
            sink: None,
            path: None,
            binding: Binding::default(),
            paused: true,
            looping: false,
            ended: false,
            offset: Duration::ZERO,
        }
    }

    fn emit(&self, kind: MediaEventKind) {
        let _ = self.events.send(MediaEvent::new(self.binding, kind));
    }

    fn apply(&mut self, cmd: HostCmd, stream: &OutputStream) {
        match cmd {
            HostCmd::Load { path, binding } => {
                self.stop();
                self.binding = binding;
                self.paused = true;
                self.path = Some(path);
                self.rebuild_at(stream, Duration::ZERO, true);
            }
            HostCmd::Unload => {
                self.stop();
                self.path = None;
                self.paused = true;
            }
            HostCmd::Play => {
                let needs_rebuild = self.sink.as_ref().is_none_or(|s| s.empty());
                if needs_rebuild && self.path.is_some() {
                    self.rebuild_at(stream, Duration::ZERO, false);
                }
                if let Some(s) = self.sink.as_ref() {
                    s.play();
                    self.paused = false;
                }
            }
            HostCmd::Pause => {
                if let Some(s) = self.sink.as_ref() {
                    s.pause();
                }
                self.paused = true;
            }
            HostCmd::Seek(pos) => {
                let seeked = match self.sink.as_ref() {
                    Some(s) if !s.empty() => s.try_seek(pos).is_ok(),
                    _ => false,
                };
                match seek_plan(seeked, self.path.is_some()) {
                    SeekPlan::Done => {
                        self.offset = Duration::ZERO;
                        self.emit(MediaEventKind::TimeUpdate(pos));
                    }
                    // Scrubbing fallback: rebuild the sink and skip into the file.
                    SeekPlan::Rebuild => self.rebuild_at(stream, pos, false),
                    SeekPlan::Ignore => {}
                }
            }
            HostCmd::SetLoop(enabled) => self.looping = enabled,
            HostCmd::Quit { .. } => {}
        }
    }

    fn sink_status(&self) -> SinkStatus {
        match self.sink.as_ref() {
            None => SinkStatus::Missing,
            Some(s) if s.empty() => SinkStatus::Drained,
            Some(_) => SinkStatus::Running,
        }
    }

    fn tick(&mut self, stream: &OutputStream) {
        match tick_action(self.sink_status(), self.paused, self.looping, self.ended) {
            TickAction::Idle => {}
            TickAction::ReportPosition => {
                if let Some(s) = self.sink.as_ref() {
                    self.emit(MediaEventKind::TimeUpdate(self.offset + s.get_pos()));
                }
            }
            TickAction::Restart => self.rebuild_at(stream, Duration::ZERO, false),
            TickAction::ReportEnded => self.report_ended(),
        }
    }

    fn report_ended(&mut self) {
        self.ended = true;
        self.emit(MediaEventKind::Ended);
    }

    /// Replace the sink with a fresh one for the bound path starting at `pos`.
    fn rebuild_at(&mut self, stream: &OutputStream, pos: Duration, report_metadata: bool) {
        let Some(path) = self.path.clone() else {
            return;
        };
        self.stop();

        match create_sink_at(stream, &path, pos) {
            Ok((sink, total)) => {
                if !self.paused {
                    sink.play();
                }
                self.sink = Some(sink);
                self.offset = pos;
                self.ended = false;
                if report_metadata {
                    match total {
                        Some(d) => self.emit(MediaEventKind::MetadataLoaded(d)),
                        None => debug!(path = %path.display(), "no duration available"),
                    }
                } else {
                    self.emit(MediaEventKind::TimeUpdate(pos));
                }
            }
            Err(e) => {
                warn!(error = %e, "cannot play source");
                self.emit(MediaEventKind::Failed(e.to_string()));
            }
        }
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(s) = self.sink.as_ref() {
            if !self.paused {
                fade_out_sink(s, fade_out_ms);
            }
        }
        self.stop();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SinkStatus {
    Missing,
    Running,
    Drained,
}

/// What one tick of the host loop should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickAction {
    Idle,
    ReportPosition,
    Restart,
    ReportEnded,
}

/// `Ended` is reported once per sink; a looping sink restarts instead.
fn tick_action(status: SinkStatus, paused: bool, looping: bool, ended: bool) -> TickAction {
    match status {
        SinkStatus::Missing => TickAction::Idle,
        _ if paused => TickAction::Idle,
        SinkStatus::Running => TickAction::ReportPosition,
        SinkStatus::Drained if looping => TickAction::Restart,
        SinkStatus::Drained if ended => TickAction::Idle,
        SinkStatus::Drained => TickAction::ReportEnded,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeekPlan {
    Done,
    Rebuild,
    Ignore,
}

fn seek_plan(seeked_in_place: bool, has_path: bool) -> SeekPlan {
    if seeked_in_place {
        SeekPlan::Done
    } else if has_path {
        SeekPlan::Rebuild
    } else {
        SeekPlan::Ignore
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    sink.set_volume(1.0);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
