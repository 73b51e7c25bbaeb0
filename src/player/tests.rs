use std::time::Duration;

use super::engine::PlaybackEngine;
use super::fake::{Call, FakeMedia, ScriptedPicker};
use super::types::*;
use crate::library::{Playlist, Track};

fn track(name: &str) -> Track {
    Track::new(name, "Artist", format!("music/{name}.mp3"))
}

fn abc() -> Playlist {
    Playlist::ephemeral("abc", vec![track("A"), track("B"), track("C")])
}

fn engine() -> PlaybackEngine<FakeMedia, ScriptedPicker> {
    PlaybackEngine::with_picker(FakeMedia::default(), ScriptedPicker::new(&[]))
}

fn engine_with_picks(picks: &[usize]) -> PlaybackEngine<FakeMedia, ScriptedPicker> {
    PlaybackEngine::with_picker(FakeMedia::default(), ScriptedPicker::new(picks))
}

fn event(e: &PlaybackEngine<FakeMedia, ScriptedPicker>, kind: MediaEventKind) -> MediaEvent {
    MediaEvent::new(e.binding(), kind)
}

#[test]
fn new_engine_is_empty_and_transport_is_noop() {
    let mut e = engine();
    assert_eq!(e.state(), EngineState::Empty);
    assert_eq!(e.current_index(), None);

    e.toggle_play_pause();
    e.advance(Direction::Next);
    e.advance(Direction::Previous);
    e.seek(3.0);
    e.select_track(0);

    assert_eq!(e.state(), EngineState::Empty);
    assert!(e.media().calls.is_empty());
}

#[test]
fn load_playlist_binds_first_track_without_playing() {
    let mut e = engine();
    e.load_playlist(abc());

    assert_eq!(e.state(), EngineState::Ready);
    assert_eq!(e.current_index(), Some(0));
    assert_eq!(e.current_track().unwrap().title, "A");
    assert_eq!(e.media().source.as_deref(), Some("music/A.mp3"));
    assert!(!e.media().playing);
}

#[test]
fn load_playlist_while_playing_resets_to_paused_first_track() {
    let mut e = engine();
    e.load_playlist(abc());
    e.select_track(2);
    assert!(e.is_playing());

    e.load_playlist(Playlist::ephemeral("two", vec![track("X"), track("Y")]));
    assert_eq!(e.state(), EngineState::Ready);
    assert_eq!(e.current_index(), Some(0));
    assert_eq!(e.media().source.as_deref(), Some("music/X.mp3"));
    assert!(!e.media().playing);
}

#[test]
fn load_empty_playlist_goes_empty_and_toggle_is_noop() {
    let mut e = engine();
    e.load_playlist(abc());
    e.toggle_play_pause();
    assert!(e.is_playing());

    e.load_playlist(Playlist::empty());
    assert_eq!(e.state(), EngineState::Empty);
    assert_eq!(e.media().calls.last(), Some(&Call::Unload));

    let calls_before = e.media().calls.len();
    e.toggle_play_pause();
    assert_eq!(e.state(), EngineState::Empty);
    assert_eq!(e.media().calls.len(), calls_before);
}

#[test]
fn toggle_play_pause_flips_between_ready_and_playing() {
    let mut e = engine();
    e.load_playlist(abc());

    e.toggle_play_pause();
    assert_eq!(e.state(), EngineState::Playing);
    assert!(e.media().playing);

    e.toggle_play_pause();
    assert_eq!(e.state(), EngineState::Ready);
    assert!(!e.media().playing);
}

#[test]
fn select_track_always_starts_playback() {
    let mut e = engine();
    e.load_playlist(abc());
    assert!(!e.is_playing());

    e.select_track(1);
    assert!(e.is_playing());
    assert_eq!(e.current_index(), Some(1));
    assert_eq!(e.media().source.as_deref(), Some("music/B.mp3"));

    // already playing: still playing
    e.select_track(2);
    assert!(e.is_playing());
    assert_eq!(e.current_index(), Some(2));
}

#[test]
fn select_track_out_of_range_is_ignored() {
    let mut e = engine();
    e.load_playlist(abc());
    let calls_before = e.media().calls.len();

    e.select_track(3);
    e.select_track(usize::MAX);

    assert_eq!(e.current_index(), Some(0));
    assert!(!e.is_playing());
    assert_eq!(e.media().calls.len(), calls_before);
}

#[test]
fn sequential_advance_wraps_both_ways() {
    let mut e = engine();
    e.load_playlist(abc());

    e.advance(Direction::Next);
    assert_eq!(e.current_index(), Some(1));

    e.advance(Direction::Previous);
    e.advance(Direction::Previous);
    assert_eq!(e.current_index(), Some(2));

    e.advance(Direction::Next);
    assert_eq!(e.current_index(), Some(0));
}

#[test]
fn advancing_len_times_returns_to_start() {
    for len in 1..=7 {
        let tracks: Vec<Track> = (0..len).map(|i| track(&format!("T{i}"))).collect();
        for start in 0..len {
            let mut e = engine();
            e.load_playlist(Playlist::ephemeral("cycle", tracks.clone()));
            if start > 0 {
                e.select_track(start);
            }
            for _ in 0..len {
                e.advance(Direction::Next);
            }
            assert_eq!(e.current_index(), Some(start), "len {len}, start {start}");
        }
    }
}

#[test]
fn advance_keeps_prior_play_state() {
    let mut e = engine();
    e.load_playlist(abc());

    e.advance(Direction::Next);
    assert!(!e.is_playing());
    assert!(!e.media().playing);

    e.toggle_play_pause();
    e.advance(Direction::Next);
    assert!(e.is_playing());
    assert!(e.media().playing);
    assert_eq!(e.media().source.as_deref(), Some("music/C.mp3"));
}

#[test]
fn shuffle_advance_uses_picker() {
    let mut e = engine_with_picks(&[2, 0]);
    e.load_playlist(abc());
    e.set_shuffle(true);

    e.advance(Direction::Next);
    assert_eq!(e.current_index(), Some(2));
    e.advance(Direction::Previous);
    assert_eq!(e.current_index(), Some(0));
}

#[test]
fn shuffle_on_single_track_replays_index_zero() {
    let mut e = PlaybackEngine::new(FakeMedia::default());
    e.load_playlist(Playlist::ephemeral("one", vec![track("A")]));
    e.set_shuffle(true);
    e.toggle_play_pause();

    for _ in 0..100 {
        e.advance(Direction::Next);
        assert_eq!(e.current_index(), Some(0));
    }
    assert!(e.is_playing());
}

#[test]
fn shuffle_with_thread_picker_never_repeats_current() {
    let mut e = PlaybackEngine::new(FakeMedia::default());
    e.load_playlist(abc());
    e.set_shuffle(true);

    for _ in 0..100 {
        let before = e.current_index();
        e.advance(Direction::Next);
        assert_ne!(e.current_index(), before);
    }
}

#[test]
fn shuffle_and_repeat_one_are_exclusive() {
    let mut e = engine();

    e.set_shuffle(true);
    e.set_repeat_one(true);
    assert_eq!(e.mode(), PlayMode::RepeatOne);
    assert!(e.media().looping);

    e.set_shuffle(true);
    assert_eq!(e.mode(), PlayMode::Shuffle);
    assert!(!e.media().looping);

    // turning off the inactive flag leaves the active one alone
    e.set_repeat_one(false);
    assert_eq!(e.mode(), PlayMode::Shuffle);

    e.set_shuffle(false);
    assert_eq!(e.mode(), PlayMode::None);
}

#[test]
fn toggles_flip_each_flag() {
    let mut e = engine();
    e.toggle_repeat_one();
    assert_eq!(e.mode(), PlayMode::RepeatOne);
    e.toggle_shuffle();
    assert_eq!(e.mode(), PlayMode::Shuffle);
    e.toggle_shuffle();
    assert_eq!(e.mode(), PlayMode::None);
    e.toggle_repeat_one();
    e.toggle_repeat_one();
    assert_eq!(e.mode(), PlayMode::None);
    assert!(!e.media().looping);
}

#[test]
fn repeat_one_advance_restarts_same_track_and_plays() {
    let mut e = engine();
    e.load_playlist(abc());
    e.select_track(1);
    e.handle_media_event(event(&e, MediaEventKind::MetadataLoaded(Duration::from_secs(200))));
    e.handle_media_event(event(&e, MediaEventKind::TimeUpdate(Duration::from_secs(42))));
    e.toggle_play_pause();
    e.set_repeat_one(true);

    let binding = e.binding();
    e.advance(Direction::Previous);

    assert_eq!(e.current_index(), Some(1));
    assert_eq!(e.elapsed(), Duration::ZERO);
    assert!(e.is_playing());
    // restart in place keeps the bound source
    assert_eq!(e.binding(), binding);
    assert_eq!(e.media().position, Duration::ZERO);
    assert!(e.media().playing);
}

#[test]
fn media_ended_with_repeat_one_restarts_in_place() {
    let mut e = engine();
    e.load_playlist(abc());
    e.select_track(2);
    e.set_repeat_one(true);
    e.handle_media_event(event(&e, MediaEventKind::TimeUpdate(Duration::from_secs(9))));

    e.handle_media_event(event(&e, MediaEventKind::Ended));

    assert_eq!(e.current_index(), Some(2));
    assert!(e.is_playing());
    assert_eq!(e.elapsed(), Duration::ZERO);
    let tail = &e.media().calls[e.media().calls.len() - 2..];
    assert_eq!(tail, &[Call::Seek(Duration::ZERO), Call::Play]);
}

#[test]
fn media_ended_advances_like_next() {
    let mut e = engine();
    e.load_playlist(abc());
    e.select_track(2);

    e.handle_media_event(event(&e, MediaEventKind::Ended));
    assert_eq!(e.current_index(), Some(0));
    assert!(e.is_playing());
    assert_eq!(e.media().source.as_deref(), Some("music/A.mp3"));
}

#[test]
fn media_ended_in_shuffle_picks_random_track() {
    let mut e = engine_with_picks(&[1]);
    e.load_playlist(abc());
    e.set_shuffle(true);
    e.select_track(0);

    e.handle_media_event(event(&e, MediaEventKind::Ended));
    assert_eq!(e.current_index(), Some(1));
    assert!(e.is_playing());
}

#[test]
fn metadata_and_time_updates_track_progress_without_touching_play_state() {
    let mut e = engine();
    e.load_playlist(abc());
    assert_eq!(e.duration(), None);

    e.handle_media_event(event(&e, MediaEventKind::MetadataLoaded(Duration::from_secs(180))));
    assert_eq!(e.duration(), Some(Duration::from_secs(180)));

    e.handle_media_event(event(&e, MediaEventKind::TimeUpdate(Duration::from_secs(12))));
    assert_eq!(e.elapsed(), Duration::from_secs(12));
    assert!(!e.is_playing());

    // positions past the end are clamped
    e.handle_media_event(event(&e, MediaEventKind::TimeUpdate(Duration::from_secs(999))));
    assert_eq!(e.elapsed(), Duration::from_secs(180));
}

#[test]
fn stale_events_from_superseded_source_are_dropped() {
    let mut e = engine();
    e.load_playlist(abc());
    let old = e.binding();

    e.select_track(1);
    e.handle_media_event(MediaEvent::new(
        old,
        MediaEventKind::MetadataLoaded(Duration::from_secs(300)),
    ));
    e.handle_media_event(MediaEvent::new(old, MediaEventKind::TimeUpdate(Duration::from_secs(5))));
    e.handle_media_event(MediaEvent::new(old, MediaEventKind::Ended));

    assert_eq!(e.duration(), None);
    assert_eq!(e.elapsed(), Duration::ZERO);
    assert_eq!(e.current_index(), Some(1));

    e.handle_media_event(event(&e, MediaEventKind::MetadataLoaded(Duration::from_secs(100))));
    assert_eq!(e.duration(), Some(Duration::from_secs(100)));
}

#[test]
fn events_after_loading_empty_playlist_are_stale() {
    let mut e = engine();
    e.load_playlist(abc());
    let old = e.binding();
    e.load_playlist(Playlist::empty());

    e.handle_media_event(MediaEvent::new(old, MediaEventKind::Ended));
    assert_eq!(e.state(), EngineState::Empty);
    assert_ne!(e.binding(), old);
}

#[test]
fn seek_clamps_into_track_bounds() {
    let mut e = engine();
    e.load_playlist(abc());
    e.handle_media_event(event(&e, MediaEventKind::MetadataLoaded(Duration::from_secs(60))));

    e.seek(30.5);
    assert_eq!(e.elapsed(), Duration::from_secs_f64(30.5));

    e.seek(-5.0);
    assert_eq!(e.elapsed(), Duration::ZERO);

    e.seek(60.0 + 100.0);
    assert_eq!(e.elapsed(), Duration::from_secs(60));
    assert_eq!(e.media().position, Duration::from_secs(60));

    let calls_before = e.media().calls.len();
    e.seek(f64::NAN);
    e.seek(f64::INFINITY);
    assert_eq!(e.media().calls.len(), calls_before);
    assert_eq!(e.elapsed(), Duration::from_secs(60));
}

#[test]
fn seek_does_not_change_play_state() {
    let mut e = engine();
    e.load_playlist(abc());
    e.handle_media_event(event(&e, MediaEventKind::MetadataLoaded(Duration::from_secs(60))));

    e.seek(10.0);
    assert!(!e.is_playing());

    e.toggle_play_pause();
    e.seek(20.0);
    assert!(e.is_playing());
}

#[test]
fn seek_before_metadata_is_refused() {
    let mut e = engine();
    e.load_playlist(abc());
    e.seek(10.0);
    assert_eq!(e.elapsed(), Duration::ZERO);
    assert!(!e.media().calls.iter().any(|c| matches!(c, Call::Seek(_))));
}

#[test]
fn seek_by_scrubs_relative_and_clamps() {
    let mut e = engine();
    e.load_playlist(abc());
    e.handle_media_event(event(&e, MediaEventKind::MetadataLoaded(Duration::from_secs(30))));
    e.handle_media_event(event(&e, MediaEventKind::TimeUpdate(Duration::from_secs(3))));

    e.seek_by(5.0);
    assert_eq!(e.elapsed(), Duration::from_secs(8));
    e.seek_by(-20.0);
    assert_eq!(e.elapsed(), Duration::ZERO);
    e.seek_by(100.0);
    assert_eq!(e.elapsed(), Duration::from_secs(30));
}

#[test]
fn switching_tracks_resets_progress() {
    let mut e = engine();
    e.load_playlist(abc());
    e.handle_media_event(event(&e, MediaEventKind::MetadataLoaded(Duration::from_secs(60))));
    e.handle_media_event(event(&e, MediaEventKind::TimeUpdate(Duration::from_secs(30))));

    e.advance(Direction::Next);
    assert_eq!(e.elapsed(), Duration::ZERO);
    assert_eq!(e.duration(), None);
}

#[test]
fn media_failure_pauses_engine() {
    let mut e = engine();
    e.load_playlist(abc());
    e.toggle_play_pause();

    e.handle_media_event(event(&e, MediaEventKind::Failed("no such file".into())));
    assert_eq!(e.state(), EngineState::Ready);
    assert!(!e.media().playing);
    assert_eq!(e.current_index(), Some(0));
}

#[test]
fn append_tracks_keeps_index_and_wakes_empty_engine() {
    let mut e = engine();
    e.append_tracks(vec![track("U1")]);
    assert_eq!(e.state(), EngineState::Ready);
    assert_eq!(e.media().source.as_deref(), Some("music/U1.mp3"));

    e.select_track(0);
    let binding = e.binding();
    e.append_tracks(vec![track("U2"), track("U3")]);
    assert_eq!(e.playlist().len(), 3);
    assert_eq!(e.current_index(), Some(0));
    assert_eq!(e.binding(), binding);
    assert!(e.is_playing());

    e.append_tracks(Vec::new());
    assert_eq!(e.playlist().len(), 3);
}

#[test]
fn play_playlist_starts_first_track() {
    let mut e = engine();
    e.play_playlist(abc());
    assert!(e.is_playing());
    assert_eq!(e.current_index(), Some(0));

    e.play_playlist(Playlist::empty());
    assert_eq!(e.state(), EngineState::Empty);
    assert!(!e.media().playing);
}

#[test]
fn mode_survives_playlist_replacement() {
    let mut e = engine();
    e.set_repeat_one(true);
    e.load_playlist(abc());
    assert_eq!(e.mode(), PlayMode::RepeatOne);
    assert!(e.media().looping);
}

#[test]
fn snapshot_reflects_engine() {
    let mut e = engine();
    e.load_playlist(abc());
    e.select_track(1);
    e.handle_media_event(event(&e, MediaEventKind::MetadataLoaded(Duration::from_secs(100))));
    e.handle_media_event(event(&e, MediaEventKind::TimeUpdate(Duration::from_secs(25))));

    let s = e.snapshot();
    assert_eq!(s.state, EngineState::Playing);
    assert_eq!(s.index, Some(1));
    assert_eq!(s.track.as_ref().unwrap().title, "B");
    assert_eq!(s.playlist_name, "abc");
    assert_eq!(s.playlist_len, 3);
    assert!((s.progress_ratio() - 0.25).abs() < 1e-9);
    assert!(s.is_playing());
}

#[test]
fn bindings_increase_on_every_switch() {
    let mut e = engine();
    e.load_playlist(abc());
    let b1 = e.binding();
    e.advance(Direction::Next);
    let b2 = e.binding();
    e.select_track(2);
    let b3 = e.binding();
    assert!(b1 < b2 && b2 < b3);

    let loads: Vec<Binding> = e
        .media_mut()
        .calls
        .drain(..)
        .filter_map(|c| match c {
            Call::Load(_, b) => Some(b),
            _ => None,
        })
        .collect();
    assert_eq!(loads, vec![b1, b2, b3]);
}
