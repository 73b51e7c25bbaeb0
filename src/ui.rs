//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use crate::app::{App, PickerKind};
use crate::config::{ControlsSettings, TimeField, UiSettings};
use crate::library::{display_from_fields, list_label};
use crate::player::{EngineState, IndexPicker, MediaResource, PlayMode, PlaybackSnapshot};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("enter", "select");
    map.insert("space/p", "play/pause");
    map.insert("h/l", "prev/next song");
    // H/L is filled dynamically from config.
    map.insert("s", "shuffle");
    map.insert("r", "repeat one");
    map.insert("a", "playlists");
    map.insert("m", "moods");
    map.insert("u", "import uploads");
    map.insert("esc", "close");
    map.insert("q", "quit");
    map
});

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    let order = [
        "j/k", "h/l", "H/L", "enter", "space/p", "s", "r", "a", "m", "u", "esc", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] scrub -/+{}s", scrub_seconds))
            } else {
                CONTROLS_MAP.get(k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Build the now-playing time text (elapsed/total/remaining) per `UiSettings`.
fn now_playing_time_text(
    elapsed: Duration,
    total: Option<Duration>,
    ui: &UiSettings,
) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    for f in &ui.now_playing_time_fields {
        match f {
            TimeField::Elapsed => parts.push(format_mmss(elapsed)),
            TimeField::Total => {
                if let Some(t) = total {
                    parts.push(format_mmss(t));
                }
            }
            TimeField::Remaining => {
                if let Some(t) = total {
                    let rem = t.saturating_sub(elapsed);
                    parts.push(format!("-{}", format_mmss(rem)));
                }
            }
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&ui.now_playing_time_separator))
    }
}

fn mode_text(mode: PlayMode) -> &'static str {
    match mode {
        PlayMode::None => "MODE: In order",
        PlayMode::Shuffle => "MODE: Shuffle",
        PlayMode::RepeatOne => "MODE: Repeat-one",
    }
}

fn status_text(snap: &PlaybackSnapshot, follow_playback: bool, ui: &UiSettings) -> String {
    let mut parts: Vec<String> = Vec::new();

    let state = match snap.state {
        EngineState::Empty => "Empty",
        EngineState::Ready => "Paused",
        EngineState::Playing => "Playing",
    };
    parts.push(format!(" {state}"));
    parts.push(mode_text(snap.mode).to_string());

    if follow_playback {
        parts.push("CURSOR: Follow".to_string());
    } else {
        parts.push("CURSOR: Free-roam".to_string());
    }

    if !snap.playlist_name.is_empty() {
        parts.push(format!("List: {} ({})", snap.playlist_name, snap.playlist_len));
    }

    if let Some(track) = snap.track.as_ref() {
        let song = display_from_fields(
            track,
            &ui.now_playing_track_fields,
            &ui.now_playing_track_separator,
        );
        parts.push(format!("Song: {song}"));
    }

    parts.join(" • ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Window of `total` rows of which `height` fit, keeping `selected` centered
/// when possible. Returns `(start, end, selected_in_window)`.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize, usize) {
    let selected = selected.min(total.saturating_sub(1));
    if total <= height || height == 0 {
        return (0, total, selected);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, selected - start)
}

fn padded_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw<M: MediaResource, P: IndexPicker>(
    frame: &mut Frame,
    app: &App<M, P>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let snap = app.engine.snapshot();

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" frvttae ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = status_text(&snap, app.follow_playback, ui_settings);
    let status_par = Paragraph::new(status)
        .block(padded_block(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Progress
    let label = now_playing_time_text(snap.elapsed, snap.duration, ui_settings).unwrap_or_default();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .gauge_style(Style::default().add_modifier(Modifier::BOLD))
        .ratio(snap.progress_ratio())
        .label(label);
    frame.render_widget(gauge, chunks[2]);

    // Main list
    {
        let tracks = &app.engine.playlist().tracks;
        let list_height = chunks[3].height.saturating_sub(2) as usize;
        let (start, end, selected_in_window) =
            visible_window(tracks.len(), list_height, app.selected);

        let visible_items: Vec<ListItem> = tracks[start..end]
            .iter()
            .enumerate()
            .map(|(offset, track)| {
                let i = start + offset;
                let label = list_label(track);
                if snap.index == Some(i) {
                    let marker = if snap.is_playing() { "♪ " } else { "‖ " };
                    ListItem::new(format!("{marker}{label}"))
                        .style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    ListItem::new(format!("  {label}"))
                }
            })
            .collect();

        let title = if let Some(msg) = app.status.as_deref() {
            format!(" tracks • {msg} ")
        } else {
            " tracks ".to_string()
        };
        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if !tracks.is_empty() {
            state.select(Some(selected_in_window));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    // Picker popup over the track list
    if let Some(picker) = app.picker {
        let rows = app.picker_rows(picker.kind);
        let title = match picker.kind {
            PickerKind::Playlists => " playlists (esc closes) ",
            PickerKind::Moods => " moods (esc closes) ",
        };
        let height = (rows.len() as u16).saturating_add(2);
        let popup_area = centered_rect_sized(60, height, chunks[3]);
        frame.render_widget(Clear, popup_area);

        let items: Vec<ListItem> = rows.into_iter().map(ListItem::new).collect();
        let list = List::new(items)
            .block(padded_block(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(picker.selected));
        frame.render_stateful_widget(list, popup_area, &mut state);
    }

    let footer = Paragraph::new(controls_text(controls_settings.scrub_seconds))
        .block(padded_block(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}
