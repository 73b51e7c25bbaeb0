use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::{App, PickerKind};
use crate::config;
use crate::library::scan_uploads;
use crate::player::{Direction, MediaEvent, RodioMedia};
use crate::ui;

/// Main terminal event loop: applies media events, draws and handles input.
/// Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<RodioMedia>,
    media_events: &Receiver<MediaEvent>,
) -> anyhow::Result<()> {
    loop {
        while let Ok(ev) = media_events.try_recv() {
            app.on_media_event(ev);
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press. Returns `true` when the user asked to quit.
fn handle_key_event(key: KeyEvent, settings: &config::Settings, app: &mut App<RodioMedia>) -> bool {
    if app.picker.is_some() {
        match key.code {
            KeyCode::Esc => app.close_picker(),
            KeyCode::Char('j') | KeyCode::Down => app.next(),
            KeyCode::Char('k') | KeyCode::Up => app.prev(),
            KeyCode::Enter => app.activate(),
            KeyCode::Char('q') => return true,
            _ => {}
        }
        return false;
    }

    let scrub = settings.controls.scrub_seconds as f64;
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Enter => app.activate(),
        KeyCode::Char('p') | KeyCode::Char(' ') => app.play_pause(),
        KeyCode::Char('l') => app.skip(Direction::Next),
        KeyCode::Char('h') => app.skip(Direction::Previous),
        KeyCode::Char('L') => app.scrub(scrub),
        KeyCode::Char('H') => app.scrub(-scrub),
        KeyCode::Char('s') => app.toggle_shuffle(),
        KeyCode::Char('r') => app.toggle_repeat_one(),
        KeyCode::Char('a') => app.open_picker(PickerKind::Playlists),
        KeyCode::Char('m') => app.open_picker(PickerKind::Moods),
        KeyCode::Char('u') => import_uploads(settings, app),
        KeyCode::Esc => app.status = None,
        _ => {}
    }
    false
}

fn import_uploads(settings: &config::Settings, app: &mut App<RodioMedia>) {
    let Some(dir) = settings.library.uploads_dir.as_deref() else {
        app.status = Some("No uploads directory configured (--uploads)".to_string());
        return;
    };
    let files = scan_uploads(dir, &settings.library);
    debug!(dir = %dir.display(), found = files.len(), "scanned uploads");
    app.import_files(&files);
}
