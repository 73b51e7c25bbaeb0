use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::player::{PlaybackEngine, RodioMedia};
use crate::store::SelectionStore;

mod event_loop;
mod logging;
mod settings;
mod startup;

#[derive(Parser, Debug)]
#[command(name = "frvttae", version, about)]
pub struct Args {
    /// Catalog playlist to open, instead of the last one used.
    #[arg(long)]
    pub playlist: Option<String>,

    /// Directory to import local files from with `u`.
    #[arg(long)]
    pub uploads: Option<PathBuf>,
}

pub fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let (mut settings, config_problem) = settings::load_settings();
    if let Some(dir) = args.uploads.clone() {
        settings.library.uploads_dir = Some(dir);
    }

    let log_path = logging::init_logging(&settings.logging)?;
    info!(log = %log_path.display(), "frvttae starting");
    if let Some(msg) = config_problem {
        warn!("{msg}");
    }

    let store = SelectionStore::at_default_path();
    if store.is_none() {
        warn!("no state directory, the last playlist will not be remembered");
    }

    let (media, media_events) = RodioMedia::spawn(settings.library.music_root.clone())
        .context("cannot open audio output")?;
    let engine = PlaybackEngine::new(media);
    let mut app = startup::build_app(engine, &settings, store, args.playlist.as_deref());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &media_events);

    app.engine
        .media_mut()
        .quit_softly(Duration::from_millis(settings.playback.quit_fade_out_ms));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("frvttae stopped");
    run_result
}
