use std::fs::File;
use std::io::{self, Stderr};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::prelude::CrosstermBackend;
use ratatui_image::picker::Picker;

use watchlist_tui::app::App;
use watchlist_tui::app::api::MovieApi;
use watchlist_tui::app::upload::CloudinaryUploader;
use watchlist_tui::app::worker::Services;
use watchlist_tui::config::Config;
use watchlist_tui::ui;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_logging(&config.log_dir)?;
    tracing::info!(api = %config.api_base_url, uploads = config.cloudinary.is_some(), "starting watchlist");

    let timeout = Duration::from_secs(config.http_timeout_secs);
    let services = Services {
        movies: Arc::new(MovieApi::new(config.api_base_url.clone(), timeout)?),
        uploader: Arc::new(CloudinaryUploader::new(config.cloudinary.clone(), timeout)?),
    };

    // setup terminal
    enable_raw_mode()?;
    let mut stderr = io::stderr(); // stdout stays free; logs go to a file
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    let picker = match Picker::from_query_stdio() {
        Ok(picker) => Some(picker),
        Err(err) => {
            tracing::warn!(error = %err, "terminal graphics query failed, poster previews disabled");
            None
        }
    };

    // create app and run it
    let mut app = App::new(services, picker);
    app.reload();
    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "terminal loop failed");
    }
    result
}

fn init_logging(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating log dir {}", dir.display()))?;
    let path = dir.join("watchlist.log");
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,watchlist_tui=debug".to_string()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stderr>>, app: &mut App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        // Apply results from background requests
        app.drain_messages();
        if app.loading_movies {
            app.throbber_state.calc_next();
        }

        // Poll for events with a timeout to allow UI updates
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                app.handle_key(key);
            }
        }

        if app.exit {
            return Ok(());
        }
    }
}
