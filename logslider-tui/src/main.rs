//! LogSlider TUI: stacked slider panels driven by mouse and vim-style keys.
//!
//! Usage: `logslider-tui [deck.toml]`. Without a deck file the built-in demo
//! sliders are shown.

use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use logslider_core::SliderDeck;
use logslider_tui::app::{demo_deck, AppState};
use logslider_tui::{input, persistence, ui};

const LOG_ENV: &str = "LOGSLIDER_LOG";
const LOG_FILE: &str = "logslider-tui.log";

fn main() -> Result<()> {
    init_tracing()?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), DisableMouseCapture, LeaveAlternateScreen);
        default_hook(info);
    }));

    // Paths
    let deck_path = std::env::args().nth(1).map(PathBuf::from);
    let state_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("logslider")
        .join("state.json");

    let deck = load_deck(deck_path.as_deref())?;
    let mut app = AppState::new(deck, state_path)?;

    // Apply persisted state
    let persisted = persistence::load(&app.state_path);
    let stale = !persisted.values.is_empty() && persisted.values.len() != app.entries.len();
    persistence::apply(&mut app, persisted);
    if stale {
        app.set_warning("Saved values were for a different deck; restored what fits");
    }
    tracing::info!(sliders = app.entries.len(), state = %app.state_path.display(), "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let persisted = persistence::extract(&app);
    if let Err(e) = persistence::save(&app.state_path, &persisted) {
        tracing::warn!(error = %e, "failed to save slider state");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

/// Log to a file only when asked; the terminal belongs to the UI.
fn init_tracing() -> Result<()> {
    let Ok(filter) = std::env::var(LOG_ENV) else {
        return Ok(());
    };
    let file = std::fs::File::create(LOG_FILE)
        .with_context(|| format!("cannot create {LOG_FILE}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_deck(path: Option<&Path>) -> Result<SliderDeck> {
    match path {
        Some(path) => SliderDeck::load(path)
            .with_context(|| format!("cannot load slider deck {}", path.display())),
        None => Ok(demo_deck()),
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let mut redraw = true;
    loop {
        // 1. Render when something changed
        if redraw || app.entries.iter().any(|e| e.dirty.get()) {
            terminal.draw(|f| ui::draw(f, app))?;
            redraw = false;
        }

        // 2. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
            redraw = true;
        }

        // 3. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
