//! evenup - split bills with friends from the terminal.
//!
//! Shows a friend list with balances, an add-friend form and a split-bill
//! form for the selected friend.

use std::io;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use evenup::application::{App, AppMode, AppState, Focus, TracingObserver};
use evenup::domain::ContactRegistry;
use evenup::infrastructure::{
    default_contacts, init_logging, Config, InfraError, SeedRepository, UuidGenerator,
};
use evenup::presentation::{render_ui, InputHandler};

/// Builds the session from configuration before the terminal is taken over,
/// so seed errors are printed normally.
fn build_app(config: &Config) -> Result<App, Box<dyn std::error::Error>> {
    let registry = match &config.seed_path {
        Some(path) => SeedRepository::load_registry(path)?,
        None => ContactRegistry::from_contacts(default_contacts()).map_err(InfraError::Seed)?,
    };
    tracing::info!(friends = registry.len(), "starting evenup");

    let mut app = App::new(
        AppState::new(registry),
        Box::new(UuidGenerator),
        &config.avatar_base,
        &config.currency,
    );
    app.controller.subscribe(Box::new(TracingObserver));
    Ok(app)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    init_logging(config.log_path.as_deref())?;
    let mut app = build_app(&config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "event loop failed");
        println!("{err:?}");
    }

    Ok(())
}

/// Draws, waits for a key, dispatches it. Quits on 'q' from the friend list.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if app.mode == AppMode::Normal && app.focus == Focus::List => {
                        return Ok(());
                    }
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
