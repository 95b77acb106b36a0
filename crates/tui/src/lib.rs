pub mod app;
pub mod confirm;
pub mod console;
pub mod event;
pub mod ui;

pub use app::{App, SetupOutcome};
pub use console::Console;

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use quickstart_core::config::Config;
use quickstart_core::types::Monitor;

/// Run the setup menu on the alternate screen. Returns the edited config, or
/// `None` when the user backed out.
pub fn run_setup(monitors: Vec<Monitor>, config: Config) -> anyhow::Result<Option<Config>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(monitors, config);
    let result = event::run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(match result? {
        SetupOutcome::Launch => Some(app.config),
        SetupOutcome::Cancel => None,
    })
}
