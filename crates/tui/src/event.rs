use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, SetupOutcome};
use crate::ui;

pub fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> anyhow::Result<SetupOutcome> {
    loop {
        if let Some(outcome) = app.outcome {
            return Ok(outcome);
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // Dialog open: only its own keys
        if let Some(dialog) = app.confirm.as_mut() {
            match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab
                | KeyCode::Char('h') | KeyCode::Char('l') => dialog.toggle(),
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    dialog.selected = true;
                    app.answer_confirm();
                }
                KeyCode::Enter => app.answer_confirm(),
                KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q') => app.cancel(),
                _ => {}
            }
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.cancel(),
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => app.move_up(),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => app.move_down(),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => app.increase(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => app.decrease(),
            KeyCode::Char(' ') => app.cycle_layout(),
            KeyCode::Enter => app.request_launch(),
            _ => {}
        }
    }
}
