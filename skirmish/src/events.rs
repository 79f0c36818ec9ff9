//! Event handling for the TUI.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use skirmish_core::Direction;

use crate::app::App;

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event.
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Ctrl-C always works.
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    if app.show_help {
        return handle_help_key(app, key);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.submit_move(Direction::Up);
            EventResult::NeedsRedraw
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.submit_move(Direction::Down);
            EventResult::NeedsRedraw
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.submit_move(Direction::Left);
            EventResult::NeedsRedraw
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.submit_move(Direction::Right);
            EventResult::NeedsRedraw
        }

        KeyCode::Char('s') => {
            app.save();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('L') => {
            app.load();
            EventResult::NeedsRedraw
        }

        KeyCode::Char('?') | KeyCode::F(1) => {
            app.toggle_help();
            EventResult::NeedsRedraw
        }

        KeyCode::Char('q') | KeyCode::Esc => EventResult::Quit,

        _ => EventResult::Continue,
    }
}

/// Any dismiss key closes the help overlay; everything else is swallowed.
fn handle_help_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::F(1) => {
            app.show_help = false;
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}
