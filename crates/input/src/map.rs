//! Key mapping from terminal events to game actions.

use crate::types::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Session-level commands, handled outside the game controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a stopped session, or stop a running one.
    Toggle,
    Restart,
    Quit,
}

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h' | 'H') => Some(Action::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l' | 'L') => Some(Action::Right),
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k' | 'K') => Some(Action::Rotate),

        // Arrow down drops the shape all the way.
        KeyCode::Down | KeyCode::Char(' ') => Some(Action::Set),
        KeyCode::Char('s' | 'S' | 'j' | 'J') => Some(Action::Down),

        _ => None,
    }
}

/// Map keyboard input to session commands.
pub fn handle_command_key(key: KeyEvent) -> Option<Command> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }
    match key.code {
        KeyCode::Enter => Some(Command::Toggle),
        KeyCode::Char('r' | 'R') => Some(Command::Restart),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}
