//! Input module - maps key events to game actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::GameAction;

/// Map a key press to a game action, if it is bound to one.
pub fn action_for_key(event: &KeyEvent) -> Option<GameAction> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    match event.code {
        KeyCode::Left | KeyCode::Char('a') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('s') => Some(GameAction::SoftDrop),
        KeyCode::Up | KeyCode::Char('w') => Some(GameAction::Rotate),
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('p') => Some(GameAction::TogglePause),
        _ => None,
    }
}

/// q, Esc, or Ctrl-C leaves the game.
pub fn should_quit(event: &KeyEvent) -> bool {
    if event.kind != KeyEventKind::Press {
        return false;
    }
    match event.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// g saves a snapshot of the current game.
pub fn is_save_key(event: &KeyEvent) -> bool {
    event.kind == KeyEventKind::Press && event.code == KeyCode::Char('g')
}
