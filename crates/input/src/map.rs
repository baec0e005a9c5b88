//! Key bindings.
//!
//! Arrows, vi keys (`h j k l`) and WASD all work; letters are matched without
//! regard to case. Space rotates as well.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key event to the command it stands for, if any.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    action_for_code(key.code)
}

pub(crate) fn action_for_code(code: KeyCode) -> Option<GameAction> {
    let action = match code {
        KeyCode::Left => GameAction::MoveLeft,
        KeyCode::Right => GameAction::MoveRight,
        KeyCode::Down => GameAction::SoftDrop,
        KeyCode::Up => GameAction::Rotate,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'h' | 'a' => GameAction::MoveLeft,
            'l' | 'd' => GameAction::MoveRight,
            'j' | 's' => GameAction::SoftDrop,
            'k' | 'w' | ' ' => GameAction::Rotate,
            _ => return None,
        },
        _ => return None,
    };
    Some(action)
}

/// `q`, `Esc` or Ctrl-C end the session.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char(c) => c.eq_ignore_ascii_case(&'q'),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_bindings() {
        let cases = [
            (KeyCode::Left, GameAction::MoveLeft),
            (KeyCode::Char('h'), GameAction::MoveLeft),
            (KeyCode::Char('A'), GameAction::MoveLeft),
            (KeyCode::Right, GameAction::MoveRight),
            (KeyCode::Char('L'), GameAction::MoveRight),
            (KeyCode::Char('d'), GameAction::MoveRight),
            (KeyCode::Down, GameAction::SoftDrop),
            (KeyCode::Char('J'), GameAction::SoftDrop),
            (KeyCode::Char('s'), GameAction::SoftDrop),
            (KeyCode::Up, GameAction::Rotate),
            (KeyCode::Char('k'), GameAction::Rotate),
            (KeyCode::Char('W'), GameAction::Rotate),
            (KeyCode::Char(' '), GameAction::Rotate),
        ];
        for (code, expected) in cases {
            assert_eq!(action(code), Some(expected), "{code:?}");
        }
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(action(KeyCode::Char('x')), None);
        assert_eq!(action(KeyCode::Enter), None);
        assert_eq!(action(KeyCode::Tab), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Char('Q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
