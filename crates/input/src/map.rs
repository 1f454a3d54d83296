//! Key mapping from terminal events to intermission buttons.

use crate::types::Buttons;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to the button it stands for.
pub fn map_key(key: KeyEvent) -> Option<Buttons> {
    if should_quit(key) {
        return None;
    }
    match key.code {
        // Fire
        KeyCode::Char(' ') | KeyCode::Char('f') | KeyCode::Char('F') => Some(Buttons::ATTACK),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(Buttons::ATTACK),

        // Use
        KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char('E') => Some(Buttons::USE),

        // Jump
        KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Tab => Some(Buttons::JUMP),

        _ => None,
    }
}

/// Check if key should leave the intermission without waiting.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_fire_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(' '))), Some(Buttons::ATTACK));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('F'))), Some(Buttons::ATTACK));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('x'))), Some(Buttons::ATTACK));
    }

    #[test]
    fn test_use_and_jump_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter)), Some(Buttons::USE));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('e'))), Some(Buttons::USE));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('J'))), Some(Buttons::JUMP));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Tab)), Some(Buttons::JUMP));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Left)), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('z'))), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('q'))), None);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char(' '))));
    }
}
