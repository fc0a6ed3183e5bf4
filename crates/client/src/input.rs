//! Keyboard-to-command mapping.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// High-level outcome of processing a keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    /// Move the hero by one cell, or fight whatever stands there.
    Step { dx: i32, dy: i32 },
    /// No meaningful command was produced.
    None,
}

/// Converts a raw key event into a command. Key releases are ignored.
pub fn handle_key(key: KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::None;
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('h') => KeyAction::Step { dx: -1, dy: 0 },
        KeyCode::Right | KeyCode::Char('l') => KeyAction::Step { dx: 1, dy: 0 },
        KeyCode::Up | KeyCode::Char('k') => KeyAction::Step { dx: 0, dy: -1 },
        KeyCode::Down | KeyCode::Char('j') => KeyAction::Step { dx: 0, dy: 1 },
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn arrows_and_vi_keys_agree() {
        assert_eq!(handle_key(press(KeyCode::Left)), handle_key(press(KeyCode::Char('h'))));
        assert_eq!(handle_key(press(KeyCode::Down)), KeyAction::Step { dx: 0, dy: 1 });
        assert_eq!(handle_key(press(KeyCode::Char('k'))), KeyAction::Step { dx: 0, dy: -1 });
    }

    #[test]
    fn quit_and_release() {
        assert_eq!(handle_key(press(KeyCode::Char('q'))), KeyAction::Quit);

        let mut release = press(KeyCode::Right);
        release.kind = KeyEventKind::Release;
        assert_eq!(handle_key(release), KeyAction::None);
    }
}
