//! Key binding dispatch for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::PreviewApp;

/// Handle a key event, mutating app state.
pub fn handle_key(app: &mut PreviewApp, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Char(c) => app.field.insert(c),
        KeyCode::Backspace => app.field.backspace(),
        KeyCode::Delete => app.field.delete(),
        KeyCode::Left => app.field.move_left(),
        KeyCode::Right => app.field.move_right(),
        KeyCode::Home => app.field.move_home(),
        KeyCode::End => app.field.move_end(),
        _ => {}
    }
}
