//! TUI messages — everything the update loop consumes.

use crossterm::event::KeyEvent;

/// Messages that drive the TUI update loop.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Keyboard input.
    Input(KeyEvent),
    /// Quit the TUI.
    Quit,
}
