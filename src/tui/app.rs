//! TUI model — app state and message handling.
//!
//! TEA shape: model here, update below, view in `layout`. The app holds
//! the input field (shared with the dispatcher) and the quit flag; the
//! preview content lives on the surface and is snapshotted at draw time.

use std::sync::Arc;

use super::event::AppMessage;
use super::field::InputField;
use super::input;

pub struct PreviewApp {
    pub field: Arc<InputField>,
    pub should_quit: bool,
}

impl PreviewApp {
    pub fn new(field: Arc<InputField>) -> Self {
        Self {
            field,
            should_quit: false,
        }
    }

    /// Handle one message, mutating app state.
    pub fn update(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Input(key) => input::handle_key(self, key),
            AppMessage::Quit => self.should_quit = true,
        }
    }
}
