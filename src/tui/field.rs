//! The input control — a single-line text field.
//!
//! Owns the InputText: the live value the dispatcher reads at dispatch
//! time. Every content change emits exactly one unit notification on the
//! change channel; cursor-only movement emits none. There is no second
//! copy of the text anywhere — change events carry no payload.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::dispatch::InputValue;

struct FieldState {
    text: String,
    /// Cursor position in chars, 0..=text chars.
    cursor: usize,
}

/// Shared single-line editor. The TUI task edits it; the dispatcher reads
/// its value. Locks are brief.
pub struct InputField {
    state: Mutex<FieldState>,
    changes: mpsc::UnboundedSender<()>,
}

fn byte_index(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

impl InputField {
    /// Create the field and the change-event stream the dispatcher binds to.
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let field = Arc::new(Self {
            state: Mutex::new(FieldState {
                text: String::new(),
                cursor: 0,
            }),
            changes: tx,
        });
        (field, rx)
    }

    fn notify(&self) {
        // Receiver gone means the dispatcher shut down; edits still work.
        let _ = self.changes.send(());
    }

    pub fn insert(&self, c: char) {
        {
            let mut state = self.state.lock().expect("field lock poisoned");
            let at = byte_index(&state.text, state.cursor);
            state.text.insert(at, c);
            state.cursor += 1;
        }
        self.notify();
    }

    /// Delete the char before the cursor. No-op (and no event) at the start.
    pub fn backspace(&self) {
        let changed = {
            let mut state = self.state.lock().expect("field lock poisoned");
            if state.cursor == 0 {
                false
            } else {
                state.cursor -= 1;
                let at = byte_index(&state.text, state.cursor);
                state.text.remove(at);
                true
            }
        };
        if changed {
            self.notify();
        }
    }

    /// Delete the char under the cursor. No-op (and no event) at the end.
    pub fn delete(&self) {
        let changed = {
            let mut state = self.state.lock().expect("field lock poisoned");
            let at = byte_index(&state.text, state.cursor);
            if at == state.text.len() {
                false
            } else {
                state.text.remove(at);
                true
            }
        };
        if changed {
            self.notify();
        }
    }

    pub fn move_left(&self) {
        let mut state = self.state.lock().expect("field lock poisoned");
        state.cursor = state.cursor.saturating_sub(1);
    }

    pub fn move_right(&self) {
        let mut state = self.state.lock().expect("field lock poisoned");
        let len = state.text.chars().count();
        if state.cursor < len {
            state.cursor += 1;
        }
    }

    pub fn move_home(&self) {
        self.state.lock().expect("field lock poisoned").cursor = 0;
    }

    pub fn move_end(&self) {
        let mut state = self.state.lock().expect("field lock poisoned");
        state.cursor = state.text.chars().count();
    }

    pub fn text(&self) -> String {
        self.state.lock().expect("field lock poisoned").text.clone()
    }

    pub fn cursor(&self) -> usize {
        self.state.lock().expect("field lock poisoned").cursor
    }
}

impl InputValue for InputField {
    fn value(&self) -> String {
        self.text()
    }
}
