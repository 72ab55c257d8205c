//! TUI runner — terminal setup and the main loop.
//!
//! Multiplexes a render interval (~30fps) with crossterm input events
//! (polled on the blocking pool). The loader and dispatcher run as their
//! own tasks; this loop only edits the field and draws.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::time::interval;

use crate::surface::PreviewSurface;

use super::app::PreviewApp;
use super::event::AppMessage;
use super::field::InputField;
use super::layout;

/// Run the TUI main loop. Blocks until quit.
pub async fn run_tui(field: Arc<InputField>, surface: PreviewSurface) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = PreviewApp::new(field);
    let mut render_interval = interval(Duration::from_millis(33)); // ~30fps

    loop {
        tokio::select! {
            _ = render_interval.tick() => {
                terminal.draw(|f| layout::draw(f, &app, &surface))?;
            }
            // Poll crossterm events (non-blocking via tokio::task::spawn_blocking)
            result = tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            }) => {
                if let Ok(Some(Event::Key(key))) = result {
                    app.update(AppMessage::Input(key));
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
