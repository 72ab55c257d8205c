//! Preview layout.
//!
//! ```text
//! ┌─ Formula ───────────────────────────────────┐
//! │ > input field                               │
//! ├─ Preview ───────────────────────────────────┤
//! │                                             │
//! │  (frame written by the render module)       │
//! │                                             │
//! ├─────────────────────────────────────────────┤
//! │ [ready] Esc/Ctrl-C: quit                    │
//! └─────────────────────────────────────────────┘
//! ```

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::surface::{PreviewStatus, PreviewSurface};

use super::app::PreviewApp;

/// Draw the full TUI layout.
pub fn draw(f: &mut Frame, app: &PreviewApp, surface: &PreviewSurface) {
    let (lines, status) = surface.snapshot();

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // input field
            Constraint::Min(3),    // preview pane
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    draw_input(f, app, outer[0]);
    draw_preview(f, &lines, &status, outer[1]);
    draw_status(f, &status, outer[2]);
}

fn draw_input(f: &mut Frame, app: &PreviewApp, area: Rect) {
    let block = Block::default()
        .title(" Formula ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(app.field.text()), inner);

    // Cursor clamped to the visible row
    let cursor_x = inner
        .x
        .saturating_add(app.field.cursor().min(inner.width.saturating_sub(1) as usize) as u16);
    f.set_cursor_position(Position::new(cursor_x, inner.y));
}

fn draw_preview(f: &mut Frame, lines: &[String], status: &PreviewStatus, area: Rect) {
    let block = Block::default().title(" Preview ").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let content: Vec<Line> = match status {
        PreviewStatus::Ready => lines.iter().map(|l| Line::from(l.as_str())).collect(),
        PreviewStatus::Loading => vec![Line::from(Span::styled(
            "loading render module...",
            Style::default().fg(Color::DarkGray),
        ))],
        PreviewStatus::Failed(err) => vec![Line::from(Span::styled(
            format!("render module failed to load: {err}"),
            Style::default().fg(Color::Red),
        ))],
    };
    f.render_widget(Paragraph::new(content), inner);
}

fn draw_status(f: &mut Frame, status: &PreviewStatus, area: Rect) {
    let (word, color) = match status {
        PreviewStatus::Loading => ("loading", Color::Yellow),
        PreviewStatus::Ready => ("ready", Color::Green),
        PreviewStatus::Failed(_) => ("failed", Color::Red),
    };
    let line = Line::from(vec![
        Span::styled(
            format!("[{word}]"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Esc/Ctrl-C: quit"),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
