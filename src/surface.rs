//! Preview surface — the frame buffer the render module draws into.
//!
//! The renderer writes whole frames; the TUI snapshots on each draw.
//! Lightweight copies, no references held across frames. Locks are brief —
//! microseconds.

use std::sync::{Arc, Mutex};

/// Loader/renderer state shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewStatus {
    /// Module acquisition in flight; input is already live.
    Loading,
    /// Render capability installed.
    Ready,
    /// Module load failed — the preview will never appear.
    Failed(String),
}

struct SurfaceState {
    lines: Vec<String>,
    status: PreviewStatus,
}

/// Shared rendering surface. Written by the render capability, drawn by the
/// TUI. Single writer at a time, wholesale frame replacement.
#[derive(Clone)]
pub struct PreviewSurface {
    inner: Arc<Mutex<SurfaceState>>,
}

impl PreviewSurface {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SurfaceState {
                lines: Vec::new(),
                status: PreviewStatus::Loading,
            })),
        }
    }

    /// Replace the visible frame.
    pub fn present(&self, frame: &str) {
        let mut state = self.inner.lock().expect("surface lock poisoned");
        state.lines = frame.lines().map(str::to_string).collect();
    }

    pub fn set_status(&self, status: PreviewStatus) {
        let mut state = self.inner.lock().expect("surface lock poisoned");
        state.status = status;
    }

    /// Copy of the current frame and status, for drawing.
    pub fn snapshot(&self) -> (Vec<String>, PreviewStatus) {
        let state = self.inner.lock().expect("surface lock poisoned");
        (state.lines.clone(), state.status.clone())
    }
}

impl Default for PreviewSurface {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_and_loading() {
        let surface = PreviewSurface::new();
        let (lines, status) = surface.snapshot();
        assert!(lines.is_empty());
        assert_eq!(status, PreviewStatus::Loading);
    }

    #[test]
    fn present_replaces_frame_wholesale() {
        let surface = PreviewSurface::new();
        surface.present("first\nframe");
        surface.present("second");
        let (lines, _) = surface.snapshot();
        assert_eq!(lines, vec!["second".to_string()]);
    }

    #[test]
    fn status_transitions() {
        let surface = PreviewSurface::new();
        surface.set_status(PreviewStatus::Ready);
        assert_eq!(surface.snapshot().1, PreviewStatus::Ready);
        surface.set_status(PreviewStatus::Failed("boom".into()));
        assert_eq!(surface.snapshot().1, PreviewStatus::Failed("boom".into()));
    }

    #[test]
    fn clones_share_state() {
        let surface = PreviewSurface::new();
        let other = surface.clone();
        other.present("shared");
        assert_eq!(surface.snapshot().0, vec!["shared".to_string()]);
    }
}
