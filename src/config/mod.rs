//! Preview configuration — optional `liveplot.yaml` in the working
//! directory.
//!
//! Everything has a default matching observed behavior: no debounce, drop
//! pre-ready events. A missing or malformed file silently falls back to
//! defaults; CLI flags override file values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::dispatch::{DispatcherConfig, ReadyPolicy};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PreviewConfig {
    /// Path to the render module (.wasm component).
    #[serde(default)]
    pub module: Option<PathBuf>,
    /// Coalescing window in milliseconds. 0 renders on every keystroke.
    #[serde(default)]
    pub debounce_ms: u64,
    /// Policy for change events arriving before the module is ready.
    #[serde(default)]
    pub ready_policy: ReadyPolicy,
}

impl PreviewConfig {
    /// Load `liveplot.yaml` from the working directory, defaulting cleanly
    /// when absent or unreadable.
    pub fn load() -> Self {
        Self::load_from(Path::new("liveplot.yaml"))
    }

    fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Dispatcher settings derived from this config.
    pub fn dispatcher(&self) -> DispatcherConfig {
        DispatcherConfig {
            ready_policy: self.ready_policy,
            debounce: Duration::from_millis(self.debounce_ms),
        }
    }
}
