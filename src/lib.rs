//! liveplot — a live-preview dispatcher for wasm render modules.
//!
//! Two components: a module loader that acquires the render capability
//! asynchronously at startup, and an input dispatcher that forwards the
//! input field's current text to the renderer on every change. The
//! rendering itself lives in an external wasm component; this crate only
//! loads it and drives it.

pub mod capability;
pub mod config;
pub mod dispatch;
pub mod loader;
pub mod surface;
pub mod tui;
