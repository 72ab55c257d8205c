//! Terminal host UI — the input control and the preview pane.
//!
//! ## Architecture (TEA)
//!
//! Model (`PreviewApp`) + Update (message handler) + View (layout).
//! Immediate mode, no retained widget state. The input field is shared
//! with the dispatcher; the preview pane is snapshotted from the surface
//! each frame — lightweight copies, no references held across frames.

pub mod app;
pub mod event;
pub mod field;
pub mod input;
pub mod layout;
pub mod runner;
