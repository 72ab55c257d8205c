//! Module Loader — acquires the render capability once at startup.
//!
//! `acquire` is the single load attempt: compile the component off the
//! async runtime, verify its export, install it into the `RenderSlot`.
//! Failure goes to the diagnostic sink exactly once and the process keeps
//! running without a renderer — there is no retry and no re-acquisition.
//!
//! - `runtime.rs` — wasmtime engine, component loading, `WasmRenderer`
//! - `error.rs` — `LoadError` taxonomy

pub mod error;
pub mod runtime;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::capability::RenderSlot;
use crate::surface::{PreviewStatus, PreviewSurface};

pub use error::LoadError;
pub use runtime::{ModuleRuntime, WasmRenderer};

/// Receives load failures. Injectable so tests can count reports; the
/// default logs through tracing.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, err: &LoadError);
}

/// Default sink — structured log, nothing else.
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, err: &LoadError) {
        tracing::error!("render module failed to load: {err}");
    }
}

/// One asynchronous load attempt.
///
/// Compilation runs on the blocking pool, so input events keep flowing
/// while the module loads. On success the capability lands in `slot` and
/// the surface flips to Ready; on failure the sink gets exactly one report
/// and the surface records the failure.
pub async fn acquire(
    path: PathBuf,
    slot: RenderSlot,
    surface: PreviewSurface,
    sink: Arc<dyn DiagnosticSink>,
) {
    let load_surface = surface.clone();
    let result = tokio::task::spawn_blocking(move || {
        let runtime = ModuleRuntime::new()?;
        runtime.load_module(&path, load_surface)
    })
    .await
    .unwrap_or_else(|e| Err(LoadError::Task(e.to_string())));

    match result {
        Ok(renderer) => {
            match slot.install(Arc::new(renderer)) {
                Ok(()) => {
                    surface.set_status(PreviewStatus::Ready);
                    info!("render module loaded");
                }
                // Loader runs once from startup; a second install means the
                // caller wired two loaders. Keep the first capability.
                Err(e) => warn!("render module discarded: {e}"),
            }
        }
        Err(e) => {
            sink.report(&e);
            surface.set_status(PreviewStatus::Failed(e.to_string()));
        }
    }
}
