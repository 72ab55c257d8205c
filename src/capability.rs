//! Render capability seam — the trait the dispatcher calls through, and the
//! slot that holds it.
//!
//! The capability is an explicit dependency, not ambient state:
//! `RenderSlot` is a write-once cell, filled by the module loader and read
//! by the input dispatcher. One writer, many readers, no global lookup.

use std::sync::Arc;

use tokio::sync::watch;

/// A renderer invocation failure. Contained by the dispatcher — one bad
/// render never stops the event loop.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("instantiation failed: {0}")]
    Instantiation(String),
    #[error("render call failed: {0}")]
    Call(String),
    #[error("render module returned malformed output: {0}")]
    BadOutput(String),
}

/// The external rendering capability: consumes the full input text, updates
/// the preview surface as a side effect. Callers ignore everything but the
/// error, which is reported and swallowed.
pub trait RenderCapability: Send + Sync {
    fn render(&self, text: &str) -> Result<(), RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SlotError {
    #[error("render capability already installed")]
    AlreadyInstalled,
}

struct SlotInner {
    tx: watch::Sender<Option<Arc<dyn RenderCapability>>>,
}

/// Write-once holder for the render capability.
///
/// `install` succeeds exactly once — the loader makes one attempt and there
/// is no re-acquisition, so a second install is a logic error. `ready`
/// lets the dispatcher await availability for its replay policy.
#[derive(Clone)]
pub struct RenderSlot {
    inner: Arc<SlotInner>,
}

impl RenderSlot {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel::<Option<Arc<dyn RenderCapability>>>(None);
        Self {
            inner: Arc::new(SlotInner { tx }),
        }
    }

    /// Install the capability. Fails if one is already installed.
    pub fn install(&self, capability: Arc<dyn RenderCapability>) -> Result<(), SlotError> {
        let mut capability = Some(capability);
        let mut result = Ok(());
        self.inner.tx.send_modify(|slot| {
            if slot.is_some() {
                result = Err(SlotError::AlreadyInstalled);
            } else {
                *slot = capability.take();
            }
        });
        result
    }

    /// Current capability, if the loader has finished.
    pub fn get(&self) -> Option<Arc<dyn RenderCapability>> {
        self.inner.tx.borrow().clone()
    }

    /// Wait until a capability is installed, then return it.
    pub async fn ready(&self) -> Arc<dyn RenderCapability> {
        let mut rx = self.inner.tx.subscribe();
        loop {
            if let Some(capability) = rx.borrow_and_update().as_ref() {
                return Arc::clone(capability);
            }
            // The sender lives inside self, so changed() cannot fail here.
            let _ = rx.changed().await;
        }
    }
}

impl Default for RenderSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RenderSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderSlot")
            .field("installed", &self.get().is_some())
            .finish()
    }
}
