//! Input Dispatcher — turns change events into render invocations.
//!
//! Change events arrive as unit notifications on an unbounded channel; the
//! text itself is read from the control at dispatch time, so each
//! invocation carries the full current value, never a diff and never a
//! stale copy. One event, one invocation, in event order — unless a
//! nonzero debounce window is configured, which coalesces a burst into one
//! trailing invocation.
//!
//! Events can arrive before the module loader resolves. That race has no
//! single right answer, so the policy is explicit: drop pre-ready events
//! (default — the next keystroke carries the full value anyway) or
//! remember the latest pre-ready text and replay it once on readiness.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::capability::{RenderCapability, RenderSlot};

/// Readable current-text property of the input control.
pub trait InputValue: Send + Sync {
    fn value(&self) -> String;
}

/// What to do with change events that arrive before the render module is
/// ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadyPolicy {
    /// Discard pre-ready events; the next event after readiness reads the
    /// then-current full value, so the preview resyncs on its own.
    #[default]
    DropAndResync,
    /// Remember the text observed at event time; when the capability lands,
    /// dispatch the latest remembered value exactly once.
    ReplayLast,
}

#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub ready_policy: ReadyPolicy,
    /// Coalescing window. Zero (the default) renders on every event.
    pub debounce: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            ready_policy: ReadyPolicy::default(),
            debounce: Duration::ZERO,
        }
    }
}

/// Binds one input control to the render slot.
pub struct InputDispatcher {
    control: Arc<dyn InputValue>,
    slot: RenderSlot,
    config: DispatcherConfig,
}

impl InputDispatcher {
    pub fn new(control: Arc<dyn InputValue>, slot: RenderSlot, config: DispatcherConfig) -> Self {
        Self {
            control,
            slot,
            config,
        }
    }

    /// Run until the change channel closes. Consuming the receiver here is
    /// what makes binding happen exactly once.
    pub async fn run(self, mut events: mpsc::UnboundedReceiver<()>) {
        let mut pending: Option<String> = None;
        loop {
            tokio::select! {
                // Replay before draining queued events, so a pre-ready edit
                // lands ahead of whatever arrived after readiness.
                biased;

                capability = self.slot.ready(), if pending.is_some() => {
                    if let Some(text) = pending.take() {
                        invoke(capability.as_ref(), &text);
                    }
                }
                event = events.recv() => {
                    match event {
                        None => break,
                        Some(()) => {
                            if !self.config.debounce.is_zero() {
                                self.absorb_burst(&mut events).await;
                            }
                            match self.slot.get() {
                                Some(capability) => {
                                    pending = None;
                                    invoke(capability.as_ref(), &self.control.value());
                                }
                                None => match self.config.ready_policy {
                                    ReadyPolicy::DropAndResync => {
                                        debug!("change event before module ready, dropped");
                                    }
                                    ReadyPolicy::ReplayLast => {
                                        pending = Some(self.control.value());
                                    }
                                },
                            }
                        }
                    }
                }
            }
        }
    }

    /// Trailing-edge debounce: swallow further events until the window goes
    /// quiet. The caller then dispatches once with the final value.
    async fn absorb_burst(&self, events: &mut mpsc::UnboundedReceiver<()>) {
        loop {
            match tokio::time::timeout(self.config.debounce, events.recv()).await {
                Ok(Some(())) => continue,
                // Window elapsed, or channel closed mid-burst. Either way
                // the burst is over; dispatch what we have.
                _ => break,
            }
        }
    }
}

/// Scoped failure boundary around one render invocation. The outcome is
/// not consumed beyond error reporting; a failed render never stops the
/// event loop.
fn invoke(capability: &dyn RenderCapability, text: &str) {
    if let Err(e) = capability.render(text) {
        warn!("render invocation failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::RenderError;
    use std::sync::Mutex;

    /// Stand-in input control: a settable live value.
    struct FieldStub(Mutex<String>);

    impl FieldStub {
        fn new() -> Arc<Self> {
            Arc::new(Self(Mutex::new(String::new())))
        }
        fn set(&self, text: &str) {
            *self.0.lock().unwrap() = text.to_string();
        }
    }

    impl InputValue for FieldStub {
        fn value(&self) -> String {
            self.0.lock().unwrap().clone()
        }
    }

    /// Records every invocation in order.
    struct Recorder(Mutex<Vec<String>>);

    impl Recorder {
        fn new() -> Arc<Self> {
            Arc::new(Self(Mutex::new(Vec::new())))
        }
        fn calls(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    impl RenderCapability for Recorder {
        fn render(&self, text: &str) -> Result<(), RenderError> {
            self.0.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    /// Fails every call, but records the attempt.
    struct FailingRenderer(Mutex<Vec<String>>);

    impl RenderCapability for FailingRenderer {
        fn render(&self, text: &str) -> Result<(), RenderError> {
            self.0.lock().unwrap().push(text.to_string());
            Err(RenderError::Call("synthetic failure".into()))
        }
    }

    async fn settle() {
        // Paused clock: sleeping runs every ready task, deterministically.
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    fn spawn_dispatcher(
        control: Arc<dyn InputValue>,
        slot: RenderSlot,
        config: DispatcherConfig,
    ) -> (mpsc::UnboundedSender<()>, tokio::task::JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(InputDispatcher::new(control, slot, config).run(rx));
        (tx, handle)
    }

    #[tokio::test(start_paused = true)]
    async fn one_invocation_per_event_in_order() {
        let field = FieldStub::new();
        let recorder = Recorder::new();
        let slot = RenderSlot::new();
        slot.install(recorder.clone()).unwrap();

        let (tx, _handle) =
            spawn_dispatcher(field.clone(), slot, DispatcherConfig::default());

        for text in ["h", "he", "hel", "hell", "hello"] {
            field.set(text);
            tx.send(()).unwrap();
        }
        settle().await;

        assert_eq!(recorder.calls(), vec!["h", "he", "hel", "hell", "hello"]);
    }

    #[tokio::test(start_paused = true)]
    async fn no_event_no_invocation() {
        let field = FieldStub::new();
        let recorder = Recorder::new();
        let slot = RenderSlot::new();
        slot.install(recorder.clone()).unwrap();

        let (_tx, _handle) =
            spawn_dispatcher(field.clone(), slot, DispatcherConfig::default());

        // Value changes twice with no change event: invocation is
        // event-driven, not value-driven.
        field.set("same");
        field.set("same");
        settle().await;

        assert!(recorder.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_policy_discards_pre_ready_events() {
        let field = FieldStub::new();
        let recorder = Recorder::new();
        let slot = RenderSlot::new();

        let (tx, _handle) =
            spawn_dispatcher(field.clone(), slot.clone(), DispatcherConfig::default());

        field.set("A");
        tx.send(()).unwrap();
        settle().await;

        slot.install(recorder.clone()).unwrap();
        field.set("AB");
        tx.send(()).unwrap();
        settle().await;

        assert_eq!(recorder.calls(), vec!["AB"]);
    }

    #[tokio::test(start_paused = true)]
    async fn replay_policy_replays_then_resumes() {
        let field = FieldStub::new();
        let recorder = Recorder::new();
        let slot = RenderSlot::new();
        let config = DispatcherConfig {
            ready_policy: ReadyPolicy::ReplayLast,
            ..Default::default()
        };

        let (tx, _handle) = spawn_dispatcher(field.clone(), slot.clone(), config);

        field.set("A");
        tx.send(()).unwrap();
        settle().await;

        slot.install(recorder.clone()).unwrap();
        field.set("AB");
        tx.send(()).unwrap();
        settle().await;

        // The pre-ready text replays first, then the post-ready event.
        assert_eq!(recorder.calls(), vec!["A", "AB"]);
    }

    #[tokio::test(start_paused = true)]
    async fn replay_keeps_only_latest_pre_ready_text() {
        let field = FieldStub::new();
        let recorder = Recorder::new();
        let slot = RenderSlot::new();
        let config = DispatcherConfig {
            ready_policy: ReadyPolicy::ReplayLast,
            ..Default::default()
        };

        let (tx, _handle) = spawn_dispatcher(field.clone(), slot.clone(), config);

        for text in ["x", "xy", "xyz"] {
            field.set(text);
            tx.send(()).unwrap();
        }
        settle().await;

        slot.install(recorder.clone()).unwrap();
        settle().await;

        assert_eq!(recorder.calls(), vec!["xyz"]);
    }

    #[tokio::test(start_paused = true)]
    async fn render_failure_does_not_stop_the_loop() {
        let field = FieldStub::new();
        let failing = Arc::new(FailingRenderer(Mutex::new(Vec::new())));
        let slot = RenderSlot::new();
        slot.install(failing.clone()).unwrap();

        let (tx, _handle) =
            spawn_dispatcher(field.clone(), slot, DispatcherConfig::default());

        field.set("first");
        tx.send(()).unwrap();
        settle().await;
        field.set("second");
        tx.send(()).unwrap();
        settle().await;

        let attempts = failing.0.lock().unwrap().clone();
        assert_eq!(attempts, vec!["first", "second"]);
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_coalesces_a_burst_to_the_final_value() {
        let field = FieldStub::new();
        let recorder = Recorder::new();
        let slot = RenderSlot::new();
        slot.install(recorder.clone()).unwrap();
        let config = DispatcherConfig {
            debounce: Duration::from_millis(50),
            ..Default::default()
        };

        let (tx, _handle) = spawn_dispatcher(field.clone(), slot, config);

        for text in ["a", "ab", "abc"] {
            field.set(text);
            tx.send(()).unwrap();
        }
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(recorder.calls(), vec!["abc"]);
    }

    #[tokio::test(start_paused = true)]
    async fn separated_events_each_dispatch_under_debounce() {
        let field = FieldStub::new();
        let recorder = Recorder::new();
        let slot = RenderSlot::new();
        slot.install(recorder.clone()).unwrap();
        let config = DispatcherConfig {
            debounce: Duration::from_millis(50),
            ..Default::default()
        };

        let (tx, _handle) = spawn_dispatcher(field.clone(), slot, config);

        field.set("a");
        tx.send(()).unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        field.set("ab");
        tx.send(()).unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(recorder.calls(), vec!["a", "ab"]);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_channel_ends_the_run() {
        let field = FieldStub::new();
        let slot = RenderSlot::new();
        slot.install(Recorder::new()).unwrap();

        let (tx, handle) = spawn_dispatcher(field, slot, DispatcherConfig::default());
        drop(tx);
        handle.await.unwrap();
    }
}
