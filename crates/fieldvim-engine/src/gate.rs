//! Synchronous admission of raw key events.
//!
//! The gate is the cheap front door the host consults on every keydown,
//! before anything enters the async manager. It answers two questions: is
//! this event the echo of a key the executor is currently injecting, and is
//! a previous event still being handled. Both pieces of state are shared
//! with the executor, which updates them across its await points.

use fieldvim_keys::{KeyCombo, KeyInput};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::warn;

/// Bound on how long one injection may stay pending. A hung injection is
/// unblocked by this timeout rather than hanging the pipeline.
pub(crate) const INJECTION_TIMEOUT: Duration = Duration::from_secs(1);

/// How the gate classified a raw key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// A user event; forward it to the manager.
    User,
    /// The echo of the combo currently being injected; pass it through.
    Echo,
    /// Overlapping input while injecting or handling; suppress the event.
    Blocked,
}

struct PendingEcho {
    combo: KeyCombo,
    started: Instant,
}

#[derive(Default)]
struct GateInner {
    handling: AtomicBool,
    echo: Mutex<Option<PendingEcho>>,
}

/// Cloneable handle to the admission state. All clones share one gate.
#[derive(Clone, Default)]
pub struct InputGate {
    inner: Arc<GateInner>,
}

impl InputGate {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Classify a raw key event.
    ///
    /// An echo marker older than the injection timeout is forcibly cleared
    /// here, so an injection whose echo never arrives cannot lock the gate
    /// permanently.
    pub fn admit(&self, input: &KeyInput) -> Admission {
        let mut slot = self.inner.echo.lock();
        if let Some(pending) = slot.take() {
            if pending.started.elapsed() >= INJECTION_TIMEOUT {
                warn!(key = %pending.combo, "injection echo never arrived; clearing marker");
            } else if input.matches(&pending.combo) {
                *slot = Some(pending);
                return Admission::Echo;
            } else {
                *slot = Some(pending);
                return Admission::Blocked;
            }
        }
        drop(slot);

        if self.inner.handling.load(Ordering::SeqCst) {
            return Admission::Blocked;
        }
        Admission::User
    }

    /// Whether a key event is currently being handled.
    pub fn is_handling(&self) -> bool {
        self.inner.handling.load(Ordering::SeqCst)
    }

    pub(crate) fn begin_handling(&self) {
        self.inner.handling.store(true, Ordering::SeqCst);
    }

    pub(crate) fn end_handling(&self) {
        self.inner.handling.store(false, Ordering::SeqCst);
    }

    pub(crate) fn begin_injection(&self, combo: KeyCombo) {
        *self.inner.echo.lock() = Some(PendingEcho {
            combo,
            started: Instant::now(),
        });
    }

    pub(crate) fn end_injection(&self) {
        *self.inner.echo.lock() = None;
    }
}
