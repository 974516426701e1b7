//! One-shot ready queue.
//!
//! Callbacks registered before the payload arrives are buffered and flushed
//! exactly once, in registration order, when [`ReadyQueue::resolve`] runs.
//! Callbacks registered afterwards run immediately.

use crate::payload::Payload;
use crate::template::fill_placeholders;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// A buffered subscriber. Receives the payload when one is available.
pub type ReadyCallback = Box<dyn FnOnce(Option<Arc<Payload>>) + Send + 'static>;

#[derive(Default)]
struct QueueState {
    ready: bool,
    payload: Option<Arc<Payload>>,
    pending: Vec<ReadyCallback>,
}

/// Shared ready state of one session. Clones observe the same state.
#[derive(Clone, Default)]
pub struct ReadyQueue {
    state: Arc<Mutex<QueueState>>,
}

impl fmt::Debug for ReadyQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ReadyQueue")
            .field("ready", &state.ready)
            .field("payload", &state.payload)
            .field("pending", &state.pending.len())
            .finish()
    }
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.state.lock().ready
    }

    /// The loaded payload, if any.
    pub fn payload(&self) -> Option<Arc<Payload>> {
        self.state.lock().payload.clone()
    }

    /// Number of callbacks waiting for the payload.
    pub fn pending_len(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Runs `callback` with the payload now if it has loaded, otherwise once
    /// it does.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: FnOnce(Option<Arc<Payload>>) + Send + 'static,
    {
        let mut state = self.state.lock();
        if state.ready {
            let payload = state.payload.clone();
            drop(state);
            callback(payload);
        } else {
            state.pending.push(Box::new(callback));
        }
    }

    /// Like [`subscribe`](Self::subscribe), but a callback registered after
    /// the payload loaded runs without it.
    pub fn on_ready<F>(&self, callback: F)
    where
        F: FnOnce(Option<Arc<Payload>>) + Send + 'static,
    {
        let mut state = self.state.lock();
        if state.ready {
            drop(state);
            callback(None);
        } else {
            state.pending.push(Box::new(callback));
        }
    }

    /// Stores the payload, marks the queue ready and flushes pending callbacks.
    ///
    /// Returns `None` without touching the stored payload when the queue was
    /// already resolved.
    pub fn resolve(&self, payload: Payload) -> Option<Arc<Payload>> {
        self.resolve_with(payload, |_| {})
    }

    /// [`resolve`](Self::resolve) with a hook that runs after the queue turns
    /// ready and before any pending callback.
    ///
    /// Callbacks that subscribe while the flush is running are not part of it;
    /// they observe the ready state and run immediately.
    pub fn resolve_with<F>(&self, payload: Payload, before_flush: F) -> Option<Arc<Payload>>
    where
        F: FnOnce(&Arc<Payload>),
    {
        let payload = Arc::new(payload);
        let pending = {
            let mut state = self.state.lock();
            if state.ready {
                tracing::warn!("Language payload already resolved, ignoring new payload");
                return None;
            }
            state.payload = Some(payload.clone());
            state.ready = true;
            std::mem::take(&mut state.pending)
        };

        before_flush(&payload);

        tracing::debug!("Flushing {} ready callbacks", pending.len());
        for callback in pending {
            callback(Some(payload.clone()));
        }

        Some(payload)
    }

    /// Looks up `key` in the loaded payload and fills its `%s` placeholders.
    ///
    /// Missing keys, and any key before the payload has loaded, yield an
    /// empty string.
    pub fn template<I, S>(&self, key: &str, args: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let payload = self.payload();
        let base = payload
            .as_deref()
            .and_then(|payload| payload.get(key))
            .unwrap_or_default();
        fill_placeholders(base, args)
    }
}
