//! User-visible failure notices.

use parking_lot::Mutex;
use std::sync::Arc;

/// Receives the blocking notice shown when a language file fails to load.
pub trait AlertSink: Send + Sync {
    fn alert(&self, message: &str);
}

/// Reports alerts through `tracing` at error level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingAlerts;

impl AlertSink for TracingAlerts {
    fn alert(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Keeps every alert so the host can display them itself.
#[derive(Clone, Debug, Default)]
pub struct CollectedAlerts {
    messages: Arc<Mutex<Vec<String>>>,
}

impl CollectedAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

impl AlertSink for CollectedAlerts {
    fn alert(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}
