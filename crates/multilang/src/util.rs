//! The language surface shared with every component under a language root.

use multilang_core::{Identity, Payload, ReadyQueue};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::oneshot;

static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);

/// Identifies one attachment of a loader to a component tree.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SessionId(u64);

impl SessionId {
    pub(crate) fn next() -> Self {
        Self(NEXT_SESSION.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Resolved identity plus the ready queue of one session.
///
/// Cheap to clone; clones observe the same payload.
#[derive(Clone, Debug)]
pub struct LangUtil {
    session: SessionId,
    identity: Arc<Identity>,
    queue: ReadyQueue,
}

impl LangUtil {
    pub(crate) fn new(session: SessionId, identity: Identity, queue: ReadyQueue) -> Self {
        Self {
            session,
            identity: Arc::new(identity),
            queue,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn lang_code(&self) -> &str {
        &self.identity.language_code
    }

    pub fn country_code(&self) -> &str {
        &self.identity.country_code
    }

    pub fn is_ready(&self) -> bool {
        self.queue.is_ready()
    }

    /// The loaded payload, if any.
    pub fn payload(&self) -> Option<Arc<Payload>> {
        self.queue.payload()
    }

    /// Runs `callback` once the payload has loaded. A callback registered
    /// after loading runs immediately without the payload.
    pub fn on_ready<F>(&self, callback: F)
    where
        F: FnOnce(Option<Arc<Payload>>) + Send + 'static,
    {
        self.queue.on_ready(callback);
    }

    /// Runs `callback` with the payload once it has loaded.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: FnOnce(Option<Arc<Payload>>) + Send + 'static,
    {
        self.queue.subscribe(callback);
    }

    /// Looks up `key` and fills its `%s` placeholders with `args`.
    pub fn template<I, S>(&self, key: &str, args: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.queue.template(key, args)
    }

    /// Waits for the payload.
    ///
    /// Never completes if the session's load fails; wrap it in a timeout when
    /// that matters.
    pub async fn loaded(&self) -> Option<Arc<Payload>> {
        let (tx, rx) = oneshot::channel();
        self.queue.subscribe(move |payload| {
            let _ = tx.send(payload);
        });
        rx.await.ok().flatten()
    }

    pub(crate) fn queue(&self) -> &ReadyQueue {
        &self.queue
    }
}
