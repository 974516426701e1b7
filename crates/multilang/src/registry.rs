//! Per-session lookup of language state outside the component tree.

use crate::util::{LangUtil, SessionId};
use multilang_core::Payload;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// What the registry mirrors for one session.
#[derive(Clone, Debug)]
pub struct RegistryEntry {
    pub lang_code: String,
    pub country_code: String,
    /// Handle exposing `on_ready` and `template` for the session.
    pub util: LangUtil,
    /// The loaded payload, once the language file has arrived.
    pub lang_obj: Option<Arc<Payload>>,
}

/// Thread-safe map from session to its language state.
///
/// Each loader publishes into the registry it was given, so separate
/// component trees never overwrite each other.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: Arc<RwLock<HashMap<SessionId, RegistryEntry>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes the identity and utility surface of a session.
    pub fn publish(&self, util: &LangUtil) {
        let entry = RegistryEntry {
            lang_code: util.lang_code().to_string(),
            country_code: util.country_code().to_string(),
            util: util.clone(),
            lang_obj: util.payload(),
        };
        tracing::debug!("Publishing {} to registry", util.session_id());
        self.entries.write().insert(util.session_id(), entry);
    }

    /// Mirrors the loaded payload of a session.
    pub fn publish_payload(&self, session: SessionId, payload: Arc<Payload>) {
        match self.entries.write().get_mut(&session) {
            Some(entry) => entry.lang_obj = Some(payload),
            None => tracing::warn!("Payload published for unknown {}", session),
        }
    }

    pub fn get(&self, session: SessionId) -> Option<RegistryEntry> {
        self.entries.read().get(&session).cloned()
    }

    pub fn lang_code(&self, session: SessionId) -> Option<String> {
        self.entries
            .read()
            .get(&session)
            .map(|entry| entry.lang_code.clone())
    }

    pub fn country_code(&self, session: SessionId) -> Option<String> {
        self.entries
            .read()
            .get(&session)
            .map(|entry| entry.country_code.clone())
    }

    pub fn payload(&self, session: SessionId) -> Option<Arc<Payload>> {
        self.entries
            .read()
            .get(&session)
            .and_then(|entry| entry.lang_obj.clone())
    }

    /// Renders `key` with the session's payload.
    pub fn template<I, S>(&self, session: SessionId, key: &str, args: I) -> Option<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let util = self.entries.read().get(&session)?.util.clone();
        Some(util.template(key, args))
    }

    pub fn remove(&self, session: SessionId) -> Option<RegistryEntry> {
        let removed = self.entries.write().remove(&session);
        if removed.is_some() {
            tracing::debug!("Removed {} from registry", session);
        }
        removed
    }

    pub fn sessions(&self) -> Vec<SessionId> {
        let mut sessions: Vec<_> = self.entries.read().keys().copied().collect();
        sessions.sort();
        sessions
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
