//! The document the language root renders into.

use multilang_core::Direction;
use parking_lot::RwLock;
use std::sync::Arc;

/// Receives the reading direction of the resolved language.
pub trait DocumentContext: Send + Sync {
    fn set_direction(&self, direction: Direction);
}

/// In-memory document root recording its `dir` attribute.
#[derive(Clone, Debug, Default)]
pub struct SharedDocument {
    dir: Arc<RwLock<Option<Direction>>>,
}

impl SharedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// The direction last set, if any.
    pub fn direction(&self) -> Option<Direction> {
        *self.dir.read()
    }

    /// The `dir` attribute value, if one was set.
    pub fn dir_attribute(&self) -> Option<&'static str> {
        self.direction().map(Direction::as_str)
    }
}

impl DocumentContext for SharedDocument {
    fn set_direction(&self, direction: Direction) {
        tracing::debug!("Setting document direction to {}", direction);
        *self.dir.write() = Some(direction);
    }
}
