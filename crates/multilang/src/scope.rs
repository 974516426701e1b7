//! Propagation of the language root down a component tree.
//!
//! Each component receives the scope of its parent. A component that declares
//! a [`MultiLang`] loader becomes a language root; every other component
//! inherits the root of its parent.

use crate::error::LoadError;
use crate::loader::{Attachment, MultiLang};
use crate::util::LangUtil;
use multilang_core::Signals;
use tokio::task::JoinHandle;

/// The language context handed to a component.
#[derive(Debug, Default)]
pub struct LangScope {
    root: Option<LangUtil>,
    loader: Option<MultiLang>,
    task: Option<JoinHandle<Result<(), LoadError>>>,
}

impl LangScope {
    /// The scope above the top of a tree: no language root yet.
    pub fn root() -> Self {
        Self::default()
    }

    /// Scope for a child component, which becomes a language root when it
    /// declares a loader.
    pub fn attach(&self, loader: Option<&MultiLang>, signals: &Signals) -> LangScope {
        match loader {
            Some(loader) => self.provide(loader, signals),
            None => self.inherit(),
        }
    }

    /// Makes the child a language root, starting its session.
    ///
    /// Must run inside a Tokio runtime, see [`MultiLang::init_lang`].
    pub fn provide(&self, loader: &MultiLang, signals: &Signals) -> LangScope {
        let Attachment { util, task } = loader.init_lang(signals);
        LangScope {
            root: Some(util),
            loader: Some(loader.clone()),
            task: Some(task),
        }
    }

    /// Child scope sharing this scope's language root.
    pub fn inherit(&self) -> LangScope {
        LangScope {
            root: self.root.clone(),
            loader: None,
            task: None,
        }
    }

    /// The language surface of the nearest language root.
    pub fn lang(&self) -> Option<&LangUtil> {
        self.root.as_ref()
    }

    /// Whether this scope started its own session.
    pub fn is_lang_root(&self) -> bool {
        self.loader.is_some()
    }

    /// Takes the handle of the request started by [`provide`](Self::provide).
    pub fn take_load_task(&mut self) -> Option<JoinHandle<Result<(), LoadError>>> {
        self.task.take()
    }

    /// Releases the root and loader references.
    ///
    /// A language root also withdraws its session from the loader's registry.
    /// An in-flight request keeps running and still resolves the session for
    /// other holders of its [`LangUtil`].
    pub fn detach(&mut self) {
        if let Some(loader) = self.loader.take()
            && let Some(root) = &self.root
        {
            loader.registry().remove(root.session_id());
            tracing::debug!("Detached language root {}", root.session_id());
        }
        self.root = None;
        self.task = None;
    }
}
