//! Attaching a language loader: identity resolution, document direction,
//! registry publication and the single language-file request.

use crate::alert::{AlertSink, TracingAlerts};
use crate::document::{DocumentContext, SharedDocument};
use crate::error::LoadError;
use crate::fetch::{HttpFetcher, ResourceFetcher, resource_url};
use crate::registry::Registry;
use crate::util::{LangUtil, SessionId};
use multilang_core::{
    Direction, Identity, MultiLangOptions, Payload, PayloadFormat, ReadyQueue, Signals, resolve,
};
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use url::Url;

/// A language loader declared on the root of a component tree.
///
/// Cloning is cheap and clones share their collaborators.
#[derive(Clone)]
pub struct MultiLang {
    options: Arc<MultiLangOptions>,
    fetcher: Arc<dyn ResourceFetcher>,
    registry: Registry,
    document: Arc<dyn DocumentContext>,
    alerts: Arc<dyn AlertSink>,
}

impl fmt::Debug for MultiLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiLang")
            .field("options", &self.options)
            .field("registry", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl MultiLang {
    /// Creates a loader fetching over HTTP, reporting alerts via `tracing`
    /// and writing its direction to a private [`SharedDocument`].
    ///
    /// The default fetcher has no base URL, so `options.path` must be an
    /// absolute URL. Use [`with_base_url`](Self::with_base_url) for paths
    /// relative to the hosting page.
    pub fn new(options: MultiLangOptions) -> Self {
        Self {
            options: Arc::new(options),
            fetcher: Arc::new(HttpFetcher::new()),
            registry: Registry::new(),
            document: Arc::new(SharedDocument::new()),
            alerts: Arc::new(TracingAlerts),
        }
    }

    /// Creates a loader from a parsed `multilang.toml`.
    #[cfg(feature = "toml")]
    pub fn from_config(
        config: multilang_toml::MultiLangConfig,
    ) -> Result<Self, multilang_toml::ConfigError> {
        Ok(Self::new(config.into_options()?))
    }

    /// Creates a loader from the `multilang.toml` in `CARGO_MANIFEST_DIR`.
    #[cfg(feature = "toml")]
    pub fn from_manifest_dir() -> Result<Self, multilang_toml::ConfigError> {
        Self::from_config(multilang_toml::MultiLangConfig::read_from_manifest_dir()?)
    }

    pub fn with_fetcher<F>(mut self, fetcher: F) -> Self
    where
        F: ResourceFetcher + 'static,
    {
        self.fetcher = Arc::new(fetcher);
        self
    }

    /// Fetches over HTTP, resolving relative resource paths against `base`.
    pub fn with_base_url(self, base: Url) -> Self {
        self.with_fetcher(HttpFetcher::new().with_base(base))
    }

    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_document<D>(mut self, document: D) -> Self
    where
        D: DocumentContext + 'static,
    {
        self.document = Arc::new(document);
        self
    }

    pub fn with_alerts<A>(mut self, alerts: A) -> Self
    where
        A: AlertSink + 'static,
    {
        self.alerts = Arc::new(alerts);
        self
    }

    pub fn options(&self) -> &MultiLangOptions {
        &self.options
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn resolve_identity(&self, signals: &Signals) -> Identity {
        resolve(signals, &self.options)
    }

    /// Attaches a new session without starting the request.
    ///
    /// Resolves the identity, flags right-to-left languages on the document,
    /// queues the `on_loaded` callback and publishes the session to the
    /// registry. The returned [`LoadTask`] performs the request when run.
    pub fn prepare(&self, signals: &Signals) -> (LangUtil, LoadTask) {
        let identity = self.resolve_identity(signals);

        if identity.is_rtl(&self.options) {
            self.document.set_direction(Direction::Rtl);
        }

        let queue = ReadyQueue::new();
        if let Some(on_loaded) = self.options.on_loaded.clone() {
            queue.subscribe(move |payload| on_loaded(payload));
        }

        let util = LangUtil::new(SessionId::next(), identity, queue);
        self.registry.publish(&util);

        let url = resource_url(&self.options, util.lang_code());
        tracing::info!(
            "Attached {} with language '{}', country '{}'",
            util.session_id(),
            util.lang_code(),
            util.country_code()
        );

        let task = LoadTask {
            url,
            format: self.options.format,
            fetcher: self.fetcher.clone(),
            registry: self.registry.clone(),
            alerts: self.alerts.clone(),
            util: util.clone(),
        };

        (util, task)
    }

    /// Attaches a new session and spawns its request on the current Tokio
    /// runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime, like [`tokio::spawn`].
    pub fn init_lang(&self, signals: &Signals) -> Attachment {
        let (util, task) = self.prepare(signals);
        Attachment {
            util,
            task: tokio::spawn(task.run()),
        }
    }
}

/// A session attached by [`MultiLang::init_lang`].
#[derive(Debug)]
pub struct Attachment {
    pub util: LangUtil,
    /// Completes once the language file has loaded or failed.
    pub task: JoinHandle<Result<(), LoadError>>,
}

/// The pending language-file request of one session.
pub struct LoadTask {
    url: String,
    format: PayloadFormat,
    fetcher: Arc<dyn ResourceFetcher>,
    registry: Registry,
    alerts: Arc<dyn AlertSink>,
    util: LangUtil,
}

impl fmt::Debug for LoadTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadTask")
            .field("url", &self.url)
            .field("format", &self.format)
            .field("session", &self.util.session_id())
            .finish_non_exhaustive()
    }
}

impl LoadTask {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Requests the language file and resolves the session with it.
    ///
    /// Failures raise an alert and leave the session not-ready.
    pub async fn run(self) -> Result<(), LoadError> {
        match self.fetch().await {
            Ok(payload) => {
                let session = self.util.session_id();
                let registry = &self.registry;
                self.util.queue().resolve_with(payload, |payload| {
                    registry.publish_payload(session, payload.clone());
                });
                tracing::info!("Loaded language file {} for {}", self.url, session);
                Ok(())
            },
            Err(err) => {
                tracing::error!("Failed to load language file: {}", err);
                self.alerts.alert(err.alert_message());
                Err(err)
            },
        }
    }

    async fn fetch(&self) -> Result<Payload, LoadError> {
        self.fetcher.validate_url(&self.url)?;

        let response = self
            .fetcher
            .get(&self.url)
            .await
            .map_err(|source| LoadError::Aborted {
                url: self.url.clone(),
                source,
            })?;

        if !response.is_ok() {
            return Err(LoadError::Status {
                url: self.url.clone(),
                status: response.status,
            });
        }

        Payload::parse(self.format, &response.body).map_err(|source| LoadError::MalformedPayload {
            url: self.url.clone(),
            source,
        })
    }
}
