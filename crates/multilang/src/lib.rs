#![doc = include_str!("../README.md")]

pub mod alert;
pub mod document;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod registry;
pub mod scope;
pub mod util;

pub use alert::{AlertSink, CollectedAlerts, TracingAlerts};
pub use document::{DocumentContext, SharedDocument};
pub use error::{FetchError, InvalidUrl, LoadError};
pub use fetch::{FetchResponse, HttpFetcher, ResourceFetcher, resource_url};
pub use loader::{Attachment, LoadTask, MultiLang};
pub use registry::{Registry, RegistryEntry};
pub use scope::LangScope;
pub use util::{LangUtil, SessionId};
pub use url::Url;

/// Re-export commonly used types
pub use multilang_core::{
    Direction, Identity, MultiLangOptions, Payload, PayloadFormat, ReadyQueue, Signals,
};

#[cfg(feature = "toml")]
pub use multilang_toml::{ConfigError, MultiLangConfig};
