//! Load failures and the alert messages shown for them.

use multilang_core::PayloadError;
use thiserror::Error;

/// Transport-level failure reported by a [`ResourceFetcher`](crate::ResourceFetcher).
pub type FetchError = Box<dyn std::error::Error + Send + Sync>;

/// A resource URL that cannot be turned into a request.
#[derive(Debug, Error)]
#[error("'{url}' is not a requestable URL: {source}")]
pub struct InvalidUrl {
    pub url: String,
    #[source]
    pub source: url::ParseError,
}

pub const BAD_LANG_FILE: &str = "bad lang file";
pub const GET_LANG_ERROR: &str = "Get lang error";
pub const NETWORK_ERROR: &str = "Network error. Please refresh this page.";

/// Why a session's language file could not be loaded.
///
/// Every variant is terminal for the session: it stays not-ready and the
/// request is not retried.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Language file {url} could not be parsed: {source}")]
    MalformedPayload {
        url: String,
        #[source]
        source: PayloadError,
    },
    #[error("Language file {url} returned status {status}")]
    Status { url: String, status: u16 },
    /// The configured path does not form a URL the fetcher can request.
    #[error(transparent)]
    InvalidUrl(#[from] InvalidUrl),
    #[error("Request for language file {url} was aborted: {source}")]
    Aborted {
        url: String,
        #[source]
        source: FetchError,
    },
}

impl LoadError {
    /// The message shown to the user for this failure.
    pub fn alert_message(&self) -> &'static str {
        match self {
            LoadError::MalformedPayload { .. } => BAD_LANG_FILE,
            LoadError::Status { .. } | LoadError::InvalidUrl(_) => GET_LANG_ERROR,
            LoadError::Aborted { .. } => NETWORK_ERROR,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            LoadError::MalformedPayload { url, .. }
            | LoadError::Status { url, .. }
            | LoadError::Aborted { url, .. } => url,
            LoadError::InvalidUrl(err) => &err.url,
        }
    }
}
