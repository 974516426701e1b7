//! Transport for language files.

use crate::error::{FetchError, InvalidUrl};
use futures::future::BoxFuture;
use multilang_core::MultiLangOptions;
use url::{ParseError, Url};

/// Status and body of a completed GET request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Issues the single GET request of a session.
///
/// An `Err` means the request never completed; HTTP error statuses are
/// returned as responses.
pub trait ResourceFetcher: Send + Sync {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<FetchResponse, FetchError>>;

    /// Rejects URLs this fetcher can never request. Runs before [`get`](Self::get).
    fn validate_url(&self, _url: &str) -> Result<(), InvalidUrl> {
        Ok(())
    }
}

/// [`ResourceFetcher`] backed by a `reqwest` client.
///
/// Relative resource paths such as `./lang` or `/lang` are joined onto the
/// base URL; without one only absolute URLs can be requested.
#[derive(Clone, Debug, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base: Option<Url>,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Sets the URL relative resource paths resolve against, usually the
    /// address of the page that hosts the application.
    pub fn with_base(mut self, mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        self.base = Some(base);
        self
    }

    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    /// The absolute URL requested for `url`.
    pub fn request_url(&self, url: &str) -> Result<Url, InvalidUrl> {
        let parsed = match (Url::parse(url), &self.base) {
            (Ok(absolute), _) => Ok(absolute),
            (Err(ParseError::RelativeUrlWithoutBase), Some(base)) => base.join(url),
            (Err(err), _) => Err(err),
        };
        parsed.map_err(|source| InvalidUrl {
            url: url.to_string(),
            source,
        })
    }
}

impl ResourceFetcher for HttpFetcher {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<FetchResponse, FetchError>> {
        Box::pin(async move {
            let url = self.request_url(url)?;
            tracing::debug!("GET {}", url);
            let response = self.client.get(url).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(FetchResponse { status, body })
        })
    }

    fn validate_url(&self, url: &str) -> Result<(), InvalidUrl> {
        self.request_url(url).map(|_| ())
    }
}

/// URL of the language file for `code`: `{path}/{code}.{ext}?v={version}`.
pub fn resource_url(options: &MultiLangOptions, code: &str) -> String {
    format!(
        "{}/{}?v={}",
        options.path.trim_end_matches('/'),
        options.resource_file(code),
        options.version
    )
}
