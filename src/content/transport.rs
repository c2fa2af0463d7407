//! API Transport
//!
//! The seam every upstream GET goes through. Production uses
//! [`HttpTransport`]; tests swap in a recording fake.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{CacheError, Result};

/// Issues same-origin GET requests against the Wakademy API.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// GETs `path` (path plus query) and parses the body as JSON.
    async fn get_json(&self, path: &str) -> Result<Value>;

    /// GETs `url` and discards the body. Used for prefetching.
    async fn warm(&self, url: &str) -> Result<()>;

    /// Whether `url` targets the API's own origin. The default admits only
    /// root-relative paths.
    fn accepts(&self, url: &str) -> bool {
        url.starts_with('/') && !url.starts_with("//") && !url.starts_with("/\\")
    }
}

// == HTTP Transport ==
/// [`ApiTransport`] backed by reqwest.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    http: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Creates a transport resolving relative paths against `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| CacheError::Configuration(e.to_string()))?;
        Self::with_client(http, base_url)
    }

    /// Creates a transport around an existing client.
    pub fn with_client(http: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CacheError::Configuration(format!("invalid base URL {}: {}", base_url, e)))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins `path` onto the base. Absolute URLs must share the base origin.
    fn resolve(&self, path: &str) -> Result<Url> {
        let url = match Url::parse(path) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => self
                .base_url
                .join(path)
                .map_err(|e| CacheError::InvalidRequest(format!("bad path {}: {}", path, e)))?,
            Err(e) => return Err(CacheError::InvalidRequest(format!("bad URL {}: {}", path, e))),
        };

        if url.origin() != self.base_url.origin() {
            return Err(CacheError::InvalidRequest(format!(
                "{} is outside {}",
                url,
                self.base_url.origin().ascii_serialization()
            )));
        }
        Ok(url)
    }

    async fn send(&self, path: &str) -> Result<Response> {
        let url = self.resolve(path)?;
        debug!(%url, "upstream GET");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| CacheError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CacheError::Upstream {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn get_json(&self, path: &str) -> Result<Value> {
        let body = self
            .send(path)
            .await?
            .bytes()
            .await
            .map_err(|e| CacheError::Http(e.to_string()))?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn warm(&self, url: &str) -> Result<()> {
        self.send(url)
            .await?
            .bytes()
            .await
            .map_err(|e| CacheError::Http(e.to_string()))?;
        Ok(())
    }

    fn accepts(&self, url: &str) -> bool {
        self.resolve(url).is_ok()
    }
}
