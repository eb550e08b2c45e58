//! HTTP access to the comment API.
//!
//! [`ThreadClient`] is the seam the expansion engine talks through; [`HttpClient`]
//! is the production implementation over `reqwest`.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::{Comment, Listing, Thing};

/// Abstraction over the API transport, enabling testability.
///
/// Implementations own timeouts, authentication and any retry policy; the
/// expansion engine propagates their errors unchanged.
#[async_trait]
pub trait ThreadClient: Send + Sync {
    /// GET `uri` and decode the body as a listing of comments, in server order
    async fn fetch_listing(&self, uri: &str, query: &[(&str, String)]) -> Result<Vec<Comment>>;

    /// GET `uri` and return the decoded JSON body as is
    async fn fetch_raw(&self, uri: &str, query: &[(&str, String)]) -> Result<Value>;
}

/// Production [`ThreadClient`] backed by a `reqwest::Client`
#[derive(Clone, Debug)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    /// Build a client from `config`
    ///
    /// # Errors
    /// Returns error if the config is invalid or the HTTP client cannot be created
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Self::with_client(http, &config.base_url)
    }

    /// Wrap an existing `reqwest::Client`, e.g. one carrying auth headers
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // Url::join drops the last path segment unless the base ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { http, base_url })
    }

    /// Absolute URL for an API path relative to the base URL
    pub fn endpoint(&self, uri: &str) -> Result<Url> {
        Ok(self.base_url.join(uri.trim_start_matches('/'))?)
    }

    async fn get_json(&self, uri: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = self.endpoint(uri)?;
        debug!(%url, params = query.len(), "GET");

        let response = self.http.get(url.clone()).query(query).send().await?;

        // Check HTTP status before trying to parse the response body
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl ThreadClient for HttpClient {
    async fn fetch_listing(&self, uri: &str, query: &[(&str, String)]) -> Result<Vec<Comment>> {
        let body = self.get_json(uri, query).await?;
        let listing: Listing<Thing> = serde_json::from_value(body)?;

        let mut comments = Vec::with_capacity(listing.data.children.len());
        for thing in listing.data.children {
            match thing {
                Thing::Comment(comment) => comments.push(comment),
                Thing::More(more) => {
                    warn!(name = %more.name, uri, "Skipping stub returned by listing endpoint");
                }
            }
        }
        Ok(comments)
    }

    async fn fetch_raw(&self, uri: &str, query: &[(&str, String)]) -> Result<Value> {
        self.get_json(uri, query).await
    }
}
