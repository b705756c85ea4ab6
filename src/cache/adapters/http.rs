//! HTTP fetcher decoding JSON responses.

use crate::cache::{
    domain::ResourceKey,
    ports::{FetchError, FetchResult, ResourceFetcher},
};
use async_trait::async_trait;
use serde_json::Value;

/// Fetcher issuing `GET {base_url}/{key}` and decoding the body as JSON.
///
/// Any non-success status is reported as [`FetchError::Status`].
#[derive(Debug, Clone)]
pub struct HttpResourceFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpResourceFetcher {
    /// Creates a fetcher with a default client.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a fetcher reusing an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let raw = base_url.into();
        Self {
            client,
            base_url: raw.trim_end_matches('/').to_owned(),
        }
    }

    /// Returns the URL requested for `key`.
    #[must_use]
    pub fn url_for(&self, key: &ResourceKey) -> String {
        format!(
            "{}/{}",
            self.base_url,
            key.as_str().trim_start_matches('/')
        )
    }
}

#[async_trait]
impl ResourceFetcher for HttpResourceFetcher {
    type Output = Value;

    async fn fetch(&self, key: &ResourceKey) -> FetchResult<Value> {
        let response = self
            .client
            .get(self.url_for(key))
            .send()
            .await
            .map_err(FetchError::transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                key: key.clone(),
                status: status.as_u16(),
            });
        }
        response.json::<Value>().await.map_err(FetchError::decode)
    }
}
