//! Fetcher port: the transport a request cache reads through.

use crate::cache::domain::ResourceKey;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Transport-agnostic read primitive.
#[async_trait]
pub trait ResourceFetcher: Send + Sync + 'static {
    /// Payload produced by a successful fetch.
    type Output: Clone + Send + Sync + 'static;

    /// Reads the resource identified by `key`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the transport fails or the backend
    /// answers with a non-success status.
    async fn fetch(&self, key: &ResourceKey) -> FetchResult<Self::Output>;
}

/// Errors returned by fetchers and by the request cache.
///
/// The error is cheap to clone so one failure can be handed to every caller
/// sharing an inflight request.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The backend answered with a non-success status.
    #[error("request for {key} failed with status {status}")]
    Status {
        /// Requested resource.
        key: ResourceKey,
        /// HTTP status code.
        status: u16,
    },

    /// The request could not be sent or the response not received.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(Arc<dyn std::error::Error + Send + Sync>),

    /// A non-HTTP backend failed.
    #[error("backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),

    /// The task driving the fetch ended without a result.
    #[error("fetch task aborted: {0}")]
    Aborted(String),
}

impl FetchError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Wraps a body decoding error.
    pub fn decode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Decode(Arc::new(err))
    }

    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
