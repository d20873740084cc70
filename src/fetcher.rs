//! Concurrent retrieval of the posts and comments collections.
//!
//! Both requests are dispatched together and awaited together. The load only
//! succeeds when both respond with a success status and both bodies parse;
//! otherwise nothing is returned.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::models::{Comment, Post};

/// Why a load failed.
///
/// Only the `Display` text leaves the fetch layer; callers never branch on
/// the variant.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned status {status}")]
    HttpStatus { url: String, status: StatusCode },
    #[error("unexpected payload from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Both collections from one successful load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedData {
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
}

/// Anything that can produce posts and comments together.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Retrieve both collections. Every call performs a fresh retrieval.
    async fn fetch_all(&self) -> Result<FetchedData, FetchError>;
}

/// Fetches both collections from JSON endpoints over HTTP.
#[derive(Clone)]
pub struct HttpFeedSource {
    http: reqwest::Client,
    posts_url: String,
    comments_url: String,
    load_delay: Duration,
}

impl HttpFeedSource {
    /// Create a source from configuration.
    ///
    /// No request timeout is set: a hung endpoint keeps the load pending.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            http,
            posts_url: config.posts_url.clone(),
            comments_url: config.comments_url.clone(),
            load_delay: config.load_delay,
        })
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, FetchError> {
        debug!(url = %url, "Requesting collection");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Parse {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch_all(&self) -> Result<FetchedData, FetchError> {
        if !self.load_delay.is_zero() {
            debug!(delay = ?self.load_delay, "Delaying load");
            tokio::time::sleep(self.load_delay).await;
        }

        let started = Instant::now();
        info!(posts_url = %self.posts_url, comments_url = %self.comments_url, "Fetching posts and comments");

        // Wait for both even when one fails early.
        let (posts, comments) = tokio::join!(
            self.fetch_json::<Post>(&self.posts_url),
            self.fetch_json::<Comment>(&self.comments_url),
        );

        match (posts, comments) {
            (Ok(posts), Ok(comments)) => {
                info!(
                    posts = posts.len(),
                    comments = comments.len(),
                    elapsed = ?started.elapsed(),
                    "Fetched posts and comments"
                );
                Ok(FetchedData { posts, comments })
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("Load failed: {e}");
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for HttpFeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFeedSource")
            .field("posts_url", &self.posts_url)
            .field("comments_url", &self.comments_url)
            .field("load_delay", &self.load_delay)
            .finish()
    }
}
