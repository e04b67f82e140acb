use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::Post, error::PageError};
use tracing::info;
use url::Url;

#[async_trait]
pub trait PostSource: Send + Sync {
    fn endpoint(&self) -> &str;
    async fn fetch_posts(&self) -> std::result::Result<Vec<Post>, PageError>;
}

pub struct MissingPostSource;

#[async_trait]
impl PostSource for MissingPostSource {
    fn endpoint(&self) -> &str {
        "<unconfigured>"
    }

    async fn fetch_posts(&self) -> std::result::Result<Vec<Post>, PageError> {
        Err(PageError::FetchFailed {
            url: self.endpoint().to_string(),
            reason: "posts endpoint is unavailable".into(),
        })
    }
}

/// Fetches the post list with a single GET against a JSON endpoint.
pub struct HttpPostSource {
    http: Client,
    url: Url,
}

impl HttpPostSource {
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build posts http client")?;
        Ok(Self { http, url })
    }
}

#[async_trait]
impl PostSource for HttpPostSource {
    fn endpoint(&self) -> &str {
        self.url.as_str()
    }

    async fn fetch_posts(&self) -> std::result::Result<Vec<Post>, PageError> {
        let fetch_failed = |err: reqwest::Error| PageError::FetchFailed {
            url: self.url.to_string(),
            reason: err.to_string(),
        };

        let body = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(fetch_failed)?
            .error_for_status()
            .map_err(fetch_failed)?
            .bytes()
            .await
            .map_err(fetch_failed)?;

        let posts = decode_posts(&body).map_err(|err| PageError::DecodeFailed {
            url: self.url.to_string(),
            reason: err.to_string(),
        })?;
        info!(count = posts.len(), url = %self.url, "posts fetched");
        Ok(posts)
    }
}

pub fn decode_posts(body: &[u8]) -> serde_json::Result<Vec<Post>> {
    serde_json::from_slice(body)
}

#[cfg(test)]
#[path = "tests/posts_tests.rs"]
mod tests;
