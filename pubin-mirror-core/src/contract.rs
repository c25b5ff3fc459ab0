//! # contract: the seam between harvesting and the network
//!
//! Harvesters never talk to HTTP directly. They receive a [`Fetcher`], which the
//! CLI fills with [`crate::fetch::HttpFetcher`] and tests fill with the
//! `mockall`-generated `MockFetcher` returning canned pages.
//!
//! A `Fetcher` returns the body of a page that answered 200, or an error once
//! it has given up. Retrying is the implementor's job.

use async_trait::async_trait;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::error::FetchError;

/// Fetches remote pages by URL.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` and return its body as text.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
