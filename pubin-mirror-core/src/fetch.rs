//! HTTP implementation of [`Fetcher`] with a fixed-delay retry loop.

use std::future::Future;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::config::RetryPolicy;
use crate::contract::Fetcher;
use crate::error::FetchError;

/// Outcome of a single attempt.
#[derive(Debug)]
pub enum Attempt {
    /// Server answered 200 with this body.
    Ok(String),
    /// Server answered with another status; worth retrying.
    Status(u16),
    /// The request never got an answer; worth retrying.
    Transport(String),
}

/// Run `attempt` until it returns [`Attempt::Ok`] or the policy is used up,
/// sleeping `policy.delay()` between attempts.
pub async fn with_retry<F, Fut>(
    policy: &RetryPolicy,
    url: &str,
    mut attempt: F,
) -> Result<String, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Attempt, FetchError>>,
{
    let max_attempts = policy.max_attempts();
    let mut last_status = None;

    for n in 1..=max_attempts {
        match attempt().await? {
            Attempt::Ok(body) => {
                debug!(url, attempt = n, bytes = body.len(), "Fetched page");
                return Ok(body);
            }
            Attempt::Status(status) => {
                last_status = Some(status);
                warn!(url, attempt = n, status, "Unexpected HTTP status");
            }
            Attempt::Transport(message) => {
                warn!(url, attempt = n, error = %message, "Request failed");
            }
        }
        if n < max_attempts {
            info!(url, delay_secs = policy.delay_secs, "Sleeping before retry");
            tokio::time::sleep(policy.delay()).await;
        }
    }

    Err(FetchError::RetriesExhausted {
        url: url.to_string(),
        attempts: max_attempts,
        last_status,
    })
}

/// Fetches pages over HTTP(S) with `reqwest`.
pub struct HttpFetcher {
    client: Client,
    policy: RetryPolicy,
}

impl HttpFetcher {
    pub fn new(policy: RetryPolicy) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("pubin-mirror/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, policy })
    }

    async fn attempt(&self, url: &str) -> Result<Attempt, FetchError> {
        let resp = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => return Ok(Attempt::Transport(e.to_string())),
        };
        let status = resp.status();
        if status != StatusCode::OK {
            return Ok(Attempt::Status(status.as_u16()));
        }
        resp.text()
            .await
            .map(Attempt::Ok)
            .map_err(|e| FetchError::Body {
                url: url.to_string(),
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        info!(url, "Fetching");
        with_retry(&self.policy, url, move || self.attempt(url)).await
    }
}
