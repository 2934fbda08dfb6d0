//! Rewrite webhook HTTP client

use std::time::Duration;

use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{check_response, text_with_limit, RewriteError};
use crate::types::RewriteRequest;

const POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Transport settings for the webhook client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
    pub connect_timeout: Duration,
    /// Whole-request timeout, body read included
    pub request_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Rewrite webhook client
///
/// Owns one connection pool for its whole lifetime. `reqwest::Client` is
/// reference-counted internally, so a single `RewriteClient` serves
/// concurrent callers without locking. Dropping the last clone closes the pool.
/// Redirects are not followed; a 3xx answer counts as a rejection.
#[derive(Debug, Clone)]
pub struct RewriteClient {
    client: Client,
    options: ClientOptions,
}

impl RewriteClient {
    /// Create a client with default timeouts
    pub fn new() -> Result<Self, RewriteError> {
        Self::with_options(ClientOptions::default())
    }

    pub fn with_options(options: ClientOptions) -> Result<Self, RewriteError> {
        let client = Client::builder()
            .connect_timeout(options.connect_timeout)
            .timeout(options.request_timeout)
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| RewriteError::InvalidConfig(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, options })
    }

    #[must_use]
    pub const fn options(&self) -> ClientOptions {
        self.options
    }

    /// Ask the webhook for a replacement URL.
    ///
    /// Issues exactly one POST with `request` as JSON. Both the send and the
    /// body read race against `cancel`. Returns the trimmed body on a 2xx
    /// answer with non-blank content; every other outcome is an error. No retries.
    pub async fn rewrite(
        &self,
        endpoint: &str,
        request: &RewriteRequest,
        cancel: &CancellationToken,
    ) -> Result<String, RewriteError> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(RewriteError::InvalidConfig(
                "Rewrite endpoint URL is not set".to_string(),
            ));
        }
        let url = url::Url::parse(endpoint).map_err(|e| {
            RewriteError::InvalidConfig(format!("Invalid rewrite endpoint {endpoint}: {e}"))
        })?;

        let exchange = async {
            let response = self.client.post(url).json(request).send().await?;
            let response = check_response(response)?;
            text_with_limit(response).await
        };

        let body = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(RewriteError::Cancelled),
            result = exchange => result?,
        };

        let rewritten = body.trim();
        if rewritten.is_empty() {
            return Err(RewriteError::EmptyBody);
        }

        debug!(endpoint, channel_id = %request.channel_id, "Rewrite service answered");
        Ok(rewritten.to_string())
    }
}
