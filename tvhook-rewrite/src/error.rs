//! Rewrite webhook error types
//!
//! Every way a webhook call can fail to produce a replacement URL.

use thiserror::Error;

/// Maximum accepted webhook response body (64 KiB).
/// The body is a single URL; anything larger is treated as a bad upstream.
pub const MAX_RESPONSE_SIZE: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Request cancelled")]
    Cancelled,

    #[error("HTTP error {status} for {url}")]
    Http { status: reqwest::StatusCode, url: String },

    #[error("Rewrite service returned an empty body")]
    EmptyBody,

    #[error("Response too large ({size} bytes, max {MAX_RESPONSE_SIZE})")]
    ResponseTooLarge { size: u64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RewriteError {
    /// Whether the failure happened on the wire rather than in the upstream's answer.
    ///
    /// Transport failures (network, timeout, cancellation) are logged at error
    /// level; upstream rejections at warning level.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout | Self::Cancelled)
    }
}

/// Check HTTP response status before reading the body.
///
/// Anything outside 2xx is a rejection, including redirects (they are not followed).
pub fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, RewriteError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(RewriteError::Http {
            status,
            url: resp.url().to_string(),
        });
    }
    Ok(resp)
}

/// Read a response body as text with a size limit.
///
/// Checks the `Content-Length` hint first (if available), then reads chunk by
/// chunk and stops as soon as the running length passes the limit, so a
/// chunked body is never buffered past it. Invalid UTF-8 is replaced, not rejected.
pub async fn text_with_limit(mut response: reqwest::Response) -> Result<String, RewriteError> {
    if let Some(cl) = response.content_length() {
        if cl as usize > MAX_RESPONSE_SIZE {
            return Err(RewriteError::ResponseTooLarge { size: cl });
        }
    }
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let size = body.len() + chunk.len();
        if size > MAX_RESPONSE_SIZE {
            return Err(RewriteError::ResponseTooLarge { size: size as u64 });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(String::from_utf8_lossy(&body).into_owned())
}

impl From<reqwest::Error> for RewriteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.to_string())
        }
    }
}
