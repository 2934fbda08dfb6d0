// tvhook rewrite webhook client
//
// Pure HTTP client for the stream-URL rewrite webhook. It knows nothing about
// media items, sessions or users; callers build a `RewriteRequest` and decide
// what to do with a failure.
//
// Architecture:
// - tvhook-rewrite: HTTP client + wire types for the webhook
// - tvhook-core/provider: RewriteResolver, which falls back to the original URL

pub mod client;
pub mod error;
pub mod types;

pub use client::{ClientOptions, RewriteClient};
pub use error::RewriteError;
pub use types::RewriteRequest;
