//! Rewrite `MediaSourceProvider`
//!
//! Replaces an item's playback URL with the one returned by the rewrite
//! webhook, falling back to the item's own path on any failure.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, warn, Instrument};
use tvhook_rewrite::{RewriteClient, RewriteError, RewriteRequest};

use super::{resolve_acting_user, MediaSourceProvider, ProviderError, ResolveContext, Result};
use crate::cache::{RewriteCache, MAX_CACHE_TTL};
use crate::config::{RewriteConfig, RewritePolicy};
use crate::models::{LiveStreamInfo, MediaItemRef, MediaSourceDescriptor};

/// Rewrite `MediaSourceProvider`
///
/// Holds one webhook client (and its connection pool) for its whole
/// lifetime. Calls share nothing mutable besides that client and the
/// optional result cache, both safe for concurrent use.
pub struct RewriteResolver {
    config: RewriteConfig,
    client: RewriteClient,
    cache: Option<RewriteCache>,
}

impl RewriteResolver {
    /// Build the resolver and its webhook client from `config`
    pub fn new(config: RewriteConfig) -> Result<Self> {
        let client = RewriteClient::with_options(config.client_options())?;
        let cache = match config.cache_ttl() {
            Some(ttl) if ttl > MAX_CACHE_TTL => {
                return Err(RewriteError::InvalidConfig(format!(
                    "cache_minutes {} exceeds the {} minute maximum",
                    config.cache_minutes,
                    MAX_CACHE_TTL.as_secs() / 60
                ))
                .into());
            }
            Some(ttl) => Some(RewriteCache::new(config.cache_max_capacity, ttl)),
            None => None,
        };

        match config.endpoint() {
            Some(endpoint) => info!(endpoint, policy = ?config.policy, "Rewrite resolver ready"),
            None => warn!("Rewrite endpoint URL is not configured; original paths will be used"),
        }

        Ok(Self {
            config,
            client,
            cache,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// Media sources for `item`: one descriptor, or none when no usable URL exists
    pub async fn resolve(
        &self,
        item: &MediaItemRef,
        ctx: &ResolveContext<'_>,
    ) -> Vec<MediaSourceDescriptor> {
        self.get_media_sources(item, ctx).await
    }

    /// Always fails with [`ProviderError::Unsupported`]
    pub async fn open(
        &self,
        open_token: &str,
        current_live_streams: &[LiveStreamInfo],
    ) -> Result<LiveStreamInfo> {
        self.open_media_source(open_token, current_live_streams, &CancellationToken::new())
            .await
    }

    /// Release the webhook client and its pooled connections
    pub fn shutdown(self) {
        info!("Rewrite resolver shutting down");
    }

    /// Final playback URL for `item`: the webhook's answer or the item's own path
    async fn final_url(&self, item: &MediaItemRef, ctx: &ResolveContext<'_>) -> String {
        let original_url = item.path_or_empty();

        if self.config.policy == RewritePolicy::WhenPathEmpty && !original_url.is_empty() {
            debug!(original_url, "Item already has a path; skipping rewrite");
            return original_url.to_string();
        }

        let user = resolve_acting_user(item, ctx);
        info!(user_id = %user.user_id, "Resolved acting user");

        let Some(endpoint) = self.config.endpoint() else {
            warn!(original_url, "Rewrite endpoint URL is not configured; falling back to original URL");
            return original_url.to_string();
        };

        let request = RewriteRequest::new(original_url, user.user_id, &item.id, &item.name);

        if let Some(cache) = &self.cache {
            if let Some(url) = cache.get(&request).await {
                return url;
            }
        }

        info!(endpoint, user_id = %request.user_id, "Sending rewrite request");

        match self.client.rewrite(endpoint, &request, &ctx.cancel).await {
            Ok(url) => {
                if let Some(cache) = &self.cache {
                    cache.insert(&request, url.clone()).await;
                }
                url
            }
            Err(e) if e.is_transport() => {
                error!(error = %e, original_url, "Error rewriting stream URL; falling back to original");
                original_url.to_string()
            }
            Err(e) => {
                warn!(error = %e, original_url, "Rewrite service gave no usable URL; falling back to original");
                original_url.to_string()
            }
        }
    }
}

#[async_trait]
impl MediaSourceProvider for RewriteResolver {
    fn name(&self) -> &'static str {
        "rewrite"
    }

    async fn get_media_sources(
        &self,
        item: &MediaItemRef,
        ctx: &ResolveContext<'_>,
    ) -> Vec<MediaSourceDescriptor> {
        let span = info_span!("resolve", item_id = %item.id, item_name = %item.name);

        async {
            debug!(path = item.path.as_deref().unwrap_or("null"), "Processing media sources");

            let url = self.final_url(item, ctx).await;
            if url.is_empty() {
                warn!("Final URL is empty; returning no media sources");
                return Vec::new();
            }

            info!(url = %url, "Providing stream URL");
            vec![MediaSourceDescriptor::http(item, url)]
        }
        .instrument(span)
        .await
    }

    async fn open_media_source(
        &self,
        open_token: &str,
        current_live_streams: &[LiveStreamInfo],
        _cancel: &CancellationToken,
    ) -> Result<LiveStreamInfo> {
        debug!(
            open_token,
            live_streams = current_live_streams.len(),
            "Rejecting open request"
        );
        Err(ProviderError::Unsupported(format!(
            "{} provider cannot open media sources",
            self.name()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::InMemoryHost;

    #[test]
    fn test_resolver_creation() {
        let resolver = RewriteResolver::new(RewriteConfig::default()).unwrap();
        assert!(resolver.config().endpoint().is_none());
        assert!(resolver.cache.is_none());

        let resolver = RewriteResolver::new(RewriteConfig {
            cache_minutes: 5,
            ..RewriteConfig::with_endpoint("http://hook.local/rewrite")
        })
        .unwrap();
        assert!(resolver.cache.is_some());
        resolver.shutdown();
    }

    #[test]
    fn test_cache_ttl_above_limit_is_rejected() {
        for cache_minutes in [600_000_000, u64::MAX / 2] {
            let result = RewriteResolver::new(RewriteConfig {
                cache_minutes,
                ..RewriteConfig::with_endpoint("http://hook.local/rewrite")
            });
            assert!(matches!(
                result,
                Err(ProviderError::Rewrite(RewriteError::InvalidConfig(_)))
            ));
        }

        let at_limit = RewriteResolver::new(RewriteConfig {
            cache_minutes: MAX_CACHE_TTL.as_secs() / 60,
            ..RewriteConfig::default()
        })
        .unwrap();
        assert!(at_limit.cache.is_some());
    }

    #[tokio::test]
    async fn test_missing_endpoint_uses_original_path() {
        let resolver = RewriteResolver::new(RewriteConfig::default()).unwrap();
        let host = InMemoryHost::new();
        let ctx = ResolveContext::new(&host, &host);

        let item = MediaItemRef::new("ch1", "One").with_path("http://origin/ch1");
        let sources = resolver.resolve(&item, &ctx).await;
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].path, "http://origin/ch1");

        let pathless = MediaItemRef::new("ch2", "Two");
        assert!(resolver.resolve(&pathless, &ctx).await.is_empty());
    }

    #[tokio::test]
    async fn test_open_is_unsupported() {
        let resolver = RewriteResolver::new(RewriteConfig::default()).unwrap();
        let streams = vec![LiveStreamInfo {
            unique_id: "ls-1".to_string(),
            media_source_id: "ch1".to_string(),
        }];

        let err = resolver.open("token", &streams).await.unwrap_err();
        assert!(matches!(err, ProviderError::Unsupported(_)));

        let err = resolver.open("", &[]).await.unwrap_err();
        assert!(matches!(err, ProviderError::Unsupported(_)));
        assert_eq!(err.to_string(), "Unsupported operation: rewrite provider cannot open media sources");
    }
}
