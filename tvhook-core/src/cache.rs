//! Rewrite result cache (Moka in-memory)
//!
//! Only successful rewrites are stored; fallbacks are always recomputed.

use std::time::Duration;
use tvhook_rewrite::RewriteRequest;

/// Longest accepted entry lifetime (one year); moka panics well above this.
pub const MAX_CACHE_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Identifies one rewrite answer: same channel, same user, same source URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RewriteKey {
    channel_id: String,
    user_id: String,
    original_url: String,
}

impl From<&RewriteRequest> for RewriteKey {
    fn from(request: &RewriteRequest) -> Self {
        Self {
            channel_id: request.channel_id.clone(),
            user_id: request.user_id.clone(),
            original_url: request.original_url.clone(),
        }
    }
}

#[derive(Clone)]
pub struct RewriteCache {
    inner: moka::future::Cache<RewriteKey, String>,
}

impl RewriteCache {
    #[must_use]
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        let inner = moka::future::CacheBuilder::new(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { inner }
    }

    pub async fn get(&self, request: &RewriteRequest) -> Option<String> {
        let url = self.inner.get(&RewriteKey::from(request)).await;
        if url.is_some() {
            tracing::debug!(channel_id = %request.channel_id, user_id = %request.user_id, "Rewrite cache hit");
        }
        url
    }

    pub async fn insert(&self, request: &RewriteRequest, url: String) {
        self.inner.insert(RewriteKey::from(request), url).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hit_requires_same_user_and_source() {
        let cache = RewriteCache::new(100, Duration::from_secs(60));
        let request = RewriteRequest::new("http://origin/ch1", "u-1", "ch1", "One");
        cache.insert(&request, "http://cdn/ch1?u=1".to_string()).await;

        assert_eq!(cache.get(&request).await.as_deref(), Some("http://cdn/ch1?u=1"));

        let other_user = RewriteRequest::new("http://origin/ch1", "u-2", "ch1", "One");
        assert!(cache.get(&other_user).await.is_none());

        let other_source = RewriteRequest::new("http://origin/ch1-hd", "u-1", "ch1", "One");
        assert!(cache.get(&other_source).await.is_none());
    }

    #[tokio::test]
    async fn test_channel_name_is_not_part_of_key() {
        let cache = RewriteCache::new(100, Duration::from_secs(60));
        cache
            .insert(
                &RewriteRequest::new("", "unknown", "ch1", "Old Name"),
                "http://cdn/ch1".to_string(),
            )
            .await;

        let renamed = RewriteRequest::new("", "unknown", "ch1", "New Name");
        assert_eq!(cache.get(&renamed).await.as_deref(), Some("http://cdn/ch1"));
    }
}
