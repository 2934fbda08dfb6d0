//! Rewrite webhook wire types

use serde::{Deserialize, Serialize};

/// Body POSTed to the rewrite webhook.
///
/// Built fresh for every call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRequest {
    /// Item's native path, empty when the item has none
    pub original_url: String,
    /// Acting user id, or "unknown"
    pub user_id: String,
    pub channel_id: String,
    pub channel_name: String,
}

impl RewriteRequest {
    #[must_use]
    pub fn new(
        original_url: impl Into<String>,
        user_id: impl Into<String>,
        channel_id: impl Into<String>,
        channel_name: impl Into<String>,
    ) -> Self {
        Self {
            original_url: original_url.into(),
            user_id: user_id.into(),
            channel_id: channel_id.into(),
            channel_name: channel_name.into(),
        }
    }
}
