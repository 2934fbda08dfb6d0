// Media Source Provider Trait

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{ProviderError, ResolveContext};
use crate::models::{LiveStreamInfo, MediaItemRef, MediaSourceDescriptor};

/// Media source provider
///
/// The two entry points the media server calls. Implementations are shared
/// across concurrent playback lookups.
#[async_trait]
pub trait MediaSourceProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    /// Media sources for `item`
    ///
    /// An empty list means nothing playable; this never fails.
    async fn get_media_sources(
        &self,
        item: &MediaItemRef,
        ctx: &ResolveContext<'_>,
    ) -> Vec<MediaSourceDescriptor>;

    /// Open a source that declared `requires_opening`
    async fn open_media_source(
        &self,
        open_token: &str,
        current_live_streams: &[LiveStreamInfo],
        cancel: &CancellationToken,
    ) -> Result<LiveStreamInfo, ProviderError>;
}
