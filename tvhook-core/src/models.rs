//! Items handed in by the host and the media sources handed back

use serde::{Deserialize, Serialize};

/// The item whose playback URL is being resolved
///
/// Owned by the host; the resolver only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItemRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
}

impl MediaItemRef {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: None,
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Native path, empty when absent
    #[must_use]
    pub fn path_or_empty(&self) -> &str {
        self.path.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaProtocol {
    Http,
}

/// A playable stream, in the shape the media server expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MediaSourceDescriptor {
    pub id: String,
    /// Final playback URL
    pub path: String,
    pub protocol: MediaProtocol,
    pub name: String,
    pub requires_opening: bool,
    pub supports_direct_stream: bool,
    pub supports_direct_play: bool,
    pub supports_transcoding: bool,
    pub use_most_compatible_transcoding_profile: bool,
}

impl MediaSourceDescriptor {
    /// Direct-playable HTTP source for `item` at `url`
    #[must_use]
    pub fn http(item: &MediaItemRef, url: impl Into<String>) -> Self {
        Self {
            id: item.id.clone(),
            path: url.into(),
            protocol: MediaProtocol::Http,
            name: item.name.clone(),
            requires_opening: false,
            supports_direct_stream: true,
            supports_direct_play: true,
            supports_transcoding: true,
            use_most_compatible_transcoding_profile: true,
        }
    }
}

/// A live stream the host already has open
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveStreamInfo {
    pub unique_id: String,
    pub media_source_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_or_empty() {
        let item = MediaItemRef::new("ch1", "Channel One");
        assert_eq!(item.path_or_empty(), "");
        assert_eq!(item.with_path("http://origin/ch1").path_or_empty(), "http://origin/ch1");
    }

    #[test]
    fn test_http_descriptor_shape() {
        let item = MediaItemRef::new("ch1", "Channel One").with_path("http://origin/ch1");
        let source = MediaSourceDescriptor::http(&item, "http://cdn/ch1.m3u8");

        assert_eq!(
            serde_json::to_value(&source).unwrap(),
            json!({
                "Id": "ch1",
                "Path": "http://cdn/ch1.m3u8",
                "Protocol": "Http",
                "Name": "Channel One",
                "RequiresOpening": false,
                "SupportsDirectStream": true,
                "SupportsDirectPlay": true,
                "SupportsTranscoding": true,
                "UseMostCompatibleTranscodingProfile": true,
            })
        );
        // the item itself is untouched
        assert_eq!(item.path.as_deref(), Some("http://origin/ch1"));
    }
}
