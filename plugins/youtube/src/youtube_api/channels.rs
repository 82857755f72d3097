//! YouTube Channels API types.

use crate::youtube_api::types::{ResourceId, Thumbnails};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A `channel` resource contains information about a YouTube channel.
///
/// Which parts are present depends on the `part` parameter of the request that produced it, so
/// every part is optional.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#resource>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Channel {
    /// Identifies the API resource's type. The value will be `youtube#channel`.
    pub kind: String,
    /// The ID that YouTube uses to uniquely identify the channel.
    pub id: ResourceId,
    pub snippet: ChannelSnippet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ChannelStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_details: Option<ChannelContentDetails>,
}

impl Channel {
    /// The ID of the playlist holding the channel's uploads, if the response included it.
    pub fn uploads_playlist_id(&self) -> Option<&str> {
        self.content_details
            .as_ref()?
            .related_playlists
            .uploads
            .as_deref()
    }
}

/// Basic details about the channel.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#snippet>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelSnippet {
    pub title: String,
    pub description: String,
    /// The date and time that the channel was created.
    pub published_at: Option<Timestamp>,
    pub thumbnails: Thumbnails,
}

/// See: <https://developers.google.com/youtube/v3/docs/channels#statistics>
///
/// Counts are reported as decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelStatistics {
    pub view_count: Option<String>,
    pub subscriber_count: Option<String>,
    pub hidden_subscriber_count: bool,
    pub video_count: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelContentDetails {
    pub related_playlists: RelatedPlaylists,
}

/// Playlists YouTube maintains automatically for every channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedPlaylists {
    pub uploads: Option<String>,
    pub likes: Option<String>,
    pub favorites: Option<String>,
}
