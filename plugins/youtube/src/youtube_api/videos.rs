//! YouTube Videos API types.

use crate::youtube_api::types::{ResourceId, Thumbnails};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A `video` resource represents a YouTube video.
///
/// Videos come back both from `videos.list` (where `id` is a string) and from `search.list`
/// (where `id` is an object naming the video); [`ResourceId`] covers both.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#resource>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Video {
    pub kind: String,
    /// The ID that YouTube uses to uniquely identify the video.
    pub id: ResourceId,
    pub snippet: VideoSnippet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<VideoStatistics>,
}

impl Video {
    /// The watch page of this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id.as_str())
    }
}

/// Basic details about the video.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#snippet>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoSnippet {
    pub published_at: Option<Timestamp>,
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub thumbnails: Thumbnails,
    pub channel_title: String,
    pub category_id: Option<String>,
    /// `none`, `upcoming` or `live`.
    pub live_broadcast_content: Option<String>,
}

/// Statistics about the video.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#statistics>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoStatistics {
    /// The number of times the video has been viewed.
    pub view_count: Option<String>,
    /// The number of users who have indicated that they liked the video.
    pub like_count: Option<String>,
    /// Only visible to the video owner.
    pub dislike_count: Option<String>,
    /// Deprecated; always `0`.
    pub favorite_count: Option<String>,
    pub comment_count: Option<String>,
}
