//! YouTube Playlists and PlaylistItems API types.

use crate::youtube_api::types::{ResourceId, SearchResultId, Thumbnails};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A `playlist` resource represents a YouTube playlist.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlists#resource>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Playlist {
    pub kind: String,
    pub id: ResourceId,
    pub snippet: PlaylistSnippet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_details: Option<PlaylistContentDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaylistSnippet {
    pub published_at: Option<Timestamp>,
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub thumbnails: Thumbnails,
    pub channel_title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaylistContentDetails {
    /// The number of videos in the playlist.
    pub item_count: u32,
}

/// A `playlistItem` resource identifies a video included in a playlist.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#resource>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaylistItem {
    pub kind: String,
    pub id: String,
    pub snippet: PlaylistItemSnippet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_details: Option<PlaylistItemContentDetails>,
}

impl PlaylistItem {
    /// The ID of the video this item refers to.
    pub fn video_id(&self) -> Option<&str> {
        self.content_details
            .as_ref()
            .map(|details| details.video_id.as_str())
            .filter(|id| !id.is_empty())
            .or(self.snippet.resource_id.video_id.as_deref())
    }
}

/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#snippet>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    pub published_at: Option<Timestamp>,
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub thumbnails: Thumbnails,
    pub channel_title: String,
    pub playlist_id: String,
    /// Zero-based position of the item within the playlist.
    pub position: u32,
    pub resource_id: SearchResultId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaylistItemContentDetails {
    pub video_id: String,
    pub video_published_at: Option<Timestamp>,
}

/// Request body for `playlistItems.insert`.
#[derive(Debug, Serialize)]
pub(crate) struct PlaylistItemInsert<'a> {
    snippet: PlaylistItemInsertSnippet<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemInsertSnippet<'a> {
    playlist_id: &'a str,
    resource_id: SearchResultId,
}

impl<'a> PlaylistItemInsert<'a> {
    pub(crate) fn new(video_id: &str, playlist_id: &'a str) -> Self {
        Self {
            snippet: PlaylistItemInsertSnippet {
                playlist_id,
                resource_id: SearchResultId {
                    kind: "youtube#video".to_string(),
                    video_id: Some(video_id.to_string()),
                    ..SearchResultId::default()
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn video_id_prefers_content_details() {
        let item: PlaylistItem = serde_json::from_value(json!({
            "kind": "youtube#playlistItem",
            "id": "UExp",
            "snippet": {
                "title": "Episode 1",
                "playlistId": "PL1",
                "position": 3,
                "resourceId": { "kind": "youtube#video", "videoId": "from-snippet" }
            },
            "contentDetails": { "videoId": "from-details" }
        }))
        .unwrap();
        assert_eq!(item.video_id(), Some("from-details"));
        assert_eq!(item.snippet.position, 3);

        let item: PlaylistItem = serde_json::from_value(json!({
            "snippet": { "resourceId": { "kind": "youtube#video", "videoId": "from-snippet" } }
        }))
        .unwrap();
        assert_eq!(item.video_id(), Some("from-snippet"));
    }

    #[test]
    fn insert_body_shape() {
        let body = serde_json::to_value(PlaylistItemInsert::new("vid", "PL1")).unwrap();
        assert_eq!(
            body,
            json!({
                "snippet": {
                    "playlistId": "PL1",
                    "resourceId": { "kind": "youtube#video", "videoId": "vid" }
                }
            })
        );
    }
}
