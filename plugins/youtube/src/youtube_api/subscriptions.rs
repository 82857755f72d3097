//! YouTube Subscriptions API types, and the uploads of subscribed channels.

use crate::youtube_api::playlists::PlaylistItemSnippet;
use crate::youtube_api::types::{SearchResultId, Thumbnails};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A `subscription` resource: the authenticated user following one channel.
///
/// See: <https://developers.google.com/youtube/v3/docs/subscriptions#resource>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscription {
    pub kind: String,
    /// The subscription's own ID, which is what unsubscribing takes.
    pub id: String,
    pub snippet: SubscriptionSnippet,
}

impl Subscription {
    /// The ID of the channel subscribed to.
    pub fn channel_id(&self) -> Option<&str> {
        self.snippet.resource_id.channel_id.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubscriptionSnippet {
    pub published_at: Option<Timestamp>,
    /// The subscribed channel's title.
    pub title: String,
    pub description: String,
    /// The subscriber's channel.
    pub channel_id: String,
    pub resource_id: SearchResultId,
    pub thumbnails: Thumbnails,
}

/// One upload of a subscribed channel, read from that channel's uploads playlist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionItem {
    pub kind: String,
    pub id: String,
    pub snippet: PlaylistItemSnippet,
}

impl SubscriptionItem {
    pub fn video_id(&self) -> Option<&str> {
        self.snippet.resource_id.video_id.as_deref()
    }
}

/// Request body for `subscriptions.insert`.
#[derive(Debug, Serialize)]
pub(crate) struct SubscriptionInsert {
    snippet: SubscriptionInsertSnippet,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionInsertSnippet {
    resource_id: SearchResultId,
}

impl SubscriptionInsert {
    pub(crate) fn new(channel_id: &str) -> Self {
        Self {
            snippet: SubscriptionInsertSnippet {
                resource_id: SearchResultId {
                    kind: "youtube#channel".to_string(),
                    channel_id: Some(channel_id.to_string()),
                    ..SearchResultId::default()
                },
            },
        }
    }
}
