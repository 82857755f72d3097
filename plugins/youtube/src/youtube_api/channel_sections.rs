//! YouTube ChannelSections API types.

use serde::{Deserialize, Serialize};

/// A `channelSection` resource: a set of featured videos, playlists or channels on a channel
/// page.
///
/// See: <https://developers.google.com/youtube/v3/docs/channelSections#resource>
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelSection {
    pub kind: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<ChannelSectionSnippet>,
    pub content_details: ChannelSectionContentDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelSectionSnippet {
    /// The section type, such as `singlePlaylist` or `multipleChannels`.
    #[serde(rename = "type")]
    pub section_type: String,
    pub channel_id: String,
    pub title: Option<String>,
    pub position: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelSectionContentDetails {
    /// Playlist IDs featured in the section.
    pub playlists: Vec<String>,
    /// Channel IDs featured in the section.
    pub channels: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_content_details_only() {
        let section: ChannelSection = serde_json::from_value(json!({
            "kind": "youtube#channelSection",
            "id": "UC.s1",
            "contentDetails": { "playlists": ["PL1", "PL2"] }
        }))
        .unwrap();
        assert_eq!(section.content_details.playlists, vec!["PL1", "PL2"]);
        assert!(section.content_details.channels.is_empty());
        assert!(section.snippet.is_none());
    }
}
