//! YouTube Search API response.
//!
//! A search returns results of several kinds at once, each wrapped as a
//! `youtube#searchResult`. The response keeps the raw items and decodes them per kind on demand.

use crate::youtube_api::channels::Channel;
use crate::youtube_api::playlists::Playlist;
use crate::youtube_api::types::{PageInfo, classify_items};
use crate::youtube_api::videos::Video;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response structure for the `search.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/search/list>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchListResponse {
    /// The value will be `youtube#searchListResponse`.
    pub kind: String,
    pub next_page_token: Option<String>,
    pub prev_page_token: Option<String>,
    pub region_code: Option<String>,
    pub page_info: PageInfo,
    pub items: Vec<Value>,
}

impl SearchListResponse {
    pub fn videos(&self) -> Vec<Video> {
        self.of_kind("youtube#video")
    }

    pub fn channels(&self) -> Vec<Channel> {
        self.of_kind("youtube#channel")
    }

    pub fn playlists(&self) -> Vec<Playlist> {
        self.of_kind("youtube#playlist")
    }

    fn of_kind<T: serde::de::DeserializeOwned>(&self, kind: &str) -> Vec<T> {
        classify_items(kind, &self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_results_by_kind() {
        let response: SearchListResponse = serde_json::from_value(json!({
            "kind": "youtube#searchListResponse",
            "nextPageToken": "CAUQAA",
            "pageInfo": { "totalResults": 1000000, "resultsPerPage": 3 },
            "items": [
                { "kind": "youtube#searchResult", "id": { "kind": "youtube#video", "videoId": "v1" }, "snippet": { "title": "one" } },
                { "kind": "youtube#searchResult", "id": { "kind": "youtube#channel", "channelId": "c1" }, "snippet": { "title": "chan" } },
                { "kind": "youtube#searchResult", "id": { "kind": "youtube#video", "videoId": "v2" }, "snippet": { "title": "two" } }
            ]
        }))
        .unwrap();

        let videos = response.videos();
        let titles: Vec<&str> = videos.iter().map(|v| v.snippet.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "two"]);
        assert_eq!(response.channels()[0].id.as_str(), "c1");
        assert!(response.playlists().is_empty());
        assert_eq!(response.next_page_token.as_deref(), Some("CAUQAA"));
        assert_eq!(response.page_info.results_per_page, 3);
    }
}
