//! Shared types and decoding helpers for the YouTube API client.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The `kind` that search responses wrap every result in.
///
/// The real resource kind of such an item lives one level down, in `id.kind`.
pub const SEARCH_RESULT_KIND: &str = "youtube#searchResult";

/// Resolves the kind of one list item, looking through search-result wrappers.
pub fn item_kind(item: &Value) -> &str {
    let kind = item["kind"].as_str().unwrap_or_default();
    if kind == SEARCH_RESULT_KIND {
        item["id"]["kind"].as_str().unwrap_or_default()
    } else {
        kind
    }
}

/// Decodes the items whose kind is `expected_kind`, in order.
///
/// Items of any other kind are skipped, as are matching items that fail to decode.
pub fn classify_items<T: DeserializeOwned>(expected_kind: &str, items: &[Value]) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item_kind(item) == expected_kind)
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::debug!(kind = expected_kind, index, error = %e, "skipping undecodable item");
                None
            }
        })
        .collect()
}

/// Decodes the `items` of a list response, keeping only those of `expected_kind`.
///
/// A missing or non-array `items` yields nothing.
pub fn classify<T: DeserializeOwned>(expected_kind: &str, root: &Value) -> Vec<T> {
    match root["items"].as_array() {
        Some(items) => classify_items(expected_kind, items),
        None => Vec::new(),
    }
}

/// Whether a write call reported success.
///
/// Some writes (rating, for one) answer `204 No Content`, which parses as `null` and counts as
/// success. Anything else must identify a resource by a non-empty `id` or `kind`.
pub fn was_successful(root: &Value) -> bool {
    if root.is_null() {
        return true;
    }
    let non_empty = |field: &str| root[field].as_str().is_some_and(|s| !s.is_empty());
    non_empty("id") || non_empty("kind")
}

/// A resource identifier.
///
/// Most resources carry their ID as a plain string; search results carry an object naming the
/// kind of the result and its ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Id(String),
    Search(SearchResultId),
}

impl Default for ResourceId {
    fn default() -> Self {
        Self::Id(String::new())
    }
}

impl ResourceId {
    /// The bare ID, whatever kind of resource it points at.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Search(id) => id
                .video_id
                .as_deref()
                .or(id.channel_id.as_deref())
                .or(id.playlist_id.as_deref())
                .unwrap_or_default(),
        }
    }
}

/// The `id` object of a search result, also used for `resourceId` references.
///
/// See: <https://developers.google.com/youtube/v3/docs/search#resource>
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    #[serde(default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlist_id: Option<String>,
}

/// One thumbnail image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Thumbnails keyed by size name (`default`, `medium`, `high`, ...).
pub type Thumbnails = BTreeMap<String, Thumbnail>;

/// Picks the largest commonly available thumbnail URL.
pub fn best_thumbnail(thumbnails: &Thumbnails) -> Option<&str> {
    ["maxres", "standard", "high", "medium", "default"]
        .iter()
        .find_map(|size| thumbnails.get(*size))
        .map(|thumbnail| thumbnail.url.as_str())
}

/// Paging details for lists of resources.
///
/// See: <https://developers.google.com/youtube/v3/docs/pageInfo>
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// The total number of results in the result set.
    #[serde(rename = "totalResults", default)]
    pub total_results: u32,
    /// The number of results included in the API response.
    #[serde(rename = "resultsPerPage", default)]
    pub results_per_page: u32,
}
