//! YouTube GuideCategories API types.

use serde::{Deserialize, Serialize};

/// A `guideCategory` resource: a category YouTube associates with featured channels.
///
/// See: <https://developers.google.com/youtube/v3/docs/guideCategories#resource>
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideCategory {
    pub kind: String,
    pub id: String,
    pub snippet: GuideCategorySnippet,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GuideCategorySnippet {
    pub channel_id: String,
    pub title: String,
}
