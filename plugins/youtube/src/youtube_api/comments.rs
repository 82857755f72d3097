//! YouTube CommentThreads API types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A `commentThread` resource: a top-level comment and, implicitly, its replies.
///
/// See: <https://developers.google.com/youtube/v3/docs/commentThreads#resource>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub kind: String,
    pub id: String,
    pub snippet: CommentThreadSnippet,
}

impl Comment {
    pub fn author(&self) -> &str {
        &self.snippet.top_level_comment.snippet.author_display_name
    }

    pub fn text(&self) -> &str {
        let snippet = &self.snippet.top_level_comment.snippet;
        if snippet.text_display.is_empty() {
            &snippet.text_original
        } else {
            &snippet.text_display
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentThreadSnippet {
    pub channel_id: String,
    pub video_id: String,
    pub top_level_comment: TopLevelComment,
    pub can_reply: bool,
    pub total_reply_count: u32,
    pub is_public: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopLevelComment {
    pub id: String,
    pub snippet: CommentSnippet,
}

/// See: <https://developers.google.com/youtube/v3/docs/comments#snippet>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentSnippet {
    pub author_display_name: String,
    pub author_profile_image_url: String,
    pub author_channel_url: String,
    pub text_display: String,
    pub text_original: String,
    pub like_count: u64,
    pub published_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

/// Request body for `commentThreads.insert`.
#[derive(Debug, Serialize)]
pub(crate) struct CommentThreadInsert<'a> {
    snippet: InsertThreadSnippet<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InsertThreadSnippet<'a> {
    top_level_comment: InsertTopLevelComment<'a>,
}

#[derive(Debug, Serialize)]
struct InsertTopLevelComment<'a> {
    snippet: InsertCommentSnippet<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InsertCommentSnippet<'a> {
    text_original: &'a str,
    video_id: &'a str,
}

impl<'a> CommentThreadInsert<'a> {
    pub(crate) fn new(video_id: &'a str, text: &'a str) -> Self {
        Self {
            snippet: InsertThreadSnippet {
                top_level_comment: InsertTopLevelComment {
                    snippet: InsertCommentSnippet {
                        text_original: text,
                        video_id,
                    },
                },
            },
        }
    }
}
