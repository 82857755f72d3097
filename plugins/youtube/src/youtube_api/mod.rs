//! YouTube Data API v3 client library.
//!
//! This module wraps the parts of the YouTube Data API a browsing scope needs (search, charts,
//! channels, playlists, subscriptions, comments, ratings) behind typed operations on
//! [`YouTubeClient`].
//!
//! # How a call flows
//!
//! 1. An operation resolves a fresh [`ClientConfig`] from the [`AccountService`](crate::accounts::AccountService)
//!    and the environment, while holding the client's config lock.
//! 2. The request is built: a bearer token when an account is signed in, the API key otherwise.
//! 3. The request is handed to the client's single worker thread and a [`PendingResult`] is
//!    returned right away.
//! 4. On the worker, the body is read chunk by chunk (each chunk checks for [`YouTubeClient::cancel`]),
//!    gzip-decompressed for GETs, parsed leniently as JSON, checked for a success status and
//!    finally decoded into the operation's result type.
//!
//! List endpoints may return items of several kinds in one response; [`types::classify`]
//! picks out the ones an operation asked for.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use youtube_scope::accounts::StoredAccounts;
//! use youtube_scope::youtube_api::{ClientConfig, YouTubeClient};
//!
//! # async fn example() -> eyre::Result<()> {
//! let accounts = StoredAccounts::load("client-id", "client-secret", "tokens.json")?;
//! let client = YouTubeClient::new(Arc::new(accounts), ClientConfig::default())?;
//!
//! let results = client.search("rust programming", 10, "").await?;
//! for video in results.videos() {
//!     println!("{} ({})", video.snippet.title, video.watch_url());
//! }
//! # Ok(())
//! # }
//! ```

pub mod channel_sections;
pub mod channels;
pub mod client;
pub mod comments;
pub mod config;
pub mod engine;
pub mod error;
pub mod guide_categories;
pub mod playlists;
pub mod request;
pub mod response;
pub mod search;
pub mod subscriptions;
pub mod types;
pub mod videos;

// Re-export main types for convenience
pub use client::YouTubeClient;
pub use config::{ClientConfig, OverrideSource, Overrides};
pub use engine::{PendingResult, Progress};
pub use error::Error;
pub use types::{PageInfo, ResourceId, classify, was_successful};

pub use channel_sections::ChannelSection;
pub use channels::{Channel, ChannelSnippet, ChannelStatistics};
pub use comments::Comment;
pub use guide_categories::GuideCategory;
pub use playlists::{Playlist, PlaylistItem};
pub use search::SearchListResponse;
pub use subscriptions::{Subscription, SubscriptionItem};
pub use videos::{Video, VideoSnippet, VideoStatistics};
