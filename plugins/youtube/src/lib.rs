//! Asynchronous client for the YouTube Data API, as used by the YouTube scope.

pub mod accounts;
pub mod youtube_api;

pub use youtube_api::YouTubeClient;
