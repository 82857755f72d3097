//! The YouTube API client and its operation catalog.

use crate::accounts::AccountService;
use crate::youtube_api::channel_sections::ChannelSection;
use crate::youtube_api::channels::Channel;
use crate::youtube_api::comments::{Comment, CommentThreadInsert};
use crate::youtube_api::config::{ClientConfig, ConfigResolver, OverrideSource};
use crate::youtube_api::engine::{Engine, PendingResult, Progress};
use crate::youtube_api::error::Error;
use crate::youtube_api::guide_categories::GuideCategory;
use crate::youtube_api::playlists::{Playlist, PlaylistItem, PlaylistItemInsert};
use crate::youtube_api::request::{Verb, build_request};
use crate::youtube_api::response;
use crate::youtube_api::search::SearchListResponse;
use crate::youtube_api::subscriptions::{Subscription, SubscriptionInsert, SubscriptionItem};
use crate::youtube_api::types::{classify, was_successful};
use crate::youtube_api::videos::Video;
use bytes::{Bytes, BytesMut};
use eyre::Context;
use http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_stream::StreamExt;
use tracing::instrument;

/// Client for the YouTube Data API v3.
///
/// Every operation returns a [`PendingResult`] immediately; the request itself runs on the
/// client's worker thread. Before each request the configuration is resolved afresh from the
/// account service, so a token revoked or refreshed elsewhere takes effect on the next call.
///
/// Dropping the client stops its worker. Calls still in flight resolve to
/// [`Error::Abandoned`] and their decoders never run.
pub struct YouTubeClient {
    // dropped first, so no request outlives the rest of the client
    engine: Engine,
    http: reqwest::Client,
    resolver: ConfigResolver,
    /// The most recently resolved configuration. Held locked while a request is built.
    config: Mutex<ClientConfig>,
    cancelled: Arc<AtomicBool>,
}

impl std::fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("resolver", &self.resolver)
            .field("cancelled", &self.cancelled.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl YouTubeClient {
    /// Creates a client that reads its overrides from the process environment.
    ///
    /// # Arguments
    ///
    /// * `accounts` - Queried for credentials before every request
    /// * `defaults` - API root, API key and headers every request starts from
    pub fn new(accounts: Arc<dyn AccountService>, defaults: ClientConfig) -> eyre::Result<Self> {
        Self::with_overrides(accounts, defaults, OverrideSource::Environment)
    }

    /// Creates a client with an explicit source of configuration overrides.
    pub fn with_overrides(
        accounts: Arc<dyn AccountService>,
        defaults: ClientConfig,
        overrides: OverrideSource,
    ) -> eyre::Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("build YouTube HTTP client")?;
        let engine = Engine::start().context("start YouTube client engine")?;

        Ok(Self {
            engine,
            http,
            config: Mutex::new(defaults.clone()),
            resolver: ConfigResolver::new(defaults, overrides, accounts),
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    fn lock_config(&self) -> MutexGuard<'_, ClientConfig> {
        self.config.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Aborts every in-flight request at its next progress check, and every later one too,
    /// until [`Self::reset_cancellation`] is called.
    ///
    /// Cancellation does not stop new calls from being submitted.
    pub fn cancel(&self) {
        tracing::debug!("cancelling YouTube API requests");
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn reset_cancellation(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }

    /// What the next progress check of any request will report.
    pub fn progress(&self) -> Progress {
        Progress::report(&self.cancelled)
    }

    /// Whether the account service currently reports a signed-in account.
    pub fn is_authenticated(&self) -> bool {
        let mut config = self.lock_config();
        *config = self.resolver.resolve();
        config.authenticated
    }

    /// The configuration the most recent request was built with.
    pub fn config(&self) -> ClientConfig {
        self.lock_config().clone()
    }

    /// Issues a GET. The response body is expected to be gzip-compressed.
    pub fn get<T, F>(&self, path: &[&str], query: &[(&str, &str)], decode: F) -> PendingResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Value) -> eyre::Result<T> + Send + 'static,
    {
        self.submit(Verb::Get, path, query, decode)
    }

    /// Issues a POST carrying `body`. An empty `content_type` sends no `Content-Type` header.
    pub fn post<T, F>(
        &self,
        path: &[&str],
        query: &[(&str, &str)],
        body: Bytes,
        content_type: &str,
        decode: F,
    ) -> PendingResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Value) -> eyre::Result<T> + Send + 'static,
    {
        let verb = Verb::Post {
            body,
            content_type: content_type.to_string(),
        };
        self.submit(verb, path, query, decode)
    }

    /// Issues a DELETE, tunnelled through POST with `X-HTTP-Method-Override`.
    pub fn delete<T, F>(
        &self,
        path: &[&str],
        query: &[(&str, &str)],
        decode: F,
    ) -> PendingResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Value) -> eyre::Result<T> + Send + 'static,
    {
        self.submit(Verb::Delete, path, query, decode)
    }

    fn post_json<T, F>(
        &self,
        path: &[&str],
        query: &[(&str, &str)],
        body: &impl serde::Serialize,
        decode: F,
    ) -> PendingResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Value) -> eyre::Result<T> + Send + 'static,
    {
        match Verb::post_json(body) {
            Ok(verb) => self.submit(verb, path, query, decode),
            Err(e) => PendingResult::ready(Err(Error::decode(e.wrap_err("encode request body")))),
        }
    }

    fn submit<T, F>(
        &self,
        verb: Verb,
        path: &[&str],
        query: &[(&str, &str)],
        decode: F,
    ) -> PendingResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Value) -> eyre::Result<T> + Send + 'static,
    {
        let mut config = self.lock_config();
        *config = self.resolver.resolve();

        let request = match build_request(&config, &verb, path, query) {
            Ok(request) => request,
            Err(e) => return PendingResult::ready(Err(e)),
        };

        tracing::debug!(
            method = %request.method(),
            path = %path.join("/"),
            authenticated = config.authenticated,
            "submitting YouTube API request"
        );

        let (tx, pending) = PendingResult::channel();
        let http = self.http.clone();
        let cancelled = Arc::clone(&self.cancelled);
        self.engine.submit(async move {
            let result = match execute(&http, request, &cancelled).await {
                Ok((status, body)) => response::handle(&verb, status, &body, decode),
                Err(e) => Err(e),
            };
            if let Err(e) = &result {
                tracing::debug!(error = %e, "YouTube API request failed");
            }
            // the caller may have stopped listening
            let _ = tx.send(result);
        });

        pending
    }

    /// Searches for videos matching `query`.
    ///
    /// `max_results` of zero and an empty `category_id` leave the API defaults in place.
    ///
    /// See: <https://developers.google.com/youtube/v3/docs/search/list>
    #[instrument(skip(self))]
    pub fn search(
        &self,
        query: &str,
        max_results: u32,
        category_id: &str,
    ) -> PendingResult<SearchListResponse> {
        let max_results_string = max_results.to_string();
        let mut query_params = vec![("part", "snippet"), ("type", "video"), ("q", query)];
        if max_results > 0 {
            query_params.push(("maxResults", max_results_string.as_str()));
        }
        if !category_id.is_empty() {
            query_params.push(("videoCategoryId", category_id));
        }

        self.get(&["youtube", "v3", "search"], &query_params, |root| {
            if root.is_null() {
                return Ok(SearchListResponse::default());
            }
            SearchListResponse::deserialize(root).context("decode search response")
        })
    }

    /// See: <https://developers.google.com/youtube/v3/docs/guideCategories/list>
    #[instrument(skip(self))]
    pub fn guide_categories(
        &self,
        region_code: &str,
        locale: &str,
    ) -> PendingResult<Vec<GuideCategory>> {
        self.get(
            &["youtube", "v3", "guideCategories"],
            &[("part", "snippet"), ("regionCode", region_code), ("hl", locale)],
            |root| Ok(classify("youtube#guideCategory", root)),
        )
    }

    /// The authenticated user's subscriptions (first 50).
    #[instrument(skip(self))]
    pub fn subscription_channels(&self) -> PendingResult<Vec<Subscription>> {
        self.get(
            &["youtube", "v3", "subscriptions"],
            &[("part", "snippet"), ("mine", "true"), ("maxResults", "50")],
            |root| Ok(classify("youtube#subscription", root)),
        )
    }

    /// The authenticated user's own channel(s), with content details and statistics.
    #[instrument(skip(self))]
    pub fn auth_user_info(&self) -> PendingResult<Vec<Channel>> {
        self.get(
            &["youtube", "v3", "channels"],
            &[
                ("part", "snippet,contentDetails,statistics"),
                ("mine", "true"),
            ],
            |root| Ok(classify("youtube#channel", root)),
        )
    }

    /// The ID of a channel's uploads playlist, or an empty string if the channel has none.
    #[instrument(skip(self))]
    pub fn subscription_channel_uploads(&self, channel_id: &str) -> PendingResult<String> {
        self.get(
            &["youtube", "v3", "channels"],
            &[("part", "snippet,contentDetails"), ("id", channel_id)],
            |root| {
                Ok(root["items"][0]["contentDetails"]["relatedPlaylists"]["uploads"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string())
            },
        )
    }

    /// The latest uploads in a subscribed channel's uploads playlist (first 50).
    #[instrument(skip(self))]
    pub fn subscription_items(&self, playlist_id: &str) -> PendingResult<Vec<SubscriptionItem>> {
        self.get(
            &["youtube", "v3", "playlistItems"],
            &[
                ("part", "snippet"),
                ("playlistId", playlist_id),
                ("maxResults", "50"),
            ],
            |root| Ok(classify("youtube#playlistItem", root)),
        )
    }

    #[instrument(skip(self))]
    pub fn category_channels(&self, category_id: &str) -> PendingResult<Vec<Channel>> {
        self.get(
            &["youtube", "v3", "channels"],
            &[("part", "snippet,statistics"), ("categoryId", category_id)],
            |root| Ok(classify("youtube#channel", root)),
        )
    }

    #[instrument(skip(self))]
    pub fn channels_statistics(&self, channel_id: &str) -> PendingResult<Vec<Channel>> {
        self.get(
            &["youtube", "v3", "channels"],
            &[("part", "statistics,snippet"), ("id", channel_id)],
            |root| Ok(classify("youtube#channel", root)),
        )
    }

    /// See: <https://developers.google.com/youtube/v3/docs/channelSections/list>
    #[instrument(skip(self))]
    pub fn channel_sections(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> PendingResult<Vec<ChannelSection>> {
        let max_results_string = max_results.to_string();
        self.get(
            &["youtube", "v3", "channelSections"],
            &[
                ("part", "contentDetails"),
                ("channelId", channel_id),
                ("maxResults", max_results_string.as_str()),
            ],
            |root| Ok(classify("youtube#channelSection", root)),
        )
    }

    /// A channel's most viewed videos, found through search.
    #[instrument(skip(self))]
    pub fn channel_videos(&self, channel_id: &str) -> PendingResult<Vec<Video>> {
        self.get(
            &["youtube", "v3", "search"],
            &[
                ("part", "snippet"),
                ("type", "video"),
                ("order", "viewCount"),
                ("channelId", channel_id),
            ],
            |root| Ok(classify("youtube#video", root)),
        )
    }

    /// Videos on a chart such as `mostPopular`, optionally narrowed to one category.
    #[instrument(skip(self))]
    pub fn chart_videos(
        &self,
        chart_name: &str,
        region_code: &str,
        category_id: &str,
    ) -> PendingResult<Vec<Video>> {
        let mut query_params = vec![
            ("part", "snippet"),
            ("regionCode", region_code),
            ("chart", chart_name),
        ];
        if !category_id.is_empty() {
            query_params.push(("videoCategoryId", category_id));
        }

        self.get(&["youtube", "v3", "videos"], &query_params, |root| {
            Ok(classify("youtube#video", root))
        })
    }

    /// Looks up videos by ID (comma-separated for several) with snippet and statistics.
    #[instrument(skip(self))]
    pub fn videos(&self, video_id: &str) -> PendingResult<Vec<Video>> {
        self.get(
            &["youtube", "v3", "videos"],
            &[("part", "snippet,statistics"), ("id", video_id)],
            |root| Ok(classify("youtube#video", root)),
        )
    }

    #[instrument(skip(self))]
    pub fn channel_playlists(&self, channel_id: &str) -> PendingResult<Vec<Playlist>> {
        self.get(
            &["youtube", "v3", "playlists"],
            &[("part", "snippet,contentDetails"), ("channelId", channel_id)],
            |root| Ok(classify("youtube#playlist", root)),
        )
    }

    #[instrument(skip(self))]
    pub fn playlist_items(&self, playlist_id: &str) -> PendingResult<Vec<PlaylistItem>> {
        self.get(
            &["youtube", "v3", "playlistItems"],
            &[("part", "snippet,contentDetails"), ("playlistId", playlist_id)],
            |root| Ok(classify("youtube#playlistItem", root)),
        )
    }

    /// The 15 most recent top-level comments on a video, as plain text.
    #[instrument(skip(self))]
    pub fn video_comments(&self, video_id: &str) -> PendingResult<Vec<Comment>> {
        self.get(
            &["youtube", "v3", "commentThreads"],
            &[
                ("part", "snippet"),
                ("order", "time"),
                ("videoId", video_id),
                ("textFormat", "plainText"),
                ("maxResults", "15"),
            ],
            |root| Ok(classify("youtube#commentThread", root)),
        )
    }

    /// Posts a new top-level comment on a video.
    ///
    /// Requires an authenticated account.
    #[instrument(skip(self, text))]
    pub fn post_comment(&self, video_id: &str, text: &str) -> PendingResult<bool> {
        self.post_json(
            &["youtube", "v3", "commentThreads"],
            &[("part", "snippet")],
            &CommentThreadInsert::new(video_id, text),
            |root| Ok(was_successful(root)),
        )
    }

    /// Likes (`likes == true`) or dislikes a video.
    ///
    /// The API answers `204 No Content` on success.
    #[instrument(skip(self))]
    pub fn rate(&self, video_id: &str, likes: bool) -> PendingResult<bool> {
        let rating = if likes { "like" } else { "dislike" };
        self.submit(
            Verb::post_empty(),
            &["youtube", "v3", "videos", "rate"],
            &[("id", video_id), ("rating", rating)],
            |root| Ok(was_successful(root)),
        )
    }

    /// The authenticated user's subscription to `channel_id`, if any.
    ///
    /// The returned subscription's `id` is what [`Self::unsubscribe`] takes.
    #[instrument(skip(self))]
    pub fn subscription_id(&self, channel_id: &str) -> PendingResult<Vec<Subscription>> {
        self.get(
            &["youtube", "v3", "subscriptions"],
            &[
                ("part", "snippet"),
                ("mine", "true"),
                ("forChannelId", channel_id),
            ],
            |root| Ok(classify("youtube#subscription", root)),
        )
    }

    #[instrument(skip(self))]
    pub fn subscribe(&self, channel_id: &str) -> PendingResult<bool> {
        self.post_json(
            &["youtube", "v3", "subscriptions"],
            &[("part", "snippet")],
            &SubscriptionInsert::new(channel_id),
            |root| Ok(was_successful(root)),
        )
    }

    #[instrument(skip(self))]
    pub fn unsubscribe(&self, subscription_id: &str) -> PendingResult<bool> {
        self.delete(
            &["youtube", "v3", "subscriptions"],
            &[("id", subscription_id)],
            |root| Ok(was_successful(root)),
        )
    }

    #[instrument(skip(self))]
    pub fn add_video_to_playlist(&self, video_id: &str, playlist_id: &str) -> PendingResult<bool> {
        self.post_json(
            &["youtube", "v3", "playlistItems"],
            &[("part", "snippet")],
            &PlaylistItemInsert::new(video_id, playlist_id),
            |root| Ok(was_successful(root)),
        )
    }
}

/// How often an in-flight request checks the cancellation flag while it waits on the network.
const PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Drives `work` to completion, checking for cancellation on every progress tick.
async fn until_cancelled<F: Future>(
    work: F,
    ticks: &mut Interval,
    cancelled: &AtomicBool,
) -> Result<F::Output, Error> {
    tokio::pin!(work);
    loop {
        tokio::select! {
            biased;
            _ = ticks.tick() => {
                if Progress::report(cancelled) == Progress::Abort {
                    return Err(Error::Cancelled);
                }
            }
            output = &mut work => return Ok(output),
        }
    }
}

/// Sends one request and collects its body.
///
/// Cancellation is checked before sending, periodically while waiting for headers or body
/// chunks, once the headers arrive, and after every received chunk.
async fn execute(
    http: &reqwest::Client,
    request: reqwest::Request,
    cancelled: &AtomicBool,
) -> Result<(StatusCode, Bytes), Error> {
    if Progress::report(cancelled) == Progress::Abort {
        return Err(Error::Cancelled);
    }

    let mut ticks = tokio::time::interval(PROGRESS_INTERVAL);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let response = until_cancelled(http.execute(request), &mut ticks, cancelled)
        .await?
        .map_err(Error::Transport)?;
    let status = response.status();
    if Progress::report(cancelled) == Progress::Abort {
        return Err(Error::Cancelled);
    }

    let mut body = BytesMut::new();
    let mut chunks = response.bytes_stream();
    while let Some(chunk) = until_cancelled(chunks.next(), &mut ticks, cancelled).await? {
        let chunk = chunk.map_err(Error::Transport)?;
        tracing::trace!(received = chunk.len(), total = body.len(), "response progress");
        if Progress::report(cancelled) == Progress::Abort {
            return Err(Error::Cancelled);
        }
        body.extend_from_slice(&chunk);
    }

    Ok((status, body.freeze()))
}
