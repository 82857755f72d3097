use eyre::Context;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_scope::accounts::StoredAccounts;
use youtube_scope::youtube_api::types::best_thumbnail;
use youtube_scope::youtube_api::{ClientConfig, YouTubeClient};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stdout().is_terminal())
        .init();

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let query = if query.is_empty() {
        "rust programming".to_string()
    } else {
        query
    };

    let accounts = StoredAccounts::load(
        std::env::var("YOUTUBE_SCOPE_CLIENT_ID").unwrap_or_default(),
        std::env::var("YOUTUBE_SCOPE_CLIENT_SECRET").unwrap_or_default(),
        "tokens.json",
    )
    .context("load stored accounts")?;
    let defaults = ClientConfig {
        api_key: std::env::var("YOUTUBE_SCOPE_API_KEY").unwrap_or_default(),
        ..ClientConfig::default()
    };
    let client = YouTubeClient::new(Arc::new(accounts), defaults)?;

    tracing::info!(authenticated = client.is_authenticated(), "client ready");

    let results = client.search(&query, 10, "").await.context("search")?;
    eprintln!("==> {} results for {query:?}", results.page_info.total_results);
    for video in results.videos() {
        eprintln!("{:<12} {}", video.id.as_str(), video.snippet.title);
        if let Some(thumbnail) = best_thumbnail(&video.snippet.thumbnails) {
            eprintln!("{:<12} {thumbnail}", "");
        }
    }

    if client.is_authenticated() {
        eprintln!("==> subscriptions");
        for subscription in client.subscription_channels().await.context("list subscriptions")? {
            eprintln!(
                "{:<26} {}",
                subscription.channel_id().unwrap_or("?"),
                subscription.snippet.title
            );
        }
    }

    Ok(())
}
