pub mod cover;
pub mod fetcher;
pub mod merge;
pub mod sort;
pub mod types;

use reqwest::Client;
use std::time::{Duration, Instant};

use crate::{
    config::FeedConfig,
    errors::{AppError, AppResult},
};
pub use types::{FeedItem, RawFeedResult};

/// Fetch, merge and sort every configured feed.
///
/// Sources that fail or report a non-`ok` status are skipped, so this only
/// errors when not a single source could be reached.
pub async fn aggregate(client: &Client, config: &FeedConfig) -> AppResult<Vec<FeedItem>> {
    let started = Instant::now();

    let outcomes = fetcher::fetch_all(client, config).await;
    let merged = merge::merge(outcomes);

    if merged.all_unreachable(config.sources.len()) {
        let reasons = merged
            .skipped
            .iter()
            .map(|(source, err)| format!("{source}: {err}"))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(AppError::Transport(format!(
            "no feed source could be reached ({reasons})"
        )));
    }

    let mut items = merged.items;
    sort::sort_newest_first(&mut items);

    tracing::info!(
        sources = config.sources.len(),
        skipped = merged.skipped.len(),
        items = items.len(),
        duration_ms = as_millis(started.elapsed()),
        "Feed aggregation completed"
    );

    Ok(items)
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn as_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
