use futures_util::future::join_all;
use reqwest::Client;

use super::types::RawFeedResult;
use crate::{config::FeedConfig, errors::SourceError};

/// What one configured source produced.
#[derive(Debug)]
pub struct SourceOutcome {
    pub source: String,
    pub result: Result<RawFeedResult, SourceError>,
}

/// Fetch every configured source through the conversion proxy.
///
/// All requests run concurrently and every one is awaited; a failing
/// source is reported in its own outcome and never cancels the others.
/// Outcomes come back in configuration order.
pub async fn fetch_all(client: &Client, config: &FeedConfig) -> Vec<SourceOutcome> {
    let fetches = config.sources.iter().map(|source| async move {
        let result = fetch_one(client, &config.proxy_url, source).await;
        SourceOutcome {
            source: source.clone(),
            result,
        }
    });

    join_all(fetches).await
}

async fn fetch_one(
    client: &Client,
    proxy_url: &str,
    source: &str,
) -> Result<RawFeedResult, SourceError> {
    tracing::debug!(source = source, "Fetching feed");

    let response = client
        .get(proxy_url)
        .query(&[("rss_url", source)])
        .header("Accept", "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        // rss2json answers bad feeds with 4xx and a `status: error` body;
        // surface its message when there is one.
        let body = response.text().await.unwrap_or_default();
        return Err(match serde_json::from_str::<RawFeedResult>(&body) {
            Ok(raw) if !raw.is_ok() => SourceError::NotOk {
                status: raw.status,
                message: raw.message,
            },
            _ => SourceError::HttpStatus(status),
        });
    }

    let body = response.text().await?;
    serde_json::from_str::<RawFeedResult>(&body).map_err(|e| SourceError::Decode(e.to_string()))
}
