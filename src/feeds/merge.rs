use super::{fetcher::SourceOutcome, types::FeedItem};
use crate::errors::SourceError;

/// Result of merging every source's outcome.
#[derive(Debug, Default)]
pub struct Merged {
    pub items: Vec<FeedItem>,
    /// Sources left out, with the reason, in configuration order.
    pub skipped: Vec<(String, SourceError)>,
}

impl Merged {
    /// True when there was at least one source and none of them could be
    /// reached at all.
    pub fn all_unreachable(&self, source_count: usize) -> bool {
        source_count > 0
            && self.skipped.len() == source_count
            && self.skipped.iter().all(|(_, e)| e.is_transport())
    }
}

/// Concatenate the items of every `ok` feed, in source order, and derive
/// each item's cover image. Anything else is logged and left out.
///
/// Items themselves are not validated; the output is not sorted.
pub fn merge(outcomes: Vec<SourceOutcome>) -> Merged {
    let mut merged = Merged::default();

    for SourceOutcome { source, result } in outcomes {
        let raw = match result {
            Ok(raw) if raw.is_ok() => raw,
            Ok(raw) => {
                let err = SourceError::NotOk {
                    status: raw.status,
                    message: raw.message,
                };
                tracing::warn!(source = %source, error = %err, "Skipping feed");
                merged.skipped.push((source, err));
                continue;
            }
            Err(err) => {
                tracing::warn!(source = %source, error = %err, "Skipping feed");
                merged.skipped.push((source, err));
                continue;
            }
        };

        tracing::debug!(source = %source, items = raw.items.len(), "Feed resolved");
        merged
            .items
            .extend(raw.items.into_iter().map(FeedItem::with_cover_image));
    }

    merged
}
