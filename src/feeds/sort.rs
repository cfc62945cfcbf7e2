use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::cmp::Reverse;

use super::types::FeedItem;

/// Parse a feed publication date.
///
/// Accepts RFC 3339, RFC 2822, the proxy's `YYYY-MM-DD HH:MM:SS` (UTC) and a
/// bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Sort newest first.
///
/// Items whose date is missing or unparseable go after every dated item.
/// The sort is stable, so items with equal keys keep their merged order;
/// callers should not rely on that order.
pub fn sort_newest_first(items: &mut [FeedItem]) {
    // `None < Some(_)`, so reversing puts undated items last.
    items.sort_by_key(|item| Reverse(item.pub_date().and_then(parse_pub_date)));
}
