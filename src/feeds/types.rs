use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::cover::first_img_src;

/// The status value the conversion proxy uses for a resolved feed.
pub const STATUS_OK: &str = "ok";

/// Key the derived display image is stored under.
pub const COVER_IMAGE_KEY: &str = "coverImage";

/// One proxy response, decoded as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFeedResult {
    pub status: String,
    /// Set by the proxy when `status` is not `ok`.
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<FeedItem>,
}

impl RawFeedResult {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A single entry of a converted feed, kept exactly as the proxy sent it.
///
/// Fields are read leniently: a value of an unexpected type is treated as
/// absent, never as an error. The only change ever made to an item is
/// the `coverImage` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedItem(Value);

impl FeedItem {
    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    pub fn link(&self) -> Option<&str> {
        self.str_field("link")
    }

    pub fn pub_date(&self) -> Option<&str> {
        self.str_field("pubDate")
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.str_field("thumbnail")
    }

    pub fn content(&self) -> Option<&str> {
        self.str_field("content")
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.str_field(COVER_IMAGE_KEY)
    }

    /// Raw access to any field, including ones the pipeline never reads.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The display image: the explicit thumbnail when there is one,
    /// otherwise the first `<img>` source in `content`.
    ///
    /// The proxy reports a missing thumbnail as `""`, so empty counts as
    /// absent.
    pub fn derive_cover_image(&self) -> Option<String> {
        match self.thumbnail() {
            Some(thumb) if !thumb.is_empty() => Some(thumb.to_string()),
            _ => self.content().and_then(first_img_src).map(str::to_string),
        }
    }

    /// Set `coverImage` from the derivation, or remove it when there is
    /// nothing to derive. Items that are not JSON objects are left alone.
    pub fn with_cover_image(mut self) -> Self {
        let cover = self.derive_cover_image();
        if let Value::Object(map) = &mut self.0 {
            match cover {
                Some(url) => {
                    map.insert(COVER_IMAGE_KEY.to_string(), Value::String(url));
                }
                None => {
                    map.remove(COVER_IMAGE_KEY);
                }
            }
        }
        self
    }
}

impl From<Value> for FeedItem {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
