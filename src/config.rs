use std::env;
use url::Url;

/// Feeds aggregated by `/api/feed` unless `FR_FEED_SOURCES` overrides them.
pub const DEFAULT_FEED_SOURCES: &[&str] = &["https://medium.com/feed/@linstiago"];

/// rss2json-compatible conversion service; the source URL goes in `rss_url`.
pub const DEFAULT_FEED_PROXY_URL: &str = "https://api.rss2json.com/v1/api.json";

pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SHOW_ID: &str = "56Wa8yECt7cdx2VifBmIdb";
pub const DEFAULT_EPISODE_LIMIT: u32 = 21;
pub const DEFAULT_MARKET: &str = "BR";

pub const CLIENT_ID_VAR: &str = "SPOTIFY_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "SPOTIFY_CLIENT_SECRET";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid feed source {url:?}: {reason}")]
    InvalidSource { url: String, reason: String },
    #[error("no feed sources configured")]
    NoSources,
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Everything the two pipelines need, built once at start-up and shared
/// read-only between workers.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub feeds: FeedConfig,
    pub podcast: PodcastConfig,
    pub rate_limit: RateLimitConfig,
}

#[derive(Clone, Debug)]
pub struct FeedConfig {
    pub sources: Vec<String>,
    pub proxy_url: String,
}

#[derive(Clone)]
pub struct PodcastConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub token_url: String,
    pub api_base_url: String,
    pub show_id: String,
    pub limit: u32,
    pub market: String,
}

// Keep the secret out of logs.
impl std::fmt::Debug for PodcastConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PodcastConfig")
            .field("client_id", &self.client_id.as_ref().map(|_| "<set>"))
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<set>"))
            .field("token_url", &self.token_url)
            .field("api_base_url", &self.api_base_url)
            .field("show_id", &self.show_id)
            .field("limit", &self.limit)
            .field("market", &self.market)
            .finish()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            sources: DEFAULT_FEED_SOURCES.iter().map(|s| s.to_string()).collect(),
            proxy_url: DEFAULT_FEED_PROXY_URL.to_string(),
        }
    }
}

impl Default for PodcastConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            show_id: DEFAULT_SHOW_ID.to_string(),
            limit: DEFAULT_EPISODE_LIMIT,
            market: DEFAULT_MARKET.to_string(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        // Each request fans out to third-party APIs with their own quotas
        Self {
            per_second: 2,
            burst_size: 10,
        }
    }
}

impl AppConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, with the variable lookup injected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut feeds = FeedConfig::default();
        if let Some(raw) = non_empty("FR_FEED_SOURCES") {
            feeds.sources = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(proxy) = non_empty("FR_FEED_PROXY_URL") {
            feeds.proxy_url = proxy;
        }
        feeds.validate()?;

        let mut podcast = PodcastConfig {
            client_id: non_empty(CLIENT_ID_VAR),
            client_secret: non_empty(CLIENT_SECRET_VAR),
            ..Default::default()
        };
        if let Some(token_url) = non_empty("FR_TOKEN_URL") {
            podcast.token_url = token_url;
        }
        if let Some(api_base_url) = non_empty("FR_API_BASE_URL") {
            podcast.api_base_url = api_base_url;
        }

        let mut rate_limit = RateLimitConfig::default();
        if let Some(value) = non_empty("FR_RATE_PER_SECOND") {
            rate_limit.per_second = value
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidValue {
                    var: "FR_RATE_PER_SECOND",
                    value,
                })?;
        }
        if let Some(value) = non_empty("FR_RATE_BURST") {
            rate_limit.burst_size = value
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidValue {
                    var: "FR_RATE_BURST",
                    value,
                })?;
        }

        tracing::info!(
            sources = feeds.sources.len(),
            proxy_url = %feeds.proxy_url,
            show_id = %podcast.show_id,
            credentials = podcast.has_credentials(),
            "Configuration loaded"
        );

        Ok(Self {
            feeds,
            podcast,
            rate_limit,
        })
    }
}

impl FeedConfig {
    /// The source list must be non-empty and every entry an http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::NoSources);
        }
        for source in self.sources.iter().chain(std::iter::once(&self.proxy_url)) {
            let parsed = Url::parse(source).map_err(|e| ConfigError::InvalidSource {
                url: source.clone(),
                reason: e.to_string(),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidSource {
                    url: source.clone(),
                    reason: "must be HTTP or HTTPS".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl PodcastConfig {
    pub fn has_credentials(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.feeds.sources, vec![DEFAULT_FEED_SOURCES[0].to_string()]);
        assert_eq!(config.feeds.proxy_url, DEFAULT_FEED_PROXY_URL);
        assert_eq!(config.podcast.show_id, DEFAULT_SHOW_ID);
        assert_eq!(config.podcast.limit, 21);
        assert_eq!(config.podcast.market, "BR");
        assert!(!config.podcast.has_credentials());
    }

    #[test]
    fn test_credentials_and_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (CLIENT_ID_VAR, "id"),
            (CLIENT_SECRET_VAR, "secret"),
            ("FR_FEED_SOURCES", "https://a.example/feed, https://b.example/rss ,"),
            ("FR_TOKEN_URL", "http://127.0.0.1:9000/token"),
        ]))
        .unwrap();

        assert!(config.podcast.has_credentials());
        assert_eq!(
            config.feeds.sources,
            vec!["https://a.example/feed", "https://b.example/rss"]
        );
        assert_eq!(config.podcast.token_url, "http://127.0.0.1:9000/token");
    }

    #[test]
    fn test_blank_secret_counts_as_missing() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (CLIENT_ID_VAR, "id"),
            (CLIENT_SECRET_VAR, "   "),
        ]))
        .unwrap();
        assert!(!config.podcast.has_credentials());
    }

    #[test]
    fn test_rejects_bad_sources() {
        let err = AppConfig::from_lookup(lookup_from(&[("FR_FEED_SOURCES", "ftp://x.example/feed")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSource { .. }));

        let err = AppConfig::from_lookup(lookup_from(&[("FR_FEED_SOURCES", " , ")])).unwrap_err();
        assert!(matches!(err, ConfigError::NoSources));
    }

    #[test]
    fn test_rejects_zero_rate() {
        let err = AppConfig::from_lookup(lookup_from(&[("FR_RATE_PER_SECOND", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: "FR_RATE_PER_SECOND", .. }));
    }

    #[test]
    fn test_debug_hides_secret() {
        let podcast = PodcastConfig {
            client_secret: Some("hunter2".to_string()),
            ..Default::default()
        };
        assert!(!format!("{podcast:?}").contains("hunter2"));
    }
}
