use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Successful client-credentials response.
#[derive(Deserialize)]
pub struct TokenResponse {
    pub access_token: AccessToken,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// OAuth error body, as returned by the token endpoint on failure.
#[derive(Debug, Default, Deserialize)]
pub struct OAuthError {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// Bearer credential for a single episode request. Not cached, and its
/// `Debug` output never shows the value.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// One page of show episodes. Episode objects are passed through as-is.
#[derive(Debug, Deserialize)]
pub struct EpisodePage {
    pub items: Vec<Value>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_debug_is_redacted() {
        let response: TokenResponse = serde_json::from_value(json!({
            "access_token": "BQD-secret",
            "token_type": "Bearer",
            "expires_in": 3600
        }))
        .unwrap();
        assert_eq!(response.access_token.secret(), "BQD-secret");
        assert_eq!(format!("{:?}", response.access_token), "AccessToken(***)");
        assert_eq!(response.expires_in, Some(3600));
    }

    #[test]
    fn test_episode_page_keeps_items_verbatim() {
        let page: EpisodePage = serde_json::from_value(json!({
            "href": "https://api.example/v1/shows/x/episodes",
            "items": [{"id": "e1", "name": "Pilot", "images": [{"url": "i.jpg"}]}],
            "total": 40,
            "next": null
        }))
        .unwrap();
        assert_eq!(page.items[0]["images"][0]["url"], "i.jpg");
        assert_eq!(page.total, Some(40));
    }
}
