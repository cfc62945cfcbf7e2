use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{header, Client, Response};
use serde_json::Value;

use super::types::{AccessToken, EpisodePage, OAuthError, TokenResponse};
use crate::{
    config::{PodcastConfig, CLIENT_ID_VAR, CLIENT_SECRET_VAR},
    errors::{AppError, AppResult, Stage},
};

/// Client for the podcast platform. Built per request; holds borrowed
/// credentials only for the lifetime of that request.
pub struct EpisodeClient<'a> {
    http: &'a Client,
    config: &'a PodcastConfig,
    client_id: &'a str,
    client_secret: &'a str,
}

impl<'a> EpisodeClient<'a> {
    /// Fails with a configuration error, before any network call, if either
    /// credential is missing.
    pub fn new(http: &'a Client, config: &'a PodcastConfig) -> AppResult<Self> {
        let (client_id, client_secret) = match (&config.client_id, &config.client_secret) {
            (Some(id), Some(secret)) => (id.as_str(), secret.as_str()),
            _ => {
                return Err(AppError::Configuration(format!(
                    "{CLIENT_ID_VAR} or {CLIENT_SECRET_VAR} is not set"
                )))
            }
        };

        Ok(Self {
            http,
            config,
            client_id,
            client_secret,
        })
    }

    /// Exchange the client credentials for a bearer token.
    pub async fn request_token(&self) -> AppResult<AccessToken> {
        let response = self
            .http
            .post(&self.config.token_url)
            .header(
                header::AUTHORIZATION,
                basic_credentials(self.client_id, self.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        tracing::info!(
            stage = %Stage::Token,
            status = response.status().as_u16(),
            "Token endpoint responded"
        );

        if !response.status().is_success() {
            let body = response.json::<OAuthError>().await.unwrap_or_default();
            let reason = body
                .error_description
                .or(body.error)
                .unwrap_or_else(|| "invalid response from token endpoint".to_string());
            return Err(AppError::rejected(
                Stage::Token,
                format!("failed to obtain access token: {reason}"),
            ));
        }

        let token = response.json::<TokenResponse>().await?;
        tracing::debug!(expires_in = token.expires_in, "Access token obtained");
        Ok(token.access_token)
    }

    /// Fetch one page of the configured show's episodes.
    pub async fn fetch_episodes(&self, token: &AccessToken) -> AppResult<Vec<Value>> {
        let url = format!(
            "{}/shows/{}/episodes",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.show_id
        );

        let response = self
            .http
            .get(&url)
            .query(&[
                ("limit", self.config.limit.to_string()),
                ("market", self.config.market.clone()),
            ])
            .bearer_auth(token.secret())
            .send()
            .await?;

        tracing::info!(
            stage = %Stage::Episodes,
            status = response.status().as_u16(),
            "Episodes endpoint responded"
        );

        if !response.status().is_success() {
            return Err(AppError::rejected(
                Stage::Episodes,
                format!(
                    "failed to fetch episodes: {}; check that show {} exists",
                    status_text(&response),
                    self.config.show_id
                ),
            ));
        }

        let page = response.json::<EpisodePage>().await?;
        tracing::info!(
            show_id = %self.config.show_id,
            episodes = page.items.len(),
            total = page.total,
            "Episodes fetched"
        );
        Ok(page.items)
    }
}

/// Run the whole episode pipeline: credentials check, token exchange,
/// episode fetch. The first failure ends it.
pub async fn fetch_show_episodes(http: &Client, config: &PodcastConfig) -> AppResult<Vec<Value>> {
    let client = EpisodeClient::new(http, config)?;
    let token = client.request_token().await?;
    client.fetch_episodes(&token).await
}

/// Value of a `Basic` authorization header.
pub fn basic_credentials(client_id: &str, client_secret: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{client_id}:{client_secret}")))
}

fn status_text(response: &Response) -> String {
    let status = response.status();
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}
