pub mod api;
pub mod config;
pub mod episodes;
pub mod errors;
pub mod feeds;
pub mod observability;
pub mod security;

use actix_web::web;
use config::AppConfig;
use reqwest::Client;

/// Shared, read-only state handed to every handler.
pub struct AppState {
    pub config: AppConfig,
    /// Connection pool only; no responses are cached.
    pub http: Client,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self { config, http })
    }
}

pub type RqAppState = web::Data<AppState>;
