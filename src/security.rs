use actix_cors::Cors;
use actix_governor::{
    governor::middleware::StateInformationMiddleware, GovernorConfig, GovernorConfigBuilder,
    PeerIpKeyExtractor,
};

use crate::config::RateLimitConfig;

pub type RateLimiter = GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Per-client limit for the proxy endpoints. Every request costs quota on
/// the upstream APIs, so this is stricter than a typical JSON API.
///
/// Returns `None` if the settings are rejected by the governor (zero values).
pub fn create_rate_limiter(config: &RateLimitConfig) -> Option<RateLimiter> {
    GovernorConfigBuilder::default()
        .per_second(config.per_second)
        .burst_size(config.burst_size)
        .use_headers() // Send rate limit info in headers
        .finish()
}

/// The endpoints are read-only and meant to be called from the site's
/// browser code on any origin.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET"])
        .allow_any_header()
        .max_age(3600)
}
