use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

use crate::RqAppState;

/// Health check endpoint for load balancers
#[get("")]
pub async fn health_check(state: RqAppState) -> impl Responder {
    let config = &state.config;
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "feed_sources": config.feeds.sources.len(),
        "episodes": episodes_status(&state),
    }))
}

/// Readiness check - both endpoints can serve, i.e. credentials are present
#[get("/ready")]
pub async fn readiness_check(state: RqAppState) -> impl Responder {
    if state.config.podcast.has_credentials() {
        HttpResponse::Ok().json(json!({
            "status": "ready",
            "episodes": episodes_status(&state),
        }))
    } else {
        HttpResponse::ServiceUnavailable().json(json!({
            "status": "not_ready",
            "episodes": episodes_status(&state),
        }))
    }
}

/// Liveness check - simple check to see if the app is alive
#[get("/live")]
pub async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

fn episodes_status(state: &RqAppState) -> &'static str {
    if state.config.podcast.has_credentials() {
        "configured"
    } else {
        "missing_credentials"
    }
}

pub fn routes() -> actix_web::Scope {
    web::scope("/health")
        .service(health_check)
        .service(readiness_check)
        .service(liveness_check)
}
