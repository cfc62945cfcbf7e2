use actix_web::{get, HttpResponse};

use crate::{errors::AppResult, feeds, RqAppState};

/// Merged articles from every configured feed, newest first.
#[get("")]
pub async fn get_feed(state: RqAppState) -> AppResult<HttpResponse> {
    let items = feeds::aggregate(&state.http, &state.config.feeds).await?;
    Ok(HttpResponse::Ok().json(items))
}
