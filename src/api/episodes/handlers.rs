use actix_web::{get, HttpResponse};

use crate::{episodes, errors::AppResult, RqAppState};

/// Latest episodes of the configured show, as the platform returns them.
#[get("")]
pub async fn get_episodes(state: RqAppState) -> AppResult<HttpResponse> {
    let items = episodes::fetch_show_episodes(&state.http, &state.config.podcast).await?;
    Ok(HttpResponse::Ok().json(items))
}
