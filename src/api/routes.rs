use super::{episodes, feed};
use actix_web::{web, Scope};

/// The public proxy endpoints, without rate limiting.
pub fn routes() -> Scope {
    web::scope("/api")
        .service(feed::routes())
        .service(episodes::routes())
}
