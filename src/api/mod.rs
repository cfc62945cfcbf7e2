pub mod episodes;
pub mod feed;
pub mod health;
pub mod routes;

pub use routes::routes;
