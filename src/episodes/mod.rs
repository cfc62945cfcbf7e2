pub mod client;
pub mod types;

pub use client::{fetch_show_episodes, EpisodeClient};
pub use types::AccessToken;
