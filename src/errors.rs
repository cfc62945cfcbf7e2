use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use std::fmt;
use thiserror::Error;

/// Request-level failures. Every variant ends the request with a 500 and
/// an `{ "error": <message> }` body.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required secret was missing before any network call was made.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The token or episode endpoint answered with a non-success status.
    #[error("{message}")]
    UpstreamRejected { stage: Stage, message: String },

    /// The upstream could not be reached at all.
    #[error("network error: {0}")]
    Transport(String),

    /// The upstream answered, but the body was not the expected JSON.
    #[error("invalid upstream response: {0}")]
    InvalidPayload(String),
}

/// Which step of the episode pipeline an upstream rejection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Token,
    Episodes,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Token => write!(f, "token"),
            Stage::Episodes => write!(f, "episodes"),
        }
    }
}

impl AppError {
    pub fn configuration(message: &str) -> Self {
        AppError::Configuration(message.to_string())
    }

    pub fn rejected(stage: Stage, message: impl Into<String>) -> Self {
        AppError::UpstreamRejected {
            stage,
            message: message.into(),
        }
    }

    /// Short machine-friendly tag used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "configuration",
            AppError::UpstreamRejected { .. } => "upstream_rejected",
            AppError::Transport(_) => "transport",
            AppError::InvalidPayload(_) => "invalid_payload",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        tracing::error!(kind = self.kind(), error = %self, "Request failed");

        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Convert network/reqwest errors
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::InvalidPayload(err.to_string())
        } else {
            AppError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidPayload(err.to_string())
    }
}

/// Why a single feed source was left out of the merged result. Never
/// surfaces as a request failure on its own.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("proxy answered HTTP {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("response was not a feed document: {0}")]
    Decode(String),

    #[error("feed status was {status:?}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    NotOk {
        status: String,
        message: Option<String>,
    },
}

impl SourceError {
    /// Transport failures mean the source never answered; everything else
    /// is an answer we could not use.
    pub fn is_transport(&self) -> bool {
        matches!(self, SourceError::Transport(_))
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SourceError::Decode(err.to_string())
        } else {
            SourceError::Transport(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_rt::test]
    async fn test_error_response_shape() {
        let err = AppError::configuration("SPOTIFY_CLIENT_ID is not set");
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value,
            json!({ "error": "configuration error: SPOTIFY_CLIENT_ID is not set" })
        );
    }

    #[test]
    fn test_rejected_message_is_verbatim() {
        let err = AppError::rejected(Stage::Episodes, "failed to fetch episodes: Not Found");
        assert_eq!(err.to_string(), "failed to fetch episodes: Not Found");
        assert_eq!(err.kind(), "upstream_rejected");
    }

    #[test]
    fn test_not_ok_display() {
        let err = SourceError::NotOk {
            status: "error".to_string(),
            message: Some("Cannot download feed".to_string()),
        };
        assert_eq!(err.to_string(), "feed status was \"error\": Cannot download feed");

        let bare = SourceError::NotOk {
            status: "error".to_string(),
            message: None,
        };
        assert_eq!(bare.to_string(), "feed status was \"error\"");
        assert!(!bare.is_transport());
    }
}
