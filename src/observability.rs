use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("LOG_LEVEL").ok(),
            std::env::var("LOG_FORMAT").ok(),
        )
    }

    fn from_values(level: Option<String>, format: Option<String>) -> Self {
        let log_format = match format.as_deref().map(str::trim) {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };
        Self {
            log_level: level
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| "info".to_string()),
            log_format,
        }
    }
}

/// Initialize structured logging and tracing. `RUST_LOG` wins over
/// `LOG_LEVEL` when both are set.
pub fn init_logging() {
    let config = ObservabilityConfig::from_env();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format {
        LogFormat::Json => {
            // JSON structured logging for production
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_current_span(false)
                        .with_span_list(false),
                )
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_target(true))
                .init();
        }
    }

    info!(
        service = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        log_level = %config.log_level,
        log_format = ?config.log_format,
        "Logging initialized"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ObservabilityConfig::from_values(None, None);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_json_format() {
        let config =
            ObservabilityConfig::from_values(Some("debug".to_string()), Some("JSON".to_string()));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_format_falls_back_to_pretty() {
        let config = ObservabilityConfig::from_values(Some(" ".to_string()), Some("xml".to_string()));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }
}
