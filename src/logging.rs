//! Logging setup
//!
//! Library code only emits `tracing` events. The binary calls [`init_logging`] once at
//! startup. Logs go to stderr because stdout may carry generated source.

use serde::Deserialize;
use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable holding a filter directive that overrides the configured level
pub const LOG_ENV_VAR: &str = "REDESIGN_CODEGEN_LOG";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log level '{0}'")]
    InvalidLevel(String),

    #[error("invalid log format '{0}' (expected 'text' or 'json')")]
    InvalidFormat(String),

    #[error("logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    pub level: String,

    /// Output format: text or json
    pub format: String,

    /// Colored output (text format only)
    pub color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "text".to_string(),
            color: true,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }
}

/// Map a `-v` count onto a level, starting from the configured one
pub fn level_for_verbosity(base: &str, verbose: u8) -> String {
    const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
    if verbose == 0 {
        return base.to_string();
    }
    let start = LEVELS.iter().position(|l| *l == base).unwrap_or(1);
    let idx = (start + verbose as usize).min(LEVELS.len() - 1);
    LEVELS[idx].to_string()
}

fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV_VAR) {
        return Ok(filter);
    }
    match config.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(EnvFilter::new(&config.level)),
        other => Err(LoggingError::InvalidLevel(other.to_string())),
    }
}

/// Install the global subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = build_env_filter(config)?;
    let base = Registry::default().with(filter);

    let result = match config.format.as_str() {
        "json" => base
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        "text" => base
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(config.color)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        other => return Err(LoggingError::InvalidFormat(other.to_string())),
    };

    result.map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}
