//! Tracing subscriber installation.
//!
//! Library code only emits `tracing` events; binaries call
//! [`init_tracing`] once at startup to route them to stderr.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::TryInitError;

use crate::config::LoggingConfig;

/// Errors raised while installing the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum ObservabilityError {
    /// The configured filter directive could not be parsed.
    #[error("invalid log filter {filter:?}: {source}")]
    InvalidFilter {
        /// Directive that failed to parse.
        filter: String,
        /// Parser error.
        source: tracing_subscriber::filter::ParseError,
    },

    /// A global subscriber was already installed.
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(#[from] TryInitError),
}

/// Builds the event filter: `RUST_LOG` when set, otherwise the configured
/// directive.
///
/// # Errors
///
/// Returns [`ObservabilityError::InvalidFilter`] when the configured
/// directive is malformed.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, ObservabilityError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    parse_filter(&config.filter)
}

/// Parses a filter directive such as `info` or `tasktrail=debug,warn`.
///
/// # Errors
///
/// Returns [`ObservabilityError::InvalidFilter`] when the directive is
/// malformed.
pub fn parse_filter(directive: &str) -> Result<EnvFilter, ObservabilityError> {
    EnvFilter::try_new(directive).map_err(|source| ObservabilityError::InvalidFilter {
        filter: directive.to_owned(),
        source,
    })
}

/// Installs a global fmt subscriber writing to stderr.
///
/// # Errors
///
/// Returns [`ObservabilityError`] when the filter is malformed or a
/// subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), ObservabilityError> {
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    if config.json {
        builder.json().finish().try_init()?;
    } else {
        builder.finish().try_init()?;
    }
    Ok(())
}
