//! Layered configuration for the task workflow binaries.
//!
//! Values are resolved with the following priority (highest first):
//! 1. Environment variables (`TASKTRAIL_DATABASE_URL`,
//!    `TASKTRAIL_DB_MAX_CONNECTIONS`, `TASKTRAIL_LOG`)
//! 2. TOML config file (`tasktrail.toml` in the working directory, or an
//!    explicit path)
//! 3. Compiled defaults
//!
//! A missing default file is not an error. An explicit path that does not
//! exist is.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Config file consulted when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "tasktrail.toml";

/// Environment variable overriding the database URL.
pub const ENV_DATABASE_URL: &str = "TASKTRAIL_DATABASE_URL";
/// Environment variable overriding the pool size.
pub const ENV_DB_MAX_CONNECTIONS: &str = "TASKTRAIL_DB_MAX_CONNECTIONS";
/// Environment variable overriding the log filter.
pub const ENV_LOG: &str = "TASKTRAIL_LOG";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// An environment override held an unusable value.
    #[error("invalid value {value:?} for {name}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Raw value found.
        value: String,
    },

    /// The resolved pool size was zero.
    #[error("database.max_connections must be at least 1")]
    ZeroConnections,
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    database: DatabaseFileConfig,
    logging: LoggingFileConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DatabaseFileConfig {
    url: Option<String>,
    max_connections: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LoggingFileConfig {
    filter: Option<String>,
    json: Option<bool>,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum pooled connections.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/tasktrail".to_owned(),
            max_connections: 8,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `tracing-subscriber` filter directive, for example `info` or
    /// `tasktrail=debug`.
    pub filter: String,
    /// Emit JSON lines instead of human-readable text.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
            json: false,
        }
    }
}

/// Fully resolved application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads configuration from defaults, a TOML file, and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an explicit file cannot be read, the
    /// file is not valid TOML, or an environment override is malformed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = load_config_file(path)?;
        Self::resolve(&file, |name| std::env::var(name).ok())
    }

    /// Parses a TOML document and applies it over the defaults, without
    /// consulting the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseToml`] for malformed documents and
    /// [`ConfigError::ZeroConnections`] for an empty pool.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(contents)?;
        Self::resolve(&file, |_| None)
    }

    /// Priority: environment > file > default. `lookup` stands in for the
    /// process environment so resolution can be tested without mutating it.
    fn resolve(
        file: &ConfigFile,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let url = lookup(ENV_DATABASE_URL)
            .or_else(|| file.database.url.clone())
            .unwrap_or(defaults.database.url);
        let max_connections = match lookup(ENV_DB_MAX_CONNECTIONS) {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidEnv {
                    name: ENV_DB_MAX_CONNECTIONS,
                    value: raw.clone(),
                })?,
            None => file
                .database
                .max_connections
                .unwrap_or(defaults.database.max_connections),
        };
        if max_connections == 0 {
            return Err(ConfigError::ZeroConnections);
        }
        let filter = lookup(ENV_LOG)
            .or_else(|| file.logging.filter.clone())
            .unwrap_or(defaults.logging.filter);
        let json = file.logging.json.unwrap_or(defaults.logging.json);

        Ok(Self {
            database: DatabaseConfig {
                url,
                max_connections,
            },
            logging: LoggingConfig { filter, json },
        })
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// If `explicit_path` is `Some`, the file must exist. Otherwise the default
/// file is tried and a missing file yields an empty config.
fn load_config_file(explicit_path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    if let Some(path) = explicit_path {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        return Ok(toml::from_str(&contents)?);
    }

    let path = PathBuf::from(DEFAULT_CONFIG_FILE);
    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(source) => Err(ConfigError::ReadFile { path, source }),
    }
}
