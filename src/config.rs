//! Layered client configuration.
//!
//! Values are resolved from built-in defaults, then an optional TOML file,
//! then `GEARGUARD__SECTION__KEY` environment variables.

use crate::calendar::CalendarSettings;
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// File stem looked up in the working directory when no path is given.
pub const DEFAULT_FILE_STEM: &str = "gearguard";

const ENV_PREFIX: &str = "GEARGUARD";
const ENV_SEPARATOR: &str = "__";

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the REST backend.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_owned(),
            timeout_secs: 10,
        }
    }
}

impl BackendConfig {
    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Where the logged-in user is remembered between runs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory holding `session.json`.
    pub state_dir: Utf8PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            state_dir: Utf8PathBuf::from(".gearguard"),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive, overridden by `RUST_LOG`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
        }
    }
}

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend connection.
    pub backend: BackendConfig,
    /// Session persistence.
    pub session: SessionConfig,
    /// Week grid layout.
    pub calendar: CalendarSettings,
    /// Log output.
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Loads configuration from `path` (or `gearguard.toml` when present)
    /// and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an explicitly named file is missing or
    /// any layer holds invalid values.
    pub fn load(path: Option<&Utf8Path>) -> ConfigResult<Self> {
        Self::load_with_env(path, None)
    }

    /// Loads configuration, reading environment overrides from `env` instead
    /// of the process environment when given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an explicitly named file is missing or
    /// any layer holds invalid values.
    pub fn load_with_env(
        path: Option<&Utf8Path>,
        env: Option<HashMap<String, String>>,
    ) -> ConfigResult<Self> {
        let file = path.map_or_else(
            || File::new(DEFAULT_FILE_STEM, FileFormat::Toml).required(false),
            |explicit| File::new(explicit.as_str(), FileFormat::Toml).required(true),
        );
        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }

    /// Parses configuration from TOML text alone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for malformed TOML or invalid values.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
