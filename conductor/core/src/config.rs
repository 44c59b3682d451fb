//! Client Configuration
//!
//! Configuration is read once at startup. Values are layered with the
//! following priority (highest first):
//! 1. CLI arguments ([`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! The file lives at `$XDG_CONFIG_HOME/taskmaster/client.toml`
//! (typically `~/.config/taskmaster/client.toml`).
//!
//! # Example Configuration
//!
//! ```toml
//! [client]
//! base_url = "http://127.0.0.1:5000"
//! request_timeout_secs = 30
//! tone = "restrained"
//! ```
//!
//! # Environment Variables
//!
//! - `TASKMASTER_BASE_URL`: backend root URL
//! - `TASKMASTER_TIMEOUT_SECS`: request timeout in seconds

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persona::Tone;

/// Default backend root
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Tracks where the configuration came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Structures
// =============================================================================

/// `[client]` section of the TOML file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSectionToml {
    /// Backend root URL
    pub base_url: Option<String>,

    /// Request timeout in seconds
    pub request_timeout_secs: Option<u64>,

    /// Persona tone
    pub tone: Option<Tone>,
}

/// Root of the TOML file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientToml {
    /// Client section
    pub client: ClientSectionToml,
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Client configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend root URL
    pub base_url: String,
    /// Upper bound for each backend round trip
    pub request_timeout: Duration,
    /// Persona tone, fixed for the lifetime of the client
    pub tone: Tone,
    /// Where the configuration came from (highest layer applied)
    pub source: ConfigSource,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            tone: Tone::default(),
            source: ConfigSource::Default,
        }
    }
}

impl ClientConfig {
    /// Defaults with environment variables applied
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        apply_env_config(&mut config);
        config
    }

    /// Check the values make sense
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for a non-HTTP base URL or a
    /// zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "base_url must start with http:// or https:// (got {:?})",
                self.base_url
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Values given on the command line
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Base URL override
    pub base_url: Option<String>,

    /// Timeout override (seconds)
    pub request_timeout_secs: Option<u64>,
}

impl ConfigOverrides {
    /// Create empty overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL override
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the timeout override
    #[must_use]
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Apply on top of a loaded configuration
    pub fn apply(&self, config: &mut ClientConfig) {
        if let Some(ref url) = self.base_url {
            config.base_url.clone_from(url);
            config.source = ConfigSource::Cli;
        }
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
            config.source = ConfigSource::Cli;
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Default config file location
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("taskmaster").join("client.toml"))
}

/// Load configuration from `path` (if it exists), then the environment
///
/// A missing file is not an error; defaults are used instead.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or parsed, or when the
/// result does not validate.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<ClientConfig, ConfigError> {
    let config = match path {
        Some(config_path) if config_path.exists() => {
            let toml_content =
                std::fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: ClientToml = toml::from_str(&toml_content)?;
            let mut config = ClientConfig::default();
            apply_toml_config(&mut config, &toml_config);
            apply_env_config(&mut config);

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
            config
        }
        other => {
            if let Some(config_path) = other {
                tracing::debug!(
                    path = %config_path.display(),
                    "Config file not found, using defaults"
                );
            }
            ClientConfig::from_env()
        }
    };

    config.validate()?;
    Ok(config)
}

fn apply_toml_config(config: &mut ClientConfig, toml: &ClientToml) {
    let section = &toml.client;
    if let Some(ref url) = section.base_url {
        config.base_url.clone_from(url);
        config.source = ConfigSource::File;
    }
    if let Some(secs) = section.request_timeout_secs {
        config.request_timeout = Duration::from_secs(secs);
        config.source = ConfigSource::File;
    }
    if let Some(tone) = section.tone {
        config.tone = tone;
        config.source = ConfigSource::File;
    }
}

fn apply_env_config(config: &mut ClientConfig) {
    if let Ok(url) = std::env::var("TASKMASTER_BASE_URL") {
        if !url.trim().is_empty() {
            config.base_url = url.trim().to_string();
            config.source = ConfigSource::Env;
        }
    }
    if let Some(secs) = std::env::var("TASKMASTER_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
    {
        config.request_timeout = Duration::from_secs(secs);
        config.source = ConfigSource::Env;
    }
}
