//! Configuration module for TaskSync.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, OwnerId};

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for TaskSync.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub notifications: NotificationsConfig,
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

/// Remote store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the REST service, without a trailing slash.
    pub base_url: String,
    /// Owner of the list. `0` means "not configured yet".
    pub owner_id: u64,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

/// Notification area settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Milliseconds a notification stays visible before it hides itself.
    pub auto_hide_ms: u64,
}

/// Synchronization engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Refuse a new operation on an item that already has a call in flight.
    ///
    /// Off by default: overlapping operations on the same item are issued
    /// as-is. When on, batches leave busy items out and report them.
    pub reject_busy: bool,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

// ---------------------------------------------------------------------------
// Config::load()
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/tasksync/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("tasksync")
            .join("config.yaml")
    }

    /// The configured owner.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidId` while `remote.owner_id` is unset (0).
    pub fn owner(&self) -> Result<OwnerId, DomainError> {
        OwnerId::new(self.remote.owner_id)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.remote.request_timeout_secs)
    }

    pub fn auto_hide(&self) -> Duration {
        Duration::from_millis(self.notifications.auto_hide_ms)
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Public REST endpoint the list service is hosted at.
pub const DEFAULT_BASE_URL: &str = "https://mate.academy/students-api";

/// Default notification lifetime in milliseconds.
pub const DEFAULT_AUTO_HIDE_MS: u64 = 3000;

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            owner_id: 0,
            request_timeout_secs: 10,
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            auto_hide_ms: DEFAULT_AUTO_HIDE_MS,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { reject_busy: false }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"remote.owner_id"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- remote ---
        match url::Url::parse(&self.remote.base_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => errors.push(ValidationError {
                field: "remote.base_url".into(),
                message: format!("unsupported scheme '{}'; use http or https", parsed.scheme()),
            }),
            Err(e) => errors.push(ValidationError {
                field: "remote.base_url".into(),
                message: format!("not a valid URL: {e}"),
            }),
        }
        if self.remote.owner_id == 0 {
            errors.push(ValidationError {
                field: "remote.owner_id".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.remote.request_timeout_secs == 0 {
            errors.push(ValidationError {
                field: "remote.request_timeout_secs".into(),
                message: "must be greater than 0".into(),
            });
        }

        // --- notifications ---
        if self.notifications.auto_hide_ms == 0 {
            errors.push(ValidationError {
                field: "notifications.auto_hide_ms".into(),
                message: "must be greater than 0".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust,no_run
/// use tasksync_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .remote_owner_id(3629)
///     .notifications_auto_hide_ms(5000)
///     .logging_level("debug")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder pre-populated with default values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // -- remote --

    pub fn remote_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.remote.base_url = url.into();
        self
    }

    pub fn remote_owner_id(mut self, owner_id: u64) -> Self {
        self.config.remote.owner_id = owner_id;
        self
    }

    pub fn remote_request_timeout_secs(mut self, seconds: u64) -> Self {
        self.config.remote.request_timeout_secs = seconds;
        self
    }

    // -- notifications --

    pub fn notifications_auto_hide_ms(mut self, ms: u64) -> Self {
        self.config.notifications.auto_hide_ms = ms;
        self
    }

    // -- engine --

    pub fn engine_reject_busy(mut self, reject: bool) -> Self {
        self.config.engine.reject_busy = reject;
        self
    }

    // -- logging --

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// Consume the builder and return the [`Config`] without validation.
    pub fn build(self) -> Config {
        self.config
    }

    /// Consume the builder, validate, and return the [`Config`] or errors.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let errors = self.config.validate();
        if errors.is_empty() {
            Ok(self.config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
