//! Runtime configuration loaded from TOML.
//!
//! ```toml
//! [database]
//! url = "postgres://taskboard@localhost/taskboard"
//! pool_size = 8
//!
//! [sweep]
//! overdue_interval_secs = 3600
//! reminder_interval_secs = 86400
//! reminder_window_days = 1
//!
//! [logging]
//! filter = "info,taskboard=debug"
//! ```
//!
//! Every section and key is optional and falls back to the defaults above
//! (the database URL defaults to empty and must be set for the sweeper).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors returned while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The TOML could not be parsed into the expected shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("invalid config value for {key}: {reason}")]
    Invalid {
        /// Dotted key of the offending value.
        key: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum pooled connections.
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            pool_size: 8,
        }
    }
}

/// Sweep scheduling settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Seconds between overdue sweeps.
    pub overdue_interval_secs: u64,
    /// Seconds between deadline reminder runs.
    pub reminder_interval_secs: u64,
    /// Days ahead of today covered by a reminder run, inclusive.
    pub reminder_window_days: u32,
}

impl SweepConfig {
    /// Returns the overdue sweep period.
    #[must_use]
    pub const fn overdue_interval(&self) -> Duration {
        Duration::from_secs(self.overdue_interval_secs)
    }

    /// Returns the reminder period.
    #[must_use]
    pub const fn reminder_interval(&self) -> Duration {
        Duration::from_secs(self.reminder_interval_secs)
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            overdue_interval_secs: 3600,
            reminder_interval_secs: 86_400,
            reminder_window_days: 1,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive string.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskboardConfig {
    /// Database settings.
    pub database: DatabaseConfig,
    /// Sweep settings.
    pub sweep: SweepConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl TaskboardConfig {
    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, or any
    /// error from [`TaskboardConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.pool_size == 0 {
            return Err(ConfigError::Invalid {
                key: "database.pool_size",
                reason: "must be at least 1",
            });
        }
        if self.sweep.overdue_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "sweep.overdue_interval_secs",
                reason: "must be at least 1",
            });
        }
        if self.sweep.reminder_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "sweep.reminder_interval_secs",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
