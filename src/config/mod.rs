/// Configuration management for flowseed
///
/// Handles database location and logging parameters. Values come from the
/// environment so the binary can be pointed at any SQLite file without flags.

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Database configuration for workflow storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file (default: "data/flowseed.db")
    /// Parent directories are created on first connect.
    pub path: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string (e.g. "warn", "flowseed=debug")
    pub filter: String,
}

impl Default for Config {
    /// Default configuration with ENV_VAR support for scripted/container use
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: std::env::var("FLOWSEED_DATABASE_PATH")
                    .unwrap_or_else(|_| "data/flowseed.db".to_string()),
            },
            logging: LoggingConfig {
                // Diagnostics share stderr with logs, keep the default quiet
                filter: std::env::var("FLOWSEED_LOG").unwrap_or_else(|_| "warn".to_string()),
            },
        }
    }
}
