use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::reports::window::WindowSettings;
use crate::utils::time::days_to_seconds;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub reporting: ReportingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub default_path: PathBuf,
}

/// Report generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportingConfig {
    /// Preferred reporting window, in days
    pub timespan_days: u32,
    /// Minimum number of logs a report should be based on
    pub minimum_count: usize,
    /// Number of report-building workers (1 = sequential)
    pub workers: usize,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            timespan_days: 14,
            minimum_count: 2500,
            workers: 1,
        }
    }
}

impl ReportingConfig {
    /// Window selection settings derived from this configuration
    pub fn window_settings(&self) -> WindowSettings {
        WindowSettings {
            timespan_secs: days_to_seconds(self.timespan_days),
            minimum_count: self.minimum_count,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.timespan_days == 0 {
            return Err("reporting.timespan_days must be greater than zero".to_string());
        }
        if self.minimum_count == 0 {
            return Err("reporting.minimum_count must be greater than zero".to_string());
        }
        if self.workers == 0 {
            return Err("reporting.workers must be at least 1".to_string());
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = ReportingConfig::default();
        let config = Config::builder()
            .set_default("database.default_path", "./droplog.db")?
            .set_default("reporting.timespan_days", defaults.timespan_days as i64)?
            .set_default("reporting.minimum_count", defaults.minimum_count as i64)?
            .set_default("reporting.workers", defaults.workers as i64)?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false))
            // DROPLOG_REPORTING__MINIMUM_COUNT etc. override nested settings
            .add_source(config::Environment::with_prefix("DROPLOG").separator("__"))
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        if let Ok(db_path) = env::var("DROPLOG_DATABASE_PATH") {
            app_config.database.default_path = PathBuf::from(db_path);
        }

        app_config
            .reporting
            .validate()
            .map_err(ConfigError::Message)?;

        Ok(app_config)
    }

    /// Get default config values for CLI argument defaults
    pub fn get_defaults() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load configuration, using defaults: {}", e);
                Self {
                    database: DatabaseConfig {
                        default_path: PathBuf::from("./droplog.db"),
                    },
                    reporting: ReportingConfig::default(),
                }
            }
        }
    }
}
