//! Configuration management for the taller server

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Backing record store settings. The store is a directory of worksheet
/// files, one per sheet (`usuarios`, `reparaciones`, `config`).
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub sheets_dir: String,
    /// Read attempts before a transient failure is surfaced.
    pub read_attempts: u32,
    /// Delay between read attempts, in milliseconds.
    pub retry_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: u64,
}

/// Folio numbering settings (e.g. prefix "T-", width 3 gives "T-007").
#[derive(Debug, Deserialize, Clone)]
pub struct FolioConfig {
    pub prefix: String,
    pub width: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub folio: FolioConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix TALLER_)
            .add_source(
                Environment::with_prefix("TALLER")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override JWT secret from JWT_SECRET env var if present
            .set_override_option("auth.jwt_secret", env::var("JWT_SECRET").ok())?
            // Override sheets directory from SHEETS_DIR env var if present
            .set_override_option("store.sheets_dir", env::var("SHEETS_DIR").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            sheets_dir: "./sheets".to_string(),
            read_attempts: 3,
            retry_delay_ms: 500,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-this-secret-in-production".to_string(),
            jwt_expiration_hours: 24,
        }
    }
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            prefix: "T-".to_string(),
            width: 3,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
