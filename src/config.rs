//! Configuration management for the Bookshelf server

use std::collections::HashMap;
use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `json` or `pretty`
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,
    /// Listening port, taken from `PORT`. There is no default.
    pub port: u16,
    /// Connection string, taken from `DATABASE_URL`
    pub database_url: String,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

impl AppConfig {
    /// Load configuration from files and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        Self::build(
            Config::builder()
                // Start with default configuration
                .add_source(File::with_name("config/default").required(false))
                // Layer on the environment-specific file
                .add_source(File::with_name(&format!("config/{}", run_mode)).required(false)),
            None,
        )
    }

    /// Load configuration from an explicit set of environment variables,
    /// ignoring config files and the process environment.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::build(Config::builder(), Some(vars))
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        vars: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let lookup = |key: &str| match &vars {
            Some(vars) => vars.get(key).cloned(),
            None => env::var(key).ok(),
        };

        let config = builder
            // PORT -> port, DATABASE_URL -> database_url, HOST -> host
            .add_source(Environment::default().source(vars.clone()).try_parsing(true))
            .set_override_option("logging.level", lookup("LOG_LEVEL"))?
            .set_override_option("logging.format", lookup("LOG_FORMAT"))?
            .build()?;

        config.try_deserialize()
    }

    /// Socket address string the listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 2,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
