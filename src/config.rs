use crate::errors::{AppError, Result};
use serde::Deserialize;
use std::env;

const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub observability: ObservabilityConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub log_format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON written to stdout
    pub pretty: bool,
}

impl Config {
    /// Load configuration from defaults, files and environment variables
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let environment =
            env::var("IDENTITY_CATALOG_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .set_default("observability.log_level", "info")?
            .set_default("observability.log_format", "pretty")?
            .set_default("output.pretty", true)?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::File::with_name(&format!("config/{}", environment)).required(false),
            )
            // e.g., IDENTITY_CATALOG__OBSERVABILITY__LOG_LEVEL=debug
            .add_source(
                config::Environment::with_prefix("IDENTITY_CATALOG")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Configuration(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.observability.log_level.trim().is_empty() {
            return Err(AppError::Configuration(
                "Log level must not be empty".to_string(),
            ));
        }

        if !LOG_FORMATS.contains(&self.observability.log_format.as_str()) {
            return Err(AppError::Configuration(format!(
                "Unsupported log format '{}', expected one of {:?}",
                self.observability.log_format, LOG_FORMATS
            )));
        }

        Ok(())
    }
}
