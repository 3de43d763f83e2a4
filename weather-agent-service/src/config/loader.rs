//! Configuration loading from files and environment variables.

use config::{Config, Environment, File};

use crate::error::{ServiceError, ServiceResult};

use super::{ENV_PREFIX, ServiceConfig};

/// Load configuration from `config.{toml,yaml,json}` in the working
/// directory (optional) and `WEATHER_AGENT__*` environment variables
pub fn load_config() -> ServiceResult<ServiceConfig> {
    load_config_from("config")
}

/// Load configuration using `file_stem` as the optional config file
pub fn load_config_from(file_stem: &str) -> ServiceResult<ServiceConfig> {
    Config::builder()
        .add_source(File::with_name(file_stem).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| ServiceError::Config {
            message: format!("Failed to build config: {}", e),
        })?
        .try_deserialize()
        .map_err(|e| ServiceError::Config {
            message: format!("Failed to deserialize config: {}", e),
        })
}
