//! Parley configuration system.
//!
//! TOML-based configuration for the chat client: where the service lives,
//! which paths it exposes, how the conversation queries it, and how
//! verbose logging is. Every section has defaults, so partial configs
//! (or no config file at all) work.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    ChatConfig, EndpointsConfig, LogLevel, LoggingConfig, LoginFormat, ParleyConfig,
    SearchModeConfig, ServerConfig,
};

use std::path::Path;

use parley_common::ConfigError;

/// Environment variable that overrides `server.base_url`.
pub const BASE_URL_ENV: &str = "PARLEY_BASE_URL";

/// Load config from the platform default path, or from `path` when given.
///
/// The default path is created with a commented template on first run.
/// Overrides such as `PARLEY_BASE_URL` are not applied here; see
/// [`apply_base_url_override`].
pub fn load_config(path: Option<&Path>) -> Result<ParleyConfig, ConfigError> {
    let config = match path {
        Some(p) => toml_loader::load_from_path(p)?,
        None => toml_loader::load_default()?,
    };

    validation::validate(&config)?;
    Ok(config)
}

/// The `PARLEY_BASE_URL` value, if set.
pub fn base_url_from_env() -> Option<String> {
    std::env::var(BASE_URL_ENV).ok()
}

/// Replace `server.base_url` with `url`.
///
/// Blank values are ignored. The URL is validated on its own; when it is
/// rejected the config is left as it was.
pub fn apply_base_url_override(config: &mut ParleyConfig, url: &str) -> Result<(), ConfigError> {
    let url = url.trim().trim_end_matches('/');
    if url.is_empty() {
        return Ok(());
    }
    validation::validate_base_url_override(url)?;
    config.server.base_url = url.to_string();
    Ok(())
}
