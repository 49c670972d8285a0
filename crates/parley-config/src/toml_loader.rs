//! TOML config file loading and creation.

use crate::schema::ParleyConfig;
use crate::validation;
use parley_common::ConfigError;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Load config from a specific TOML file path.
///
/// Missing fields take their serde defaults. If the parsed config fails
/// validation, a warning is logged and the default config is returned.
pub fn load_from_path(path: &Path) -> Result<ParleyConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
    })?;

    let config: ParleyConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(ParleyConfig::default());
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On Linux: `~/.config/parley/config.toml`
/// On macOS: `~/Library/Application Support/parley/config.toml`
///
/// If the file does not exist, a commented default is written and the
/// defaults are returned.
pub fn load_default() -> Result<ParleyConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(ParleyConfig::default());
    }

    load_from_path(&path)
}

/// Get the platform-specific default config file path.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("parley").join("config.toml"))
}

/// Write the default TOML config (with documentation comments) to `path`.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, default_config_toml()).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}

fn default_config_toml() -> &'static str {
    r#"# Parley Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[server]
# base_url = "http://localhost:8000"   # PARLEY_BASE_URL overrides this
# connect_timeout_secs = 10            # 1-120
# request_timeout_secs = 60            # unset = no client-side limit
# use_system_proxy = true

[endpoints]
# signup = "/signup"
# token = "/api/token"
# local_search = "/api/local_search"
# global_search = "/api/global_search"
# me = "/users/me"
# login_format = "json"                # json, form

[chat]
# mode = "local"                       # local, global
# attach_token = true

[logging]
# level = "info"                       # trace, debug, info, warn, error
"#
}
