//! Turns loaded configuration into client components.

use std::time::Duration;

use parley_client::{HttpConfig, LoginFormat, SearchMode};
use parley_config::schema::{LoginFormat as ConfigLoginFormat, SearchModeConfig};
use parley_common::ConfigError;
use parley_config::{ParleyConfig, BASE_URL_ENV};

/// Settle the effective config: the loaded file (or defaults when it
/// failed), then `PARLEY_BASE_URL`, then `--base-url`. Each override is
/// checked on its own and skipped when invalid, so a bad override never
/// costs the rest of the file. Returns the problems to log.
pub fn resolve_config(
    loaded: Result<ParleyConfig, ConfigError>,
    env_base_url: Option<&str>,
    cli_base_url: Option<&str>,
) -> (ParleyConfig, Vec<String>) {
    let mut warnings = Vec::new();
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            warnings.push(format!("Config load failed, using defaults: {e}"));
            ParleyConfig::default()
        }
    };

    let overrides = [(BASE_URL_ENV, env_base_url), ("--base-url", cli_base_url)];
    for (source, url) in overrides {
        let Some(url) = url else { continue };
        if let Err(e) = parley_config::apply_base_url_override(&mut config, url) {
            warnings.push(format!("Ignoring {source}: {e}"));
        }
    }

    (config, warnings)
}

pub fn http_config(config: &ParleyConfig) -> HttpConfig {
    let endpoints = &config.endpoints;
    let mut http = HttpConfig::new(config.server.base_url.clone())
        .with_login_format(login_format(endpoints.login_format))
        .with_connect_timeout(Duration::from_secs(u64::from(
            config.server.connect_timeout_secs,
        )))
        .with_request_timeout(
            config
                .server
                .request_timeout_secs
                .map(|secs| Duration::from_secs(u64::from(secs))),
        )
        .with_system_proxy(config.server.use_system_proxy);
    http.signup_path = endpoints.signup.clone();
    http.token_path = endpoints.token.clone();
    http.local_search_path = endpoints.local_search.clone();
    http.global_search_path = endpoints.global_search.clone();
    http.me_path = endpoints.me.clone();
    http
}

pub fn search_mode(mode: SearchModeConfig) -> SearchMode {
    match mode {
        SearchModeConfig::Local => SearchMode::Local,
        SearchModeConfig::Global => SearchMode::Global,
    }
}

fn login_format(format: ConfigLoginFormat) -> LoginFormat {
    match format {
        ConfigLoginFormat::Json => LoginFormat::Json,
        ConfigLoginFormat::Form => LoginFormat::Form,
    }
}

/// `EnvFilter` directive: CLI flag wins, then the config file.
pub fn log_directive(cli_level: Option<&str>, config: &ParleyConfig) -> String {
    match cli_level {
        Some(level) if level.contains('=') => level.to_string(),
        Some(level) => format!("parley={level}"),
        None => format!("parley={}", config.logging.level.as_directive()),
    }
}
