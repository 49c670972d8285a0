//! Full configuration validation.
//!
//! Collects every problem instead of stopping at the first one.

use std::sync::LazyLock;

use regex::Regex;

use crate::schema::ParleyConfig;
use parley_common::ConfigError;

static BASE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/?#]+(/[^\s?#]*)?$").unwrap());

static PATH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/[A-Za-z0-9._~/-]*$").unwrap());

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ParleyConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_base_url(&mut errors, &config.server.base_url);
    validate_range(
        &mut errors,
        "server.connect_timeout_secs",
        config.server.connect_timeout_secs,
        1,
        120,
    );
    if let Some(timeout) = config.server.request_timeout_secs {
        validate_range(&mut errors, "server.request_timeout_secs", timeout, 1, 3600);
    }

    let endpoints = &config.endpoints;
    validate_path(&mut errors, "endpoints.signup", &endpoints.signup);
    validate_path(&mut errors, "endpoints.token", &endpoints.token);
    validate_path(&mut errors, "endpoints.local_search", &endpoints.local_search);
    validate_path(&mut errors, "endpoints.global_search", &endpoints.global_search);
    validate_path(&mut errors, "endpoints.me", &endpoints.me);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Check a base URL given outside the config file.
pub fn validate_base_url_override(url: &str) -> Result<(), ConfigError> {
    let mut errors = Vec::new();
    validate_base_url(&mut errors, url);
    match errors.pop() {
        None => Ok(()),
        Some(e) => Err(ConfigError::ValidationError(e)),
    }
}

fn validate_base_url(errors: &mut Vec<String>, url: &str) {
    if !BASE_URL_RE.is_match(url) {
        errors.push(format!(
            "server.base_url = {url:?} must be an http:// or https:// URL"
        ));
    } else if url.ends_with('/') {
        errors.push(format!(
            "server.base_url = {url:?} must not end with '/'"
        ));
    }
}

fn validate_path(errors: &mut Vec<String>, name: &str, path: &str) {
    if !PATH_RE.is_match(path) {
        errors.push(format!("{name} = {path:?} must be an absolute path like \"/signup\""));
    }
}

fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}
