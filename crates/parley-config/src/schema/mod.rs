//! Configuration schema types for Parley.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod chat;
mod endpoints;
mod logging;
mod server;

pub use chat::*;
pub use endpoints::*;
pub use logging::*;
pub use server::*;

use serde::{Deserialize, Serialize};

/// Root configuration for Parley.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParleyConfig {
    pub server: ServerConfig,
    pub endpoints: EndpointsConfig,
    pub chat: ChatConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_server() {
        let config = ParleyConfig::default();
        assert_eq!(config.server.base_url, "http://localhost:8000");
        assert_eq!(config.server.connect_timeout_secs, 10);
        assert_eq!(config.server.request_timeout_secs, None);
    }

    #[test]
    fn default_endpoints() {
        let config = ParleyConfig::default();
        assert_eq!(config.endpoints.signup, "/signup");
        assert_eq!(config.endpoints.token, "/api/token");
        assert_eq!(config.endpoints.local_search, "/api/local_search");
        assert_eq!(config.endpoints.global_search, "/api/global_search");
        assert_eq!(config.endpoints.me, "/users/me");
        assert_eq!(config.endpoints.login_format, LoginFormat::Json);
    }

    #[test]
    fn default_chat_and_logging() {
        let config = ParleyConfig::default();
        assert_eq!(config.chat.mode, SearchModeConfig::Local);
        assert!(config.chat.attach_token);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: ParleyConfig = toml::from_str(
            r#"
[server]
base_url = "https://grants.example.org"

[endpoints]
login_format = "form"
"#,
        )
        .unwrap();
        assert_eq!(config.server.base_url, "https://grants.example.org");
        assert_eq!(config.server.connect_timeout_secs, 10);
        assert_eq!(config.endpoints.login_format, LoginFormat::Form);
        assert_eq!(config.endpoints.signup, "/signup");
    }

    #[test]
    fn empty_toml_is_default() {
        let config: ParleyConfig = toml::from_str("").unwrap();
        assert_eq!(config.endpoints.token, "/api/token");
    }
}
