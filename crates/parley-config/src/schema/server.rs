use serde::{Deserialize, Serialize};

/// Where the answer service lives and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Scheme + host (+ port) of the service, without a trailing slash.
    pub base_url: String,
    /// TCP connect timeout in seconds (valid range: 1-120).
    pub connect_timeout_secs: u32,
    /// Overall request timeout in seconds. Unset means the transport default.
    pub request_timeout_secs: Option<u32>,
    /// Honour proxy environment variables.
    pub use_system_proxy: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            connect_timeout_secs: 10,
            request_timeout_secs: None,
            use_system_proxy: true,
        }
    }
}
