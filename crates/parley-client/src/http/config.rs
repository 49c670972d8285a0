//! HTTP backend configuration.

use std::time::Duration;

/// How the sign-in body is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginFormat {
    #[default]
    Json,
    /// `application/x-www-form-urlencoded`, for OAuth2 password-flow servers.
    Form,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub base_url: String,
    pub signup_path: String,
    pub token_path: String,
    pub local_search_path: String,
    pub global_search_path: String,
    pub me_path: String,
    pub login_format: LoginFormat,
    pub connect_timeout: Duration,
    /// Whole-request limit. `None` leaves it to the transport.
    pub request_timeout: Option<Duration>,
    /// Honour `HTTP_PROXY` / `HTTPS_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl HttpConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            signup_path: "/signup".into(),
            token_path: "/api/token".into(),
            local_search_path: "/api/local_search".into(),
            global_search_path: "/api/global_search".into(),
            me_path: "/users/me".into(),
            login_format: LoginFormat::Json,
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            use_system_proxy: true,
        }
    }

    pub fn with_login_format(mut self, format: LoginFormat) -> Self {
        self.login_format = format;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_system_proxy(mut self, enabled: bool) -> Self {
        self.use_system_proxy = enabled;
        self
    }

    /// Absolute URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}
