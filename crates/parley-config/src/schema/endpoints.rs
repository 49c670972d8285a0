use serde::{Deserialize, Serialize};

/// How the sign-in request body is encoded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoginFormat {
    /// `{"username": .., "password": ..}` as JSON.
    #[default]
    Json,
    /// `username=..&password=..` as an OAuth2 password form.
    Form,
}

/// Paths of the remote calls, relative to `server.base_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub signup: String,
    pub token: String,
    pub local_search: String,
    pub global_search: String,
    pub me: String,
    pub login_format: LoginFormat,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            signup: "/signup".into(),
            token: "/api/token".into(),
            local_search: "/api/local_search".into(),
            global_search: "/api/global_search".into(),
            me: "/users/me".into(),
            login_format: LoginFormat::Json,
        }
    }
}
