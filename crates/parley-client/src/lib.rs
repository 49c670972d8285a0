//! Client core for Parley.
//!
//! Provides the pieces a chat front end needs to talk to the answer
//! service:
//! - `AuthClient`: sign-up / sign-in, turning every outcome into a status
//! - `SessionStore`: the one bearer token the client holds
//! - `Conversation`: the append-only transcript and the query round trip
//! - `HttpBackend`: the reqwest implementation of `ChatBackend`

pub mod auth;
pub mod conversation;
pub mod http;
pub mod session_store;
pub mod wire;

#[cfg(test)]
pub(crate) mod test_support;

use std::fmt;

use async_trait::async_trait;

pub use auth::{AuthClient, AuthStatus};
pub use conversation::{Conversation, ConversationState, FALLBACK_REPLY};
pub use http::{HttpBackend, HttpConfig, LoginFormat};
pub use session_store::{SessionStore, SessionToken};
pub use wire::{
    LoginRequest, QueryRequest, QueryResponse, SignupRequest, SignupResponse, TokenResponse,
    UserProfile,
};

/// The remote calls the client makes. One method per endpoint.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse, ApiError>;

    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError>;

    async fn search(
        &self,
        request: &QueryRequest,
        mode: SearchMode,
        token: Option<&SessionToken>,
    ) -> Result<QueryResponse, ApiError>;

    async fn current_user(&self, token: &SessionToken) -> Result<UserProfile, ApiError>;
}

/// Who wrote a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Agent,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Agent => "agent",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transcript entry. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Agent,
            text: text.into(),
        }
    }
}

/// Which search endpoint answers a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchMode {
    /// Entity-level search over the indexed documents.
    #[default]
    Local,
    /// Community-summary search across the whole corpus.
    Global,
}

impl SearchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchMode::Local => "local",
            SearchMode::Global => "global",
        }
    }
}

impl std::str::FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(SearchMode::Local),
            "global" => Ok(SearchMode::Global),
            other => Err(format!("unknown search mode '{other}' (expected local or global)")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
    #[error("Not signed in")]
    NotAuthenticated,
}

impl ApiError {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_serializes_lowercase() {
        let json = serde_json::to_string(&Message::agent("hi")).unwrap();
        assert_eq!(json, r#"{"sender":"agent","text":"hi"}"#);
    }

    #[test]
    fn search_mode_parses_case_insensitively() {
        assert_eq!("Global".parse::<SearchMode>().unwrap(), SearchMode::Global);
        assert_eq!(" local ".parse::<SearchMode>().unwrap(), SearchMode::Local);
        assert!("semantic".parse::<SearchMode>().is_err());
    }

    #[test]
    fn api_error_status_only_for_http_errors() {
        let err = ApiError::Status {
            status: 401,
            body: "nope".into(),
        };
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "HTTP 401: nope");
        assert_eq!(ApiError::Timeout.status(), None);
        assert_eq!(ApiError::NetworkError("refused".into()).status(), None);
    }
}
