//! ChatBackend trait implementation for HttpBackend.
//!
//! Callers wrap each call in a span carrying their correlation id, so the
//! request lines below are logged under it.

use async_trait::async_trait;
use tracing::debug;

use crate::session_store::SessionToken;
use crate::{
    ApiError, ChatBackend, LoginRequest, QueryRequest, QueryResponse, SearchMode, SignupRequest,
    SignupResponse, TokenResponse, UserProfile,
};

use super::client::{decode, decode_or_default, send_error, HttpBackend};
use super::config::LoginFormat;

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse, ApiError> {
        let url = self.config.url(&self.config.signup_path);
        debug!(url = %url, "POST signup");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(send_error)?;

        decode_or_default(response).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        let url = self.config.url(&self.config.token_path);
        debug!(url = %url, format = ?self.config.login_format, "POST token");

        let builder = self.http.post(&url);
        let builder = match self.config.login_format {
            LoginFormat::Json => builder.json(request),
            LoginFormat::Form => builder.form(request),
        };
        let response = builder.send().await.map_err(send_error)?;

        decode(response).await
    }

    async fn search(
        &self,
        request: &QueryRequest,
        mode: SearchMode,
        token: Option<&SessionToken>,
    ) -> Result<QueryResponse, ApiError> {
        let url = self.search_url(mode);
        debug!(url = %url, mode = mode.as_str(), "POST search");

        let mut builder = self.http.post(&url).json(request);
        if let Some(token) = token {
            builder = builder.bearer_auth(token.as_str());
        }
        let response = builder.send().await.map_err(send_error)?;

        decode(response).await
    }

    async fn current_user(&self, token: &SessionToken) -> Result<UserProfile, ApiError> {
        let url = self.config.url(&self.config.me_path);
        debug!(url = %url, "GET me");

        let response = self
            .http
            .get(&url)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(send_error)?;

        decode(response).await
    }
}
