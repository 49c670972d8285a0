//! HTTP backend struct and response decoding.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{ApiError, SearchMode};

use super::config::HttpConfig;

/// Longest error body kept in `ApiError::Status`.
const ERROR_BODY_LIMIT: usize = 200;

pub struct HttpBackend {
    pub(crate) config: HttpConfig,
    pub(crate) http: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: HttpConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::NetworkError(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    pub(crate) fn search_url(&self, mode: SearchMode) -> String {
        match mode {
            SearchMode::Local => self.config.url(&self.config.local_search_path),
            SearchMode::Global => self.config.url(&self.config.global_search_path),
        }
    }
}

pub(crate) fn send_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::NetworkError(e.to_string())
    }
}

/// Turn a response into `T`, or into the matching `ApiError`.
pub(crate) async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let bytes = ensure_success(response).await?.bytes().await.map_err(send_error)?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::ParseError(e.to_string()))
}

/// Like `decode`, but a 2xx whose body is empty or not a `T` yields
/// `T::default()`. Only the status decides success.
pub(crate) async fn decode_or_default<T: DeserializeOwned + Default>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let bytes = ensure_success(response).await?.bytes().await.map_err(send_error)?;
    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(value),
        Err(e) => {
            if !bytes.is_empty() {
                debug!(error = %e, "ignoring undecodable success body");
            }
            Ok(T::default())
        }
    }
}

/// Pass a 2xx response through; map anything else to `ApiError::Status`.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let body = text.chars().take(ERROR_BODY_LIMIT).collect::<String>();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}
