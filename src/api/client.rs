use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::storage::TokenStore;

/// Header the backend expects the session token on.
pub const TOKEN_HEADER: &str = "x-token";

#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Bad request")]
    BadRequest(String),
    #[error("Authentication required")]
    Unauthorized(String),
    #[error("Access denied")]
    Forbidden,
    #[error("Not found")]
    NotFound(String),
    #[error("Server error: {0}")]
    Server(String),
    #[error("Invalid response: {0}")]
    Parse(String),
}

impl ApiError {
    /// Body text the backend attached to a rejected request, when it sent one.
    pub fn reply_body(&self) -> Option<&str> {
        match self {
            ApiError::BadRequest(body)
            | ApiError::Unauthorized(body)
            | ApiError::NotFound(body) => Some(body),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

/// Token interception stage: a pure function of (current token, request).
///
/// A missing token is not an error here; the request goes out bare and any
/// authorization failure comes back to the caller as an ordinary failed
/// response.
pub fn attach_token(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.header(TOKEN_HEADER, token),
        None => request,
    }
}

/// Single chokepoint for outbound requests to the configured backend.
///
/// Every request passes through [`attach_token`] with the token read from the
/// store at send time, so a token persisted by sign-in is carried by the very
/// next request.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    base_url: String,
    client: Client,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenStore>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        ApiClient {
            inner: Arc::new(ApiClientInner {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                client,
                tokens,
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    /// Reads (never writes) the token store. A store that fails to read is
    /// treated as holding no token.
    fn current_token(&self) -> Option<String> {
        match self.inner.tokens.load() {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!("Token store read failed: {}", err);
                None
            }
        }
    }

    fn intercept(&self, request: RequestBuilder) -> RequestBuilder {
        attach_token(request, self.current_token().as_deref())
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.inner.client.get(self.url(path));
        let response = self.intercept(request).send().await?;
        self.handle_response(response).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.inner.client.post(self.url(path)).json(body);
        let response = self.intercept(request).send().await?;
        self.handle_response(response).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let request = self.inner.client.put(self.url(path)).json(body);
        let response = self.intercept(request).send().await?;
        self.handle_response(response).await
    }

    pub async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let request = self.inner.client.put(self.url(path)).multipart(form);
        let response = self.intercept(request).send().await?;
        self.handle_response(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.inner.client.delete(self.url(path));
        let response = self.intercept(request).send().await?;
        self.handle_empty_response(response).await
    }

    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();

        match status {
            StatusCode::OK
            | StatusCode::CREATED
            | StatusCode::ACCEPTED
            | StatusCode::NO_CONTENT => Ok(()),
            _ => Err(self.map_failure(status, response).await),
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        match status {
            StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED => response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parse(e.to_string())),
            _ => Err(self.map_failure(status, response).await),
        }
    }

    /// Keeps the response body on the variants whose callers extract backend
    /// messages from it.
    async fn map_failure(&self, status: StatusCode, response: reqwest::Response) -> ApiError {
        let text = response.text().await.unwrap_or_default();

        match status {
            StatusCode::BAD_REQUEST => ApiError::BadRequest(text),
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized(text),
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound(text),
            _ => ApiError::Server(format!("{}: {}", status, text)),
        }
    }
}
