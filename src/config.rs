//! Client configuration: backend address and token-file location.

use std::path::PathBuf;

/// Backend address used when `CAFE_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub token_path: PathBuf,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, token_path: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            token_path: token_path.into(),
        }
    }

    /// Reads configuration from the environment, loading a `.env` file when
    /// one is present.
    ///
    /// - `CAFE_API_URL`: backend base address
    /// - `CAFE_TOKEN_FILE`: where the session token is persisted
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let base_url =
            std::env::var("CAFE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let token_path = std::env::var("CAFE_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_token_path());

        Self {
            base_url,
            token_path,
        }
    }
}

/// Platform data directory, the usual home for the persisted token.
pub fn default_token_path() -> PathBuf {
    directories::ProjectDirs::from("com", "cafe", "cafe-client")
        .map(|dirs| dirs.data_dir().join("token"))
        .unwrap_or_else(|| PathBuf::from(".cafe-token"))
}
