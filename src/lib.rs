//! Client-side session and catalog state for the cafe storefront backend.
//!
//! Three pieces, wired leaf-first:
//!
//! - [`storage::TokenStore`]: durable storage for the single session token.
//! - [`api::ApiClient`]: the one chokepoint for outbound requests, attaching
//!   the stored token to every request under the `x-token` header.
//! - [`state::AuthSession`] and [`state::ProductCache`]: the two state
//!   owners. Consumers get read-only views and drive changes through their
//!   operations.
//!
//! ```no_run
//! use std::sync::Arc;
//! use cafe_client::{ApiClient, ApiConfig, AuthSession, FileTokenStore, ProductCache};
//!
//! # async fn run() {
//! let config = ApiConfig::from_env();
//! let tokens = Arc::new(FileTokenStore::new(&config.token_path));
//! let client = ApiClient::new(&config, tokens.clone());
//!
//! let mut session = AuthSession::new(client.clone(), tokens);
//! session.bootstrap().await;
//!
//! let mut catalog = ProductCache::new(client);
//! if session.is_authenticated() {
//!     catalog.load_all().await.ok();
//! }
//! # }
//! ```

pub mod api;
pub mod config;
pub mod models;
pub mod state;
pub mod storage;

pub use api::{ApiClient, ApiError};
pub use config::ApiConfig;
pub use state::{AuthSession, AuthStatus, ProductCache};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};
