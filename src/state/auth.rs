//! Authentication state machine.
//!
//! `Checking` exists only between construction and the first `bootstrap`;
//! no later transition re-enters it. Backend rejections on the sign-in and
//! sign-up paths never escape as errors: they land in `error_message` and
//! the session stays signed out.

use std::sync::Arc;

use crate::api::{self, ApiClient, ApiError};
use crate::models::{AuthResponse, Credentials, ErrorReply, Registration, User, ValidationErrors};
use crate::storage::TokenStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Checking,
    Authenticated,
    NotAuthenticated,
}

/// Shown when a sign-in rejection carries no usable message.
const SIGN_IN_FALLBACK: &str = "Información incorrecta";
/// Shown when a sign-up rejection carries no usable message.
const SIGN_UP_FALLBACK: &str = "Revise los datos ingresados";

/// Owns the session triple (status, user, error message) plus the in-memory
/// copy of the token. Consumers read through the accessors and drive
/// transitions through the operations; nothing else mutates the session.
pub struct AuthSession {
    client: ApiClient,
    tokens: Arc<dyn TokenStore>,
    status: AuthStatus,
    token: Option<String>,
    user: Option<User>,
    error_message: String,
}

impl AuthSession {
    pub fn new(client: ApiClient, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            client,
            tokens,
            status: AuthStatus::Checking,
            token: None,
            user: None,
            error_message: String::new(),
        }
    }

    pub fn status(&self) -> AuthStatus {
        self.status
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Empty string means no error.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// Resolves the initial `Checking` state, once at startup.
    ///
    /// With no stored token the session goes straight to signed-out. With one,
    /// the backend validates it; any failure also degrades to signed-out, but
    /// the stored token is deliberately left in place so the next start can
    /// retry it. On success the (possibly refreshed) token replaces the
    /// stored one.
    pub async fn bootstrap(&mut self) {
        match self.tokens.load() {
            Ok(Some(_)) => {}
            _ => {
                self.enter_not_authenticated();
                return;
            }
        }

        match api::auth::renew(&self.client).await {
            Ok(reply) => {
                tracing::info!("Session restored for {}", reply.user.email);
                self.enter_authenticated(reply);
            }
            Err(err) => {
                tracing::info!("Stored token failed validation: {}", err);
                self.enter_not_authenticated();
            }
        }
    }

    pub async fn sign_in(&mut self, credentials: &Credentials) {
        match api::auth::login(&self.client, credentials).await {
            Ok(reply) => {
                tracing::info!("Signed in as {}", reply.user.email);
                self.enter_authenticated(reply);
            }
            Err(err) => {
                self.enter_not_authenticated();
                self.error_message = sign_in_error_message(&err);
            }
        }
    }

    pub async fn sign_up(&mut self, registration: &Registration) {
        match api::auth::register(&self.client, registration).await {
            Ok(reply) => {
                tracing::info!("Registered {}", reply.user.email);
                self.enter_authenticated(reply);
            }
            Err(err) => {
                self.enter_not_authenticated();
                self.error_message = sign_up_error_message(&err);
            }
        }
    }

    pub fn log_out(&mut self) {
        if let Err(err) = self.tokens.clear() {
            tracing::warn!("Failed to clear stored token: {}", err);
        }
        self.enter_not_authenticated();
    }

    /// Clears the error message and nothing else.
    pub fn remove_error(&mut self) {
        self.error_message.clear();
    }

    fn enter_authenticated(&mut self, reply: AuthResponse) {
        if let Err(err) = self.tokens.save(&reply.token) {
            tracing::warn!("Failed to persist token: {}", err);
        }
        self.status = AuthStatus::Authenticated;
        self.token = Some(reply.token);
        self.user = Some(reply.user);
        self.error_message.clear();
    }

    fn enter_not_authenticated(&mut self) {
        self.status = AuthStatus::NotAuthenticated;
        self.token = None;
        self.user = None;
    }
}

/// Message mapping for `/auth/login` rejections: the backend sends `{ msg }`.
fn sign_in_error_message(err: &ApiError) -> String {
    err.reply_body()
        .and_then(|body| serde_json::from_str::<ErrorReply>(body).ok())
        .map(|reply| reply.msg)
        .unwrap_or_else(|| SIGN_IN_FALLBACK.to_string())
}

/// Message mapping for `/usuarios` rejections: the backend sends a validation
/// list `{ errors: [{ msg }, ...] }` and only the first entry is shown. The
/// shape mismatch with sign-in is the backend's, kept visible here.
fn sign_up_error_message(err: &ApiError) -> String {
    err.reply_body()
        .and_then(|body| serde_json::from_str::<ValidationErrors>(body).ok())
        .and_then(|reply| reply.errors.into_iter().next())
        .map(|entry| entry.msg)
        .unwrap_or_else(|| SIGN_UP_FALLBACK.to_string())
}
