use crate::api::{ApiClient, ApiError};
use crate::models::{AuthResponse, Credentials, Registration};

/// Validates the stored token; on success the backend answers with a
/// refreshed token and the owning user.
pub async fn renew(client: &ApiClient) -> Result<AuthResponse, ApiError> {
    client.get("/auth").await
}

pub async fn login(
    client: &ApiClient,
    credentials: &Credentials,
) -> Result<AuthResponse, ApiError> {
    client.post("/auth/login", credentials).await
}

pub async fn register(
    client: &ApiClient,
    registration: &Registration,
) -> Result<AuthResponse, ApiError> {
    client.post("/usuarios", registration).await
}
