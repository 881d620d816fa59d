use serde::{Deserialize, Serialize};

/// Sign-in form data. Field names on the wire follow the backend's locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "correo")]
    pub email: String,
    pub password: String,
}

/// Sign-up form data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    pub password: String,
}

/// `{ token, usuario }` envelope returned by login, register and token renewal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(rename = "usuario")]
    pub user: User,
}

/// User info returned to the client (no password)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "rol")]
    pub role: String,
    #[serde(rename = "estado", default)]
    pub active: bool,
}

/// `{ msg }` error body, the shape `/auth/login` rejects with.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorReply {
    pub msg: String,
}

/// `{ errors: [{ msg }, ...] }` validation body, the shape `/usuarios` rejects with.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<ErrorReply>,
}
