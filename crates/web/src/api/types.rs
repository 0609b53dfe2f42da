//! Wire types for the task backend.
//!
//! Domain documents (`Task`, `User`) live in `taskboard-core`; this module
//! only holds the envelopes around them.

use serde::Deserialize;

use taskboard_core::{TaskStatus, User};

/// `{ "data": ... }` envelope used by read endpoints.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Successful login: the bearer token and the account it belongs to.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

/// Login responses arrive either bare or inside a `data` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LoginEnvelope {
    Wrapped { data: LoginResponse },
    Bare(LoginResponse),
}

impl From<LoginEnvelope> for LoginResponse {
    fn from(envelope: LoginEnvelope) -> Self {
        match envelope {
            LoginEnvelope::Wrapped { data } | LoginEnvelope::Bare(data) => data,
        }
    }
}

/// Body of `PATCH /tasks/{id}/status`.
#[derive(Debug, serde::Serialize)]
pub(crate) struct StatusUpdate {
    pub status: TaskStatus,
}
