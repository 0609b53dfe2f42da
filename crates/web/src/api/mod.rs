//! Task backend REST API client.
//!
//! Every dashboard read and write goes through [`ApiClient`]. The backend owns
//! all task and user data and authorizes every call; this client only
//! shapes requests and turns failures into messages a user can read.
//!
//! # API Reference
//!
//! - Base URL: configured via `TASKBOARD_API_URL`
//! - Authentication: `Authorization: Bearer <token>` (token from `POST /users/login`)
//! - Reads are wrapped as `{ "data": ... }`
//! - Failures carry `{ "message": "..." }`
//!
//! No retries and no caching. A timeout is only applied when configured.

mod auth;
mod client;
mod tasks;
pub mod types;
mod users;

pub use client::ApiClient;
pub use types::*;

use thiserror::Error;

/// Message shown when the backend gives no usable reason.
pub const FALLBACK_MESSAGE: &str = "Something went wrong";

/// Message shown when the backend cannot be reached at all.
pub const UNREACHABLE_MESSAGE: &str = "Unable to reach the task service";

/// Errors that can occur when calling the task backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connection refused, DNS, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// A success response body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The request URL could not be built.
    #[error("Invalid request URL: {0}")]
    Url(String),
}

impl ApiError {
    /// The text shown to the user for this failure.
    ///
    /// Backend-reported failures surface their `message` verbatim; every
    /// other kind collapses to a generic sentence.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Http(_) => UNREACHABLE_MESSAGE.to_string(),
            Self::Parse(_) | Self::Url(_) => FALLBACK_MESSAGE.to_string(),
        }
    }

    /// Whether the backend rejected the session token.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }

    /// HTTP status returned by the backend, if it answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
