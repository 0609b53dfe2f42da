//! Login against the backend.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use super::{ApiClient, ApiError, LoginEnvelope, LoginResponse};

impl ApiClient {
    /// Exchange credentials for a bearer token and the user's profile.
    ///
    /// `POST /users/login` with `{ email, password }`. Sent without an
    /// `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Api` with the backend's message when the
    /// credentials are rejected, or a transport/parse error.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, ApiError> {
        let body = serde_json::json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let envelope: LoginEnvelope = self
            .send_json(Method::POST, &["users", "login"], None, &body)
            .await?;
        Ok(envelope.into())
    }
}
