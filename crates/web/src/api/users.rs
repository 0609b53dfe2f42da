//! User account operations (admin only on the backend).

use reqwest::Method;
use secrecy::SecretString;
use serde::de::IgnoredAny;
use tracing::instrument;

use taskboard_core::{User, UserDraft, UserId};

use super::{ApiClient, ApiError, DataEnvelope};

impl ApiClient {
    /// List all user accounts.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn list_users(&self, token: &SecretString) -> Result<Vec<User>, ApiError> {
        let response: DataEnvelope<Vec<User>> = self.get(&["users"], Some(token)).await?;
        Ok(response.data)
    }

    /// Get a single user by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the user is not found or the API request fails.
    #[instrument(skip(self, token), fields(user_id = %id))]
    pub async fn get_user(&self, token: &SecretString, id: &UserId) -> Result<User, ApiError> {
        let response: DataEnvelope<User> = self.get(&["users", id.as_str()], Some(token)).await?;
        Ok(response.data)
    }

    /// Create a user account.
    ///
    /// # Errors
    ///
    /// Returns error if the backend rejects the draft or the request fails.
    #[instrument(skip(self, token), fields(email = %draft.email))]
    pub async fn create_user(&self, token: &SecretString, draft: &UserDraft) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .send_json(Method::POST, &["users"], Some(token), draft)
            .await?;
        Ok(())
    }

    /// Update a user account.
    ///
    /// # Errors
    ///
    /// Returns error if the backend rejects the draft or the request fails.
    #[instrument(skip(self, token), fields(user_id = %id))]
    pub async fn update_user(
        &self,
        token: &SecretString,
        id: &UserId,
        draft: &UserDraft,
    ) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .send_json(Method::PUT, &["users", id.as_str()], Some(token), draft)
            .await?;
        Ok(())
    }

    /// Delete a user account.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, token), fields(user_id = %id))]
    pub async fn delete_user(&self, token: &SecretString, id: &UserId) -> Result<(), ApiError> {
        self.delete(&["users", id.as_str()], Some(token)).await
    }
}
