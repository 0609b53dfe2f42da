//! Task operations.

use reqwest::Method;
use secrecy::SecretString;
use serde::de::IgnoredAny;
use tracing::instrument;

use taskboard_core::{Task, TaskDraft, TaskId, TaskStatus};

use super::{ApiClient, ApiError, DataEnvelope, StatusUpdate};

impl ApiClient {
    /// List every task visible to the token's user.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn list_tasks(&self, token: &SecretString) -> Result<Vec<Task>, ApiError> {
        let response: DataEnvelope<Vec<Task>> = self.get(&["tasks"], Some(token)).await?;
        Ok(response.data)
    }

    /// List tasks with the given status, filtered by the backend.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, token), fields(status = %status))]
    pub async fn list_tasks_by_status(
        &self,
        token: &SecretString,
        status: TaskStatus,
    ) -> Result<Vec<Task>, ApiError> {
        let response: DataEnvelope<Vec<Task>> = self
            .get(&["tasks", "status", status.as_str()], Some(token))
            .await?;
        Ok(response.data)
    }

    /// Get a single task by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the task is not found or the API request fails.
    #[instrument(skip(self, token), fields(task_id = %id))]
    pub async fn get_task(&self, token: &SecretString, id: &TaskId) -> Result<Task, ApiError> {
        let response: DataEnvelope<Task> =
            self.get(&["tasks", id.as_str()], Some(token)).await?;
        Ok(response.data)
    }

    /// Create a task.
    ///
    /// # Errors
    ///
    /// Returns error if the backend rejects the draft or the request fails.
    #[instrument(skip(self, token, draft), fields(title = %draft.title))]
    pub async fn create_task(&self, token: &SecretString, draft: &TaskDraft) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .send_json(Method::POST, &["tasks"], Some(token), draft)
            .await?;
        Ok(())
    }

    /// Replace a task's fields.
    ///
    /// # Errors
    ///
    /// Returns error if the backend rejects the draft or the request fails.
    #[instrument(skip(self, token, draft), fields(task_id = %id))]
    pub async fn update_task(
        &self,
        token: &SecretString,
        id: &TaskId,
        draft: &TaskDraft,
    ) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .send_json(Method::PUT, &["tasks", id.as_str()], Some(token), draft)
            .await?;
        Ok(())
    }

    /// Change only a task's status.
    ///
    /// # Errors
    ///
    /// Returns error if the backend refuses the change or the request fails.
    #[instrument(skip(self, token), fields(task_id = %id, status = %status))]
    pub async fn update_task_status(
        &self,
        token: &SecretString,
        id: &TaskId,
        status: TaskStatus,
    ) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .send_json(
                Method::PATCH,
                &["tasks", id.as_str(), "status"],
                Some(token),
                &StatusUpdate { status },
            )
            .await?;
        Ok(())
    }

    /// Delete a task.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, token), fields(task_id = %id))]
    pub async fn delete_task(&self, token: &SecretString, id: &TaskId) -> Result<(), ApiError> {
        self.delete(&["tasks", id.as_str()], Some(token)).await
    }
}
