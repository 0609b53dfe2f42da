//! Task create, edit, status change and delete.

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use taskboard_core::{
    Deadline, DeadlineError, LANDING_PATH, StatusFilter, TaskDraft, TaskId, TaskPermissions,
    TaskStatus, User, UserId,
};

use crate::{
    components::{NavView, TaskFormView, dashboard_href},
    error::AppError,
    filters,
    middleware::{RequireAdmin, RequireSession, take_flash_error},
    models::UserSession,
    state::AppState,
};

use super::{
    ConfirmDeleteTemplate, backend_failure, redirect_with_error, redirect_with_message, render,
};

/// Create/edit task page template.
#[derive(Template)]
#[template(path = "tasks/form.html")]
pub struct TaskFormTemplate {
    pub nav: Option<NavView>,
    pub form: TaskFormView,
    pub error: Option<String>,
}

/// Create/edit form submission.
#[derive(Debug, Default, Deserialize)]
pub struct TaskFormInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, rename = "assignedTo")]
    pub assigned_to: String,
    #[serde(default)]
    pub deadline: String,
}

impl TaskFormInput {
    /// Check required fields and build the body sent to the backend.
    ///
    /// # Errors
    ///
    /// Returns the message to show next to the form.
    pub fn to_draft(&self) -> Result<TaskDraft, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required".to_string());
        }

        let assigned_to = self.assigned_to.trim();
        if assigned_to.is_empty() {
            return Err("Please select a user to assign the task to".to_string());
        }

        let status = self
            .status
            .parse::<TaskStatus>()
            .map_err(|_| "Please choose a valid status".to_string())?;

        let deadline = Deadline::parse(&self.deadline).map_err(|e| match e {
            DeadlineError::Empty => "Deadline is required".to_string(),
            DeadlineError::Invalid(_) => "Deadline must be a valid date".to_string(),
        })?;

        Ok(TaskDraft {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            status,
            assigned_to: UserId::new(assigned_to),
            deadline,
        })
    }

    fn echo(&self, form: TaskFormView) -> TaskFormView {
        form.with_values(
            &self.title,
            &self.description,
            &self.status,
            &self.assigned_to,
            &self.deadline,
        )
    }
}

/// Status selector submission from a dashboard row.
#[derive(Debug, Deserialize)]
pub struct StatusInput {
    pub status: String,
    /// Filter the dashboard was showing, to return to it.
    #[serde(default)]
    pub filter: Option<String>,
}

fn form_page(current: &UserSession, form: TaskFormView, error: Option<String>) -> TaskFormTemplate {
    TaskFormTemplate {
        nav: Some(NavView::new(current, "/dashboard")),
        form,
        error,
    }
}

/// Users offered as assignees. A failure leaves the select empty and
/// returns the message to show instead.
async fn assignees(
    state: &AppState,
    session: &Session,
    current: &UserSession,
) -> Result<(Vec<User>, Option<String>), AppError> {
    match state.api().list_users(&current.token).await {
        Ok(users) => Ok((users, None)),
        Err(e) => Ok((Vec::new(), Some(backend_failure(session, &e).await?))),
    }
}

/// New task form handler (admin only).
#[instrument(skip(current, state, session))]
pub async fn new_form(
    RequireAdmin(current): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let (users, error) = assignees(&state, &session, &current).await?;
    let error = error.or(take_flash_error(&session).await);

    Ok(render(&form_page(&current, TaskFormView::create(&users), error))?.into_response())
}

/// Create task handler (admin only).
///
/// Success returns to the unfiltered dashboard, which fetches the list
/// again. Failures show the form again with the submitted values.
#[instrument(skip(current, state, session, input), fields(title = %input.title))]
pub async fn create(
    RequireAdmin(current): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Form(input): Form<TaskFormInput>,
) -> Result<Response, AppError> {
    let message = match input.to_draft() {
        Ok(draft) => match state.api().create_task(&current.token, &draft).await {
            Ok(()) => {
                tracing::info!(title = %draft.title, assigned_to = %draft.assigned_to, "Task created");
                return Ok(Redirect::to(LANDING_PATH).into_response());
            }
            Err(e) => backend_failure(&session, &e).await?,
        },
        Err(message) => message,
    };

    let (users, _) = assignees(&state, &session, &current).await?;
    let form = input.echo(TaskFormView::create(&users));
    Ok(render(&form_page(&current, form, Some(message)))?.into_response())
}

/// Edit task form handler (admin only).
#[instrument(skip(current, state, session), fields(task_id = %id))]
pub async fn edit_form(
    RequireAdmin(current): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = TaskId::new(id);
    let (task, users) = tokio::join!(
        state.api().get_task(&current.token, &id),
        state.api().list_users(&current.token),
    );

    let task = match task {
        Ok(task) => task,
        Err(e) => return redirect_with_error(&session, &e, LANDING_PATH).await,
    };
    let users = match users {
        Ok(users) => users,
        Err(e) => return redirect_with_error(&session, &e, LANDING_PATH).await,
    };

    let error = take_flash_error(&session).await;
    Ok(render(&form_page(&current, TaskFormView::edit(&task, &users), error))?.into_response())
}

/// Update task handler (admin only).
#[instrument(skip(current, state, session, input), fields(task_id = %id))]
pub async fn update(
    RequireAdmin(current): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(input): Form<TaskFormInput>,
) -> Result<Response, AppError> {
    let id = TaskId::new(id);

    let message = match input.to_draft() {
        Ok(draft) => match state.api().update_task(&current.token, &id, &draft).await {
            Ok(()) => {
                tracing::info!("Task updated");
                return Ok(Redirect::to(LANDING_PATH).into_response());
            }
            Err(e) => backend_failure(&session, &e).await?,
        },
        Err(message) => message,
    };

    // Re-fetch for the form's heading and action; fall back to the dashboard
    // if the task is gone.
    let task = match state.api().get_task(&current.token, &id).await {
        Ok(task) => task,
        Err(_) => return redirect_with_message(&session, &message, LANDING_PATH).await,
    };
    let (users, _) = assignees(&state, &session, &current).await?;
    let form = input.echo(TaskFormView::edit(&task, &users));
    Ok(render(&form_page(&current, form, Some(message)))?.into_response())
}

/// Status change handler (admin, or a member on a task assigned to them).
///
/// Members are checked against the task's current assignee before the
/// backend is called. Completed tasks may still be moved back.
#[instrument(skip(current, state, session, input), fields(task_id = %id, status = %input.status))]
pub async fn update_status(
    RequireSession(current): RequireSession,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(input): Form<StatusInput>,
) -> Result<Response, AppError> {
    let id = TaskId::new(id);
    let back = dashboard_href(StatusFilter::from_query(input.filter.as_deref()));

    let Ok(status) = input.status.parse::<TaskStatus>() else {
        return redirect_with_message(&session, "Please choose a valid status", &back).await;
    };

    if !current.is_admin() {
        let task = match state.api().get_task(&current.token, &id).await {
            Ok(task) => task,
            Err(e) => return redirect_with_error(&session, &e, &back).await,
        };
        if !TaskPermissions::for_task(&current.user, &task).can_change_status {
            tracing::warn!(user_id = %current.user.id, "Status change on a task assigned to someone else");
            return redirect_with_message(
                &session,
                "You can only update the status of tasks assigned to you",
                &back,
            )
            .await;
        }
    }

    match state
        .api()
        .update_task_status(&current.token, &id, status)
        .await
    {
        Ok(()) => {
            tracing::info!("Task status updated");
            Ok(Redirect::to(&back).into_response())
        }
        Err(e) => redirect_with_error(&session, &e, &back).await,
    }
}

/// Delete confirmation page (admin only).
#[instrument(skip(current, state, session), fields(task_id = %id))]
pub async fn confirm_delete(
    RequireAdmin(current): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = TaskId::new(id);
    let task = match state.api().get_task(&current.token, &id).await {
        Ok(task) => task,
        Err(e) => return redirect_with_error(&session, &e, LANDING_PATH).await,
    };

    let encoded = urlencoding::encode(task.id.as_str());
    let template = ConfirmDeleteTemplate {
        nav: Some(NavView::new(&current, "/dashboard")),
        heading: "Delete Task",
        question: "Are you sure you want to delete this task?",
        subject: task.title,
        action: format!("/tasks/{encoded}/delete"),
        cancel_href: LANDING_PATH.to_string(),
    };

    Ok(render(&template)?.into_response())
}

/// Delete task handler (admin only).
#[instrument(skip(current, state, session), fields(task_id = %id))]
pub async fn delete(
    RequireAdmin(current): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = TaskId::new(id);
    match state.api().delete_task(&current.token, &id).await {
        Ok(()) => {
            tracing::info!("Task deleted");
            Ok(Redirect::to(LANDING_PATH).into_response())
        }
        Err(e) => redirect_with_error(&session, &e, LANDING_PATH).await,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input() -> TaskFormInput {
        TaskFormInput {
            title: "  Write report ".to_string(),
            description: "Numbers".to_string(),
            status: "In Progress".to_string(),
            assigned_to: "u1".to_string(),
            deadline: "2025-01-05".to_string(),
        }
    }

    #[test]
    fn test_valid_input_builds_draft() {
        let draft = input().to_draft().unwrap();
        assert_eq!(draft.title, "Write report");
        assert_eq!(draft.status, TaskStatus::InProgress);
        assert_eq!(draft.assigned_to, UserId::new("u1"));
        assert_eq!(draft.deadline.iso(), "2025-01-05");
    }

    #[test]
    fn test_required_fields() {
        let missing_title = TaskFormInput {
            title: "   ".to_string(),
            ..input()
        };
        assert_eq!(missing_title.to_draft().unwrap_err(), "Title is required");

        let missing_assignee = TaskFormInput {
            assigned_to: String::new(),
            ..input()
        };
        assert!(missing_assignee.to_draft().is_err());

        let missing_deadline = TaskFormInput {
            deadline: String::new(),
            ..input()
        };
        assert_eq!(missing_deadline.to_draft().unwrap_err(), "Deadline is required");
    }

    #[test]
    fn test_rejects_unknown_status() {
        let bad = TaskFormInput {
            status: "Done".to_string(),
            ..input()
        };
        assert_eq!(bad.to_draft().unwrap_err(), "Please choose a valid status");
    }

    #[test]
    fn test_form_field_names() {
        let input: TaskFormInput = serde_json::from_value(serde_json::json!({
            "title": "T",
            "assignedTo": "u7",
            "deadline": "2025-02-01",
            "status": "Pending"
        }))
        .unwrap();
        assert_eq!(input.assigned_to, "u7");
        assert!(input.description.is_empty());
    }
}
