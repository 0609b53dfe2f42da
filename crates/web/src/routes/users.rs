//! User management (admin only).

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use taskboard_core::{ListState, LoadPhase, Role, User, UserDraft, UserId};

use crate::{
    components::{NavView, UserFormView, UserRowView},
    error::AppError,
    filters,
    middleware::{RequireAdmin, take_flash_error},
    models::UserSession,
    state::AppState,
};

use super::{ConfirmDeleteTemplate, backend_failure, redirect_with_error, render};

const USERS_PATH: &str = "/admin/users";

/// User list page template.
#[derive(Template)]
#[template(path = "admin_users/index.html")]
pub struct UsersIndexTemplate {
    pub nav: Option<NavView>,
    pub users: Vec<UserRowView>,
    pub error: Option<String>,
}

/// Create/edit user page template.
#[derive(Template)]
#[template(path = "admin_users/form.html")]
pub struct UserFormTemplate {
    pub nav: Option<NavView>,
    pub form: UserFormView,
    pub error: Option<String>,
}

/// Create/edit form submission.
///
/// No `Debug`: the password must not reach the logs.
#[derive(Default, Deserialize)]
pub struct UserFormInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub password: String,
}

impl UserFormInput {
    /// Check required fields and build the body sent to the backend.
    ///
    /// A blank password is left out, which keeps the current one on update.
    ///
    /// # Errors
    ///
    /// Returns the message to show next to the form.
    pub fn to_draft(&self, password_required: bool) -> Result<UserDraft, String> {
        let name = self.name.trim();
        let email = self.email.trim();
        if name.is_empty() {
            return Err("Name is required".to_string());
        }
        if email.is_empty() {
            return Err("Email is required".to_string());
        }

        let role = self
            .role
            .parse::<Role>()
            .map_err(|_| "Please choose a valid role".to_string())?;

        let password = Some(self.password.as_str())
            .filter(|p| !p.is_empty())
            .map(String::from);
        if password_required && password.is_none() {
            return Err("Password is required".to_string());
        }

        Ok(UserDraft {
            name: name.to_string(),
            email: email.to_string(),
            role,
            password,
        })
    }

    fn echo(&self, form: UserFormView) -> UserFormView {
        form.with_values(&self.name, &self.email, &self.role)
    }
}

fn form_page(current: &UserSession, form: UserFormView, error: Option<String>) -> Html<String> {
    let template = UserFormTemplate {
        nav: Some(NavView::new(current, USERS_PATH)),
        form,
        error,
    };
    render(&template).unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        Html("Internal Server Error".to_string())
    })
}

/// User list handler.
#[instrument(skip(current, state, session), fields(user_id = %current.user.id))]
pub async fn index(
    RequireAdmin(current): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>, AppError> {
    let mut list: ListState<User> = ListState::new();
    match state.api().list_users(&current.token).await {
        Ok(users) => list.finish(Ok::<_, String>(users)),
        Err(e) => list.finish(Err(backend_failure(&session, &e).await?)),
    }

    // A failed fetch leaves any queued action message for the next render
    if list.phase() == LoadPhase::Ready
        && let Some(message) = take_flash_error(&session).await
    {
        list.fail_action(message);
    }

    let template = UsersIndexTemplate {
        nav: Some(NavView::new(&current, USERS_PATH)),
        users: list
            .items()
            .iter()
            .map(|user| UserRowView::new(user, &current.user.id))
            .collect(),
        error: list.error().map(String::from),
    };

    render(&template)
}

/// New user form handler.
#[instrument(skip(current, session))]
pub async fn new_form(RequireAdmin(current): RequireAdmin, session: Session) -> Html<String> {
    let error = take_flash_error(&session).await;
    form_page(&current, UserFormView::create(), error)
}

/// Create user handler.
#[instrument(skip(current, state, session, input), fields(email = %input.email))]
pub async fn create(
    RequireAdmin(current): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Form(input): Form<UserFormInput>,
) -> Result<Response, AppError> {
    let message = match input.to_draft(true) {
        Ok(draft) => match state.api().create_user(&current.token, &draft).await {
            Ok(()) => {
                tracing::info!(role = %draft.role, "User created");
                return Ok(Redirect::to(USERS_PATH).into_response());
            }
            Err(e) => backend_failure(&session, &e).await?,
        },
        Err(message) => message,
    };

    let form = input.echo(UserFormView::create());
    Ok(form_page(&current, form, Some(message)).into_response())
}

/// Edit user form handler.
#[instrument(skip(current, state, session), fields(target_id = %id))]
pub async fn edit_form(
    RequireAdmin(current): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = UserId::new(id);
    let user = match state.api().get_user(&current.token, &id).await {
        Ok(user) => user,
        Err(e) => return redirect_with_error(&session, &e, USERS_PATH).await,
    };

    let error = take_flash_error(&session).await;
    Ok(form_page(&current, UserFormView::edit(&user), error).into_response())
}

/// Update user handler.
#[instrument(skip(current, state, session, input), fields(target_id = %id))]
pub async fn update(
    RequireAdmin(current): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(input): Form<UserFormInput>,
) -> Result<Response, AppError> {
    let id = UserId::new(id);

    let message = match input.to_draft(false) {
        Ok(draft) => match state.api().update_user(&current.token, &id, &draft).await {
            Ok(()) => {
                tracing::info!(role = %draft.role, "User updated");
                return Ok(Redirect::to(USERS_PATH).into_response());
            }
            Err(e) => backend_failure(&session, &e).await?,
        },
        Err(message) => message,
    };

    // The form only needs the ID for its action; the rest is the submission.
    let placeholder = User {
        id,
        name: String::new(),
        email: String::new(),
        role: Role::default(),
    };
    let form = input.echo(UserFormView::edit(&placeholder));
    Ok(form_page(&current, form, Some(message)).into_response())
}

/// Delete confirmation page.
#[instrument(skip(current, state, session), fields(target_id = %id))]
pub async fn confirm_delete(
    RequireAdmin(current): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = UserId::new(id);
    let user = match state.api().get_user(&current.token, &id).await {
        Ok(user) => user,
        Err(e) => return redirect_with_error(&session, &e, USERS_PATH).await,
    };

    let encoded = urlencoding::encode(user.id.as_str());
    let template = ConfirmDeleteTemplate {
        nav: Some(NavView::new(&current, USERS_PATH)),
        heading: "Delete User",
        question: "Are you sure you want to delete this user?",
        subject: format!("{} ({})", user.name, user.email),
        action: format!("{USERS_PATH}/{encoded}/delete"),
        cancel_href: USERS_PATH.to_string(),
    };

    Ok(render(&template)?.into_response())
}

/// Delete user handler.
#[instrument(skip(current, state, session), fields(target_id = %id))]
pub async fn delete(
    RequireAdmin(current): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = UserId::new(id);
    match state.api().delete_user(&current.token, &id).await {
        Ok(()) => {
            tracing::info!("User deleted");
            Ok(Redirect::to(USERS_PATH).into_response())
        }
        Err(e) => redirect_with_error(&session, &e, USERS_PATH).await,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input() -> UserFormInput {
        UserFormInput {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            role: "admin".to_string(),
            password: "hunter22".to_string(),
        }
    }

    #[test]
    fn test_create_requires_password() {
        let no_password = UserFormInput {
            password: String::new(),
            ..input()
        };
        assert_eq!(
            no_password.to_draft(true).unwrap_err(),
            "Password is required"
        );

        let draft = no_password.to_draft(false).unwrap();
        assert!(draft.password.is_none());
        assert_eq!(draft.role, Role::Admin);
    }

    #[test]
    fn test_required_name_and_email() {
        let no_name = UserFormInput {
            name: " ".to_string(),
            ..input()
        };
        assert_eq!(no_name.to_draft(true).unwrap_err(), "Name is required");

        let no_email = UserFormInput {
            email: String::new(),
            ..input()
        };
        assert_eq!(no_email.to_draft(true).unwrap_err(), "Email is required");
    }

    #[test]
    fn test_rejects_unknown_role() {
        let bad = UserFormInput {
            role: "owner".to_string(),
            ..input()
        };
        assert!(bad.to_draft(true).is_err());
    }
}
