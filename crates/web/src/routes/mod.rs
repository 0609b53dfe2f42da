//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Landing page
//!
//! # Auth
//! GET  /login                         - Login page
//! POST /login                         - Exchange credentials for a session
//! POST /logout                        - Clear the session
//!
//! # Tasks
//! GET  /dashboard?status=             - Task list with status filter
//! GET  /tasks/new                     - Create form (admin)
//! POST /tasks                         - Create task (admin)
//! GET  /tasks/{id}/edit               - Edit form (admin)
//! POST /tasks/{id}                    - Update task (admin)
//! POST /tasks/{id}/status             - Change status (admin or assignee)
//! GET  /tasks/{id}/delete             - Delete confirmation (admin)
//! POST /tasks/{id}/delete             - Delete task (admin)
//!
//! # User Management (admin)
//! GET  /admin/users                   - User list
//! GET  /admin/users/new               - Create form
//! POST /admin/users                   - Create user
//! GET  /admin/users/{id}/edit         - Edit form
//! POST /admin/users/{id}              - Update user
//! GET  /admin/users/{id}/delete       - Delete confirmation
//! POST /admin/users/{id}/delete       - Delete user
//! ```
//!
//! Every mutation answers with a redirect to the page that lists the
//! affected entity, which fetches the list again. A failed mutation carries
//! its message across the redirect in the session's flash slot.

use askama::Template;
use axum::{
    Router,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_sessions::Session;

use crate::{
    api::ApiError,
    components::NavView,
    error::{AppError, clear_sentry_user},
    filters,
    middleware::{clear_user_session, set_flash_error},
    state::AppState,
};

pub mod auth;
pub mod dashboard;
pub mod home;
pub mod tasks;
pub mod users;

/// Build the page router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        // Auth
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        // Tasks
        .route("/dashboard", get(dashboard::index))
        .route("/tasks", post(tasks::create))
        .route("/tasks/new", get(tasks::new_form))
        .route("/tasks/{id}", post(tasks::update))
        .route("/tasks/{id}/edit", get(tasks::edit_form))
        .route("/tasks/{id}/status", post(tasks::update_status))
        .route(
            "/tasks/{id}/delete",
            get(tasks::confirm_delete).post(tasks::delete),
        )
        // User management
        .route("/admin/users", get(users::index).post(users::create))
        .route("/admin/users/new", get(users::new_form))
        .route("/admin/users/{id}", post(users::update))
        .route("/admin/users/{id}/edit", get(users::edit_form))
        .route(
            "/admin/users/{id}/delete",
            get(users::confirm_delete).post(users::delete),
        )
}

/// Delete confirmation page, shared by tasks and users.
#[derive(Template)]
#[template(path = "confirm_delete.html")]
pub struct ConfirmDeleteTemplate {
    pub nav: Option<NavView>,
    pub heading: &'static str,
    pub question: &'static str,
    /// Name of the thing being deleted.
    pub subject: String,
    pub action: String,
    pub cancel_href: String,
}

/// Render a template into an HTML response.
pub(crate) fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

/// Turn a failed backend call into the message shown to the user.
///
/// A rejected token (401) also ends the session, so the next navigation
/// lands on the login page.
pub(crate) async fn backend_failure(session: &Session, err: &ApiError) -> Result<String, AppError> {
    if err.is_unauthorized() {
        tracing::info!(error = %err, "Backend rejected session token, clearing session");
        clear_user_session(session).await?;
        clear_sentry_user();
    } else {
        tracing::warn!(error = %err, status = ?err.status(), "Backend call failed");
    }

    Ok(err.user_message())
}

/// Redirect to `to`, showing the failure's message there.
pub(crate) async fn redirect_with_error(
    session: &Session,
    err: &ApiError,
    to: &str,
) -> Result<Response, AppError> {
    let message = backend_failure(session, err).await?;
    redirect_with_message(session, &message, to).await
}

/// Redirect to `to`, showing `message` there.
pub(crate) async fn redirect_with_message(
    session: &Session,
    message: &str,
    to: &str,
) -> Result<Response, AppError> {
    set_flash_error(session, message).await?;
    Ok(Redirect::to(to).into_response())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the backend.
pub async fn health() -> &'static str {
    "ok"
}
