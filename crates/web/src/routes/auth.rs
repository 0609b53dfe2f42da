//! Login and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use taskboard_core::{LANDING_PATH, LOGIN_PATH};

use crate::{
    components::NavView,
    error::{AppError, clear_sentry_user, set_sentry_user},
    filters,
    middleware::{
        OptionalSession, clear_user_session, save_user_session, take_flash_error,
    },
    state::AppState,
};

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub nav: Option<NavView>,
    /// Echoed back after a failed attempt; the password never is.
    pub email: String,
    pub error: Option<String>,
}

/// Login form submission.
///
/// No `Debug`: the password must not reach the logs.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login page handler.
///
/// Already-authenticated users go straight to the dashboard. A message left
/// by an expired session is shown once.
#[instrument(skip_all)]
pub async fn login_page(
    OptionalSession(current): OptionalSession,
    session: Session,
) -> Response {
    if current.is_some() {
        return Redirect::to(LANDING_PATH).into_response();
    }

    LoginTemplate {
        nav: None,
        email: String::new(),
        error: take_flash_error(&session).await,
    }
    .into_response()
}

/// Login form handler.
///
/// On success the `{user, token}` pair is stored in the session and the
/// browser is sent to the dashboard. On failure the form is shown again with
/// the backend's message.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let email = form.email.trim();
    let password = SecretString::from(form.password);
    if email.is_empty() || password.expose_secret().is_empty() {
        return Ok(login_error(email, "Email and password are required"));
    }

    match state.api().login(email, &password).await {
        Ok(login) => {
            let token = SecretString::from(login.token);
            save_user_session(&session, &login.user, &token).await?;
            set_sentry_user(&login.user.id, Some(&login.user.email));

            tracing::info!(
                user_id = %login.user.id,
                role = %login.user.role,
                "User logged in"
            );
            Ok(Redirect::to(LANDING_PATH).into_response())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Login failed");
            Ok(login_error(email, &e.user_message()))
        }
    }
}

fn login_error(email: &str, message: &str) -> Response {
    LoginTemplate {
        nav: None,
        email: email.to_string(),
        error: Some(message.to_string()),
    }
    .into_response()
}

/// Logout handler: clear the session and return to the login page.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    clear_user_session(&session).await?;
    clear_sentry_user();

    tracing::info!("User logged out");
    Ok(Redirect::to(LOGIN_PATH))
}
