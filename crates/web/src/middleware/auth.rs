//! Route guard extractors and session store helpers.
//!
//! Every protected handler takes one of the extractors below. They read the
//! `{user, token}` pair from the session and apply [`taskboard_core::decide`]:
//! no session redirects to `/login`, a member on an admin page redirects to
//! `/dashboard`. Nothing is re-verified with the backend here; a stale role
//! or token is only discovered when a backend call fails.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use secrecy::{ExposeSecret, SecretString};
use tower_sessions::Session;

use taskboard_core::{Access, LOGIN_PATH, User, decide};

use crate::models::{UserSession, session_keys};

/// Extractor that requires a logged-in user.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireSession(current): RequireSession,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", current.user.name)
/// }
/// ```
pub struct RequireSession(pub UserSession);

/// Extractor that requires a logged-in admin.
///
/// Members are redirected to the dashboard rather than shown an error.
pub struct RequireAdmin(pub UserSession);

/// Extractor that optionally gets the current session.
///
/// Unlike `RequireSession`, this never rejects the request.
pub struct OptionalSession(pub Option<UserSession>);

/// Why a guarded request was not let through.
#[derive(Debug)]
pub enum GuardRejection {
    /// Send the browser elsewhere (login or landing page).
    Redirect(&'static str),
    /// The session layer is not installed on this route.
    MissingSessionLayer,
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(path) => Redirect::to(path).into_response(),
            Self::MissingSessionLayer => {
                tracing::error!("Session layer missing from router");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        guarded(parts, Access::Authenticated).await.map(Self)
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        guarded(parts, Access::AdminOnly).await.map(Self)
    }
}

impl<S> FromRequestParts<S> for OptionalSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let current = match parts.extensions.get::<Session>() {
            Some(session) => load_user_session(session).await,
            None => None,
        };

        Ok(Self(current))
    }
}

/// Read the session and apply the guard decision for `access`.
async fn guarded(parts: &Parts, access: Access) -> Result<UserSession, GuardRejection> {
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(GuardRejection::MissingSessionLayer)?;

    let current = load_user_session(session).await;
    let decision = decide(current.as_ref().map(|c| &c.user), access);

    match (decision.redirect_path(), current) {
        (None, Some(current)) => Ok(current),
        (Some(path), current) => {
            tracing::debug!(
                path = %parts.uri.path(),
                redirect = path,
                user_id = current.as_ref().map(|c| c.user.id.as_str()),
                "Route guard redirect"
            );
            Err(GuardRejection::Redirect(path))
        }
        (None, None) => Err(GuardRejection::Redirect(LOGIN_PATH)),
    }
}

/// Load the `{user, token}` pair.
///
/// Returns `None` unless both keys are present and readable.
pub async fn load_user_session(session: &Session) -> Option<UserSession> {
    let user = session
        .get::<User>(session_keys::USER)
        .await
        .map_err(|e| tracing::warn!("Failed to read session user: {e}"))
        .ok()
        .flatten()?;
    let token = session
        .get::<String>(session_keys::TOKEN)
        .await
        .map_err(|e| tracing::warn!("Failed to read session token: {e}"))
        .ok()
        .flatten()?;

    Some(UserSession::new(user, SecretString::from(token)))
}

/// Store the `{user, token}` pair after a successful login.
///
/// The session ID is cycled first so a pre-login session cookie cannot be
/// reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_user_session(
    session: &Session,
    user: &User,
    token: &SecretString,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::USER, user).await?;
    session
        .insert(session_keys::TOKEN, token.expose_secret())
        .await
}

/// Remove the `{user, token}` pair (logout or rejected token).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_user_session(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<serde_json::Value>(session_keys::USER)
        .await?;
    session
        .remove::<serde_json::Value>(session_keys::TOKEN)
        .await?;
    Ok(())
}

/// Queue an error message for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_flash_error(
    session: &Session,
    message: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::FLASH_ERROR, message).await
}

/// Take (and clear) the queued error message, if any.
pub async fn take_flash_error(session: &Session) -> Option<String> {
    session
        .remove::<String>(session_keys::FLASH_ERROR)
        .await
        .ok()
        .flatten()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use taskboard_core::{Role, UserId};
    use tower_sessions::MemoryStore;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn user(role: Role) -> User {
        User {
            id: UserId::new("u1"),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let session = session();
        save_user_session(&session, &user(Role::Admin), &SecretString::from("tok"))
            .await
            .unwrap();

        let current = load_user_session(&session).await.unwrap();
        assert_eq!(current.user, user(Role::Admin));
        assert_eq!(current.token.expose_secret(), "tok");
    }

    #[tokio::test]
    async fn test_missing_token_means_no_session() {
        let session = session();
        session
            .insert(session_keys::USER, user(Role::Member))
            .await
            .unwrap();
        assert!(load_user_session(&session).await.is_none());
    }

    #[tokio::test]
    async fn test_clear_removes_both_keys() {
        let session = session();
        save_user_session(&session, &user(Role::Member), &SecretString::from("tok"))
            .await
            .unwrap();
        clear_user_session(&session).await.unwrap();

        assert!(load_user_session(&session).await.is_none());
        assert!(
            session
                .get::<String>(session_keys::TOKEN)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_flash_is_one_shot() {
        let session = session();
        set_flash_error(&session, "Task not found").await.unwrap();
        assert_eq!(take_flash_error(&session).await.as_deref(), Some("Task not found"));
        assert!(take_flash_error(&session).await.is_none());
    }
}
