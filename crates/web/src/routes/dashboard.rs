//! Task dashboard.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use taskboard_core::{ListState, LoadPhase, StatusFilter, Task};

use crate::{
    components::{FilterOptionView, NavView, TaskRowView, filter_options},
    error::AppError,
    filters,
    middleware::{RequireSession, take_flash_error},
    state::AppState,
};

use super::{backend_failure, render};

/// Dashboard query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// `Pending`, `In Progress`, `Completed`; anything else shows all tasks.
    pub status: Option<String>,
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub nav: Option<NavView>,
    pub heading: &'static str,
    pub subheading: &'static str,
    pub is_admin: bool,
    pub filters: Vec<FilterOptionView>,
    /// Active filter, sent back with status changes so the page keeps it.
    pub filter_query: &'static str,
    pub tasks: Vec<TaskRowView>,
    pub error: Option<String>,
}

/// Heading and subheading for the viewer's role.
const fn headings(is_admin: bool) -> (&'static str, &'static str) {
    if is_admin {
        ("All Tasks", "Manage all tasks in the system")
    } else {
        ("My Tasks", "View and update your assigned tasks")
    }
}

/// Dashboard handler.
///
/// Fetches the full task list on every render and filters it locally. A
/// fetch failure shows the backend's message over an empty list; a message
/// left by a failed action is shown over the fresh list, or kept in the
/// session until a fetch succeeds.
#[instrument(skip(current, state, session), fields(user_id = %current.user.id))]
pub async fn index(
    RequireSession(current): RequireSession,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, AppError> {
    let filter = StatusFilter::from_query(query.status.as_deref());

    let mut list: ListState<Task> = ListState::new();
    match state.api().list_tasks(&current.token).await {
        Ok(tasks) => list.finish(Ok::<_, String>(tasks)),
        Err(e) => list.finish(Err(backend_failure(&session, &e).await?)),
    }

    // A failed fetch leaves any queued action message for the next render
    if list.phase() == LoadPhase::Ready
        && let Some(message) = take_flash_error(&session).await
    {
        list.fail_action(message);
    }

    let tasks = list
        .filtered(filter)
        .into_iter()
        .map(|task| TaskRowView::new(&current.user, task))
        .collect();

    let is_admin = current.is_admin();
    let (heading, subheading) = headings(is_admin);

    let template = DashboardTemplate {
        nav: Some(NavView::new(&current, "/dashboard")),
        heading,
        subheading,
        is_admin,
        filters: filter_options(filter),
        filter_query: filter.as_query(),
        tasks,
        error: list.error().map(String::from),
    };

    render(&template)
}
